use serde::{Deserialize, Serialize};

/// Summary of a coverage grid, used by renderers to derive a color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub min_dbm: f64,
    pub max_dbm: f64,
    pub mean_dbm: f64,
}

pub struct StatsHelper;

impl StatsHelper {
    pub fn summarize(values: &[f64]) -> Option<GridStats> {
        if values.is_empty() {
            return None;
        }
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        Some(GridStats {
            min_dbm: min,
            max_dbm: max,
            mean_dbm: sum / values.len() as f64,
        })
    }

    /// Fraction of values at or above `threshold`.
    pub fn fraction_at_or_above(values: &[f64], threshold: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let covered = values.iter().filter(|&&v| v >= threshold).count();
        covered as f64 / values.len() as f64
    }
}
