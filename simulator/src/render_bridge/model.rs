use crate::workflow::runner::WorkflowResult;
use coveragecore::math::GridStats;
use coveragecore::Coordinate;
use serde::{Deserialize, Serialize};

/// Transmitter tier as shown to the renderer (marker layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierReport {
    pub name: String,
    pub frequency_hz: f64,
    pub path_loss_exponent: f64,
    pub transmit_power_dbm: f64,
    pub transmitters: Vec<Coordinate>,
}

/// Everything an external renderer needs to draw the heatmap overlay.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageReport {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Row-major combined power, `width` values per row, dBm.
    pub values_dbm: Vec<f64>,
    pub stats: Option<GridStats>,
    pub coverage_threshold_dbm: f64,
    pub coverage_ratio: f64,
    pub tiers: Vec<TierReport>,
}

impl CoverageReport {
    pub fn from_result(result: &WorkflowResult) -> Self {
        let outcome = &result.outcome;
        Self {
            name: outcome.name.clone(),
            width: outcome.shape.width,
            height: outcome.shape.height,
            values_dbm: outcome.combined.to_row_major(),
            stats: outcome.stats(),
            coverage_threshold_dbm: result.coverage_threshold_dbm,
            coverage_ratio: result.coverage_ratio,
            tiers: outcome
                .tiers
                .iter()
                .map(|tier| TierReport {
                    name: tier.name.clone(),
                    frequency_hz: tier.params.frequency_hz,
                    path_loss_exponent: tier.params.path_loss_exponent,
                    transmit_power_dbm: tier.params.transmit_power_dbm,
                    transmitters: tier.transmitters.clone(),
                })
                .collect(),
        }
    }

    pub fn transmitter_count(&self) -> usize {
        self.tiers.iter().map(|tier| tier.transmitters.len()).sum()
    }
}
