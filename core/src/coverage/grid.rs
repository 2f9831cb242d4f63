use crate::math::stats::{GridStats, StatsHelper};
use crate::prelude::{CoverageError, CoverageResult, GridShape};
use ndarray::{Array2, ArrayView2};

/// Sentinel power for cells no transmitter meaningfully reaches, in dBm.
pub const FLOOR_DBM: f64 = -150.0;

/// Received power per cell in dBm, indexed `[y][x]` (rows are grid lines).
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageGrid {
    values: Array2<f64>,
}

impl CoverageGrid {
    pub fn filled(shape: GridShape, value: f64) -> Self {
        Self {
            values: Array2::from_elem((shape.height, shape.width), value),
        }
    }

    /// Builds a grid from row-major values (`width` values per row).
    pub fn from_row_major(shape: GridShape, values: Vec<f64>) -> CoverageResult<Self> {
        let values = Array2::from_shape_vec((shape.height, shape.width), values)
            .map_err(|err| CoverageError::Internal(format!("grid {}: {}", shape, err)))?;
        Ok(Self { values })
    }

    pub fn shape(&self) -> GridShape {
        let (height, width) = self.values.dim();
        GridShape { width, height }
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.values.get((y, x)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn to_row_major(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn stats(&self) -> Option<GridStats> {
        StatsHelper::summarize(&self.to_row_major())
    }

    /// Fraction of cells at or above `threshold_dbm`.
    pub fn coverage_ratio(&self, threshold_dbm: f64) -> f64 {
        StatsHelper::fraction_at_or_above(&self.to_row_major(), threshold_dbm)
    }
}
