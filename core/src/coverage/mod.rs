pub mod combiner;
pub mod grid;
pub mod tier;

pub use combiner::LayerCombiner;
pub use grid::{CoverageGrid, FLOOR_DBM};
pub use tier::{compute_tier, TierEvaluator};
