pub mod config;
pub mod engine;

pub use config::{ScenarioConfig, TierConfig};
pub use engine::{CoverageEngine, CoverageOutcome, TierOutcome};
