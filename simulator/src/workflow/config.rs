use crate::generator::presets::build_preset;
use anyhow::Context;
use coveragecore::scenario::ScenarioConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Received power at which a cell counts as covered in reports, in dBm.
pub const DEFAULT_COVERAGE_THRESHOLD_DBM: f64 = -100.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(flatten)]
    pub scenario: ScenarioConfig,
    #[serde(default = "default_threshold")]
    pub coverage_threshold_dbm: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_COVERAGE_THRESHOLD_DBM
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_preset(name: &str) -> anyhow::Result<Self> {
        let scenario = build_preset(name).with_context(|| format!("building preset {}", name))?;
        Ok(Self::from_scenario(scenario))
    }

    pub fn from_scenario(scenario: ScenarioConfig) -> Self {
        Self {
            scenario,
            coverage_threshold_dbm: DEFAULT_COVERAGE_THRESHOLD_DBM,
        }
    }
}
