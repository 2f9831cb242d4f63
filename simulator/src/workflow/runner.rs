use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use coveragecore::scenario::{CoverageEngine, CoverageOutcome, ScenarioConfig};
use coveragecore::telemetry::MetricsSnapshot;
use std::sync::Arc;

pub struct WorkflowResult {
    pub outcome: CoverageOutcome,
    pub coverage_threshold_dbm: f64,
    pub coverage_ratio: f64,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    engine: Arc<CoverageEngine>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            engine: Arc::new(CoverageEngine::new()),
        }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        self.execute_scenario(&self.config.scenario)
    }

    /// Runs an ad-hoc scenario with this runner's threshold and engine.
    pub fn execute_scenario(&self, scenario: &ScenarioConfig) -> anyhow::Result<WorkflowResult> {
        let outcome = self
            .engine
            .run(scenario)
            .with_context(|| format!("running scenario {}", scenario.name))?;
        let coverage_threshold_dbm = self.config.coverage_threshold_dbm;
        let coverage_ratio = outcome.coverage_ratio(coverage_threshold_dbm);
        Ok(WorkflowResult {
            outcome,
            coverage_threshold_dbm,
            coverage_ratio,
        })
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.engine.metrics().snapshot()
    }
}
