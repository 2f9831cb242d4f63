use crate::coverage::{CoverageGrid, LayerCombiner, TierEvaluator};
use crate::math::stats::GridStats;
use crate::placement::PlacementGenerator;
use crate::prelude::{Coordinate, CoverageResult, GridShape};
use crate::propagation::{CloseInModel, PropagationParameters};
use crate::scenario::config::{ScenarioConfig, TierConfig};
use crate::telemetry::{LogManager, MetricsRecorder};

/// Realized sites and best-server grid of one tier.
#[derive(Debug, Clone)]
pub struct TierOutcome {
    pub name: String,
    pub params: PropagationParameters,
    pub transmitters: Vec<Coordinate>,
    pub grid: CoverageGrid,
}

/// Result of one scenario run.
#[derive(Debug, Clone)]
pub struct CoverageOutcome {
    pub name: String,
    pub shape: GridShape,
    pub tiers: Vec<TierOutcome>,
    /// Power-summed grid; equal to the tier grid for single-tier scenarios.
    pub combined: CoverageGrid,
}

impl CoverageOutcome {
    pub fn stats(&self) -> Option<GridStats> {
        self.combined.stats()
    }

    pub fn coverage_ratio(&self, threshold_dbm: f64) -> f64 {
        self.combined.coverage_ratio(threshold_dbm)
    }
}

/// Placement → per-tier evaluation → layer combination.
pub struct CoverageEngine {
    combiner: LayerCombiner,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl CoverageEngine {
    pub fn new() -> Self {
        Self {
            combiner: LayerCombiner::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("engine"),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn run(&self, config: &ScenarioConfig) -> CoverageResult<CoverageOutcome> {
        config.validate()?;
        let shape = config.shape()?;
        let evaluator = TierEvaluator::new(shape, config.floor_dbm);

        let mut tiers = Vec::with_capacity(config.tiers.len());
        for tier in &config.tiers {
            tiers.push(self.run_tier(config, tier, shape, &evaluator)?);
        }

        let grids: Vec<CoverageGrid> = tiers.iter().map(|tier| tier.grid.clone()).collect();
        let combined = self.combiner.combine(&grids)?;
        self.logger.record(&format!(
            "scenario {}: {} tiers combined over {} grid",
            config.name,
            tiers.len(),
            shape
        ));

        Ok(CoverageOutcome {
            name: config.name.clone(),
            shape,
            tiers,
            combined,
        })
    }

    fn run_tier(
        &self,
        config: &ScenarioConfig,
        tier: &TierConfig,
        shape: GridShape,
        evaluator: &TierEvaluator,
    ) -> CoverageResult<TierOutcome> {
        let zones = config.exclusion_zones.union(&tier.exclusion_zones);
        let generator = PlacementGenerator::new(shape, zones);
        let placement = generator.realize(&tier.name, &tier.placements, tier.max_nodes)?;
        self.metrics
            .record_placement(placement.coordinates.len(), placement.rejected);

        let model = CloseInModel::new(tier.params)?;
        let grid = evaluator.evaluate(&placement.coordinates, &model)?;
        self.metrics.record_tier(shape.cell_count());

        Ok(TierOutcome {
            name: tier.name.clone(),
            params: tier.params,
            transmitters: placement.coordinates,
            grid,
        })
    }
}

impl Default for CoverageEngine {
    fn default() -> Self {
        Self::new()
    }
}
