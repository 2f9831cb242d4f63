use crate::coverage::grid::FLOOR_DBM;
use crate::placement::{ExclusionZoneSet, PlacementSource};
use crate::prelude::{CoverageError, CoverageResult, GridShape};
use crate::propagation::PropagationParameters;
use serde::{Deserialize, Serialize};

/// Full description of one coverage run over a venue plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_floor_dbm")]
    pub floor_dbm: f64,
    /// Zones applied to every tier.
    #[serde(default)]
    pub exclusion_zones: ExclusionZoneSet,
    pub tiers: Vec<TierConfig>,
}

/// One tier of transmitters sharing a propagation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub name: String,
    pub params: PropagationParameters,
    /// Zones applied to this tier only, on top of the scenario zones.
    #[serde(default)]
    pub exclusion_zones: ExclusionZoneSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,
    pub placements: Vec<PlacementSource>,
}

fn default_floor_dbm() -> f64 {
    FLOOR_DBM
}

impl ScenarioConfig {
    pub fn shape(&self) -> CoverageResult<GridShape> {
        GridShape::new(self.width, self.height)
    }

    pub fn validate(&self) -> CoverageResult<()> {
        self.shape()?;
        if !self.floor_dbm.is_finite() {
            return Err(CoverageError::Config(format!(
                "floor_dbm must be finite, got {}",
                self.floor_dbm
            )));
        }
        if self.tiers.is_empty() {
            return Err(CoverageError::Config(format!(
                "scenario {} defines no tiers",
                self.name
            )));
        }
        for tier in &self.tiers {
            tier.params.validate().map_err(|err| match err {
                CoverageError::InvalidParameters(message) => {
                    CoverageError::InvalidParameters(format!("tier {}: {}", tier.name, message))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VELODROME: &str = r#"
name: velodromo
width: 620
height: 400
exclusion_zones:
  - { x_min: 60, y_min: 50, x_max: 550, y_max: 350 }
tiers:
  - name: small-cells
    params: { frequency_hz: 3.5e9, path_loss_exponent: 3.2, transmit_power_dbm: 33 }
    placements:
      - kind: literal
        points: [[300, 25], [300, 370]]
  - name: rru
    params: { frequency_hz: 3.5e9, path_loss_exponent: 3.2, transmit_power_dbm: 33 }
    max_nodes: 50
    placements:
      - kind: line
        start: [60, 350]
        end: [550, 350]
        count: 20
"#;

    #[test]
    fn scenario_parses_from_yaml_with_defaults() {
        let config: ScenarioConfig = serde_yaml::from_str(VELODROME).unwrap();
        assert_eq!(config.floor_dbm, FLOOR_DBM);
        assert_eq!(config.tiers.len(), 2);
        assert_eq!(config.tiers[1].max_nodes, Some(50));
        assert!(config.tiers[0].exclusion_zones.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scenario_parses_from_json() {
        let yaml: ScenarioConfig = serde_yaml::from_str(VELODROME).unwrap();
        let json = serde_json::to_string(&yaml).unwrap();
        let parsed: ScenarioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, yaml);
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let mut config: ScenarioConfig = serde_yaml::from_str(VELODROME).unwrap();
        config.height = 0;
        assert!(matches!(
            config.validate(),
            Err(CoverageError::ZeroSizedGrid { width: 620, height: 0 })
        ));
    }

    #[test]
    fn empty_tier_list_is_rejected() {
        let mut config: ScenarioConfig = serde_yaml::from_str(VELODROME).unwrap();
        config.tiers.clear();
        assert!(matches!(config.validate(), Err(CoverageError::Config(_))));
    }

    #[test]
    fn invalid_tier_parameters_name_the_tier() {
        let mut config: ScenarioConfig = serde_yaml::from_str(VELODROME).unwrap();
        config.tiers[1].params.path_loss_exponent = -1.0;
        match config.validate() {
            Err(CoverageError::InvalidParameters(message)) => assert!(message.contains("rru")),
            other => panic!("expected parameter error, got {:?}", other),
        }
    }
}
