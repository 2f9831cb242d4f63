use crate::prelude::{CoverageError, CoverageResult};
use serde::{Deserialize, Serialize};

/// Radio parameters shared by every transmitter of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationParameters {
    /// Carrier frequency in Hz.
    pub frequency_hz: f64,
    /// Close-in reference distance d0, in the same unit as grid positions.
    #[serde(default = "default_reference_distance")]
    pub reference_distance: f64,
    /// Path-loss exponent N (2.0 free space, 2.5 outdoor venues, 3.2 dense indoor).
    pub path_loss_exponent: f64,
    pub transmit_power_dbm: f64,
}

fn default_reference_distance() -> f64 {
    1.0
}

impl PropagationParameters {
    pub fn validate(&self) -> CoverageResult<()> {
        let positive = [
            ("frequency_hz", self.frequency_hz),
            ("reference_distance", self.reference_distance),
            ("path_loss_exponent", self.path_loss_exponent),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoverageError::InvalidParameters(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.transmit_power_dbm.is_finite() {
            return Err(CoverageError::InvalidParameters(format!(
                "transmit_power_dbm must be finite, got {}",
                self.transmit_power_dbm
            )));
        }
        Ok(())
    }
}

impl Default for PropagationParameters {
    fn default() -> Self {
        Self {
            frequency_hz: 3.5e9,
            reference_distance: 1.0,
            path_loss_exponent: 3.2,
            transmit_power_dbm: 33.0,
        }
    }
}
