use crate::math::power::free_space_loss_db;
use crate::prelude::{CoverageResult, PropagationModel};
use crate::propagation::params::PropagationParameters;

/// Close-in (CI) path-loss model.
///
/// ```text
/// PL(d) = FSPL(d0) + 10 * N * log10(max(d, d0) / d0)
/// Pr(d) = Pt - PL(d)
/// ```
///
/// `FSPL(d0)` is evaluated once at construction and reused for every cell.
#[derive(Debug, Clone, Copy)]
pub struct CloseInModel {
    params: PropagationParameters,
    fspl_d0: f64,
}

impl CloseInModel {
    pub fn new(params: PropagationParameters) -> CoverageResult<Self> {
        params.validate()?;
        let fspl_d0 = free_space_loss_db(params.reference_distance, params.frequency_hz);
        Ok(Self { params, fspl_d0 })
    }

    pub fn params(&self) -> &PropagationParameters {
        &self.params
    }

    /// Free-space loss at the reference distance, in dB.
    pub fn reference_loss_db(&self) -> f64 {
        self.fspl_d0
    }

    pub fn path_loss_db(&self, distance: f64) -> f64 {
        let d0 = self.params.reference_distance;
        // NaN distances also fall back to d0
        let effective = if distance > d0 { distance } else { d0 };
        self.fspl_d0 + 10.0 * self.params.path_loss_exponent * (effective / d0).log10()
    }
}

impl PropagationModel for CloseInModel {
    fn received_power_dbm(&self, distance: f64) -> f64 {
        self.params.transmit_power_dbm - self.path_loss_db(distance)
    }
}
