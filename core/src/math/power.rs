//! Power-domain conversions.
//!
//! Path loss and received power live in dB; superposition of uncorrelated
//! sources happens in milliwatts.

/// Speed of light used by the close-in reference loss, m/s.
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Convert dBm to milliwatts: `P(mW) = 10^(P(dBm) / 10)`.
pub fn dbm_to_mw(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0)
}

/// Convert milliwatts to dBm: `P(dBm) = 10 * log10(P(mW))`.
///
/// Non-positive input yields `-inf`/NaN; callers only pass sums of
/// `dbm_to_mw` outputs, which are strictly positive for finite dBm.
pub fn mw_to_dbm(mw: f64) -> f64 {
    10.0 * mw.log10()
}

/// Free-space path loss at distance `d0` for carrier `frequency_hz` (Friis).
pub fn free_space_loss_db(d0: f64, frequency_hz: f64) -> f64 {
    20.0 * (4.0 * std::f64::consts::PI * d0 * frequency_hz / SPEED_OF_LIGHT).log10()
}
