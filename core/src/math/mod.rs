pub mod power;
pub mod stats;

pub use power::{dbm_to_mw, mw_to_dbm};
pub use stats::{GridStats, StatsHelper};
