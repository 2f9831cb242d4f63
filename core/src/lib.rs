//! Coverage computation core for multi-tier RF venue planning.
//!
//! Transmitter sites are placed per tier (explicit lists, evenly spaced lines,
//! or a lattice scan topped up by seeded random fill) outside exclusion zones.
//! Each tier is evaluated into a best-server grid under a close-in path-loss
//! model, and tiers are merged by power superposition in the linear domain.

pub mod coverage;
pub mod math;
pub mod placement;
pub mod prelude;
pub mod propagation;
pub mod scenario;
pub mod telemetry;

pub use prelude::{
    Coordinate, CoverageError, CoverageResult, GridShape, PropagationModel,
};
