pub mod generator;
pub mod lattice;
pub mod random_fill;
pub mod zones;

pub use generator::{
    GeneratedSpec, LineSpec, PlacementGenerator, PlacementSource, RealizedPlacement,
};
pub use lattice::LatticeScan;
pub use random_fill::{FillOutcome, RandomFill};
pub use zones::{ExclusionZone, ExclusionZoneSet};
