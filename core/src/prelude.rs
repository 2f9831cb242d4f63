use serde::{Deserialize, Serialize};

/// Planar position in pixel units, shared by transmitters and grid cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.x, coordinate.y)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
}

impl GridShape {
    pub fn new(width: usize, height: usize) -> CoverageResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoverageError::ZeroSizedGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Common error type for the coverage core.
#[derive(thiserror::Error, Debug)]
pub enum CoverageError {
    #[error("invalid propagation parameters: {0}")]
    InvalidParameters(String),
    #[error("grid must have positive dimensions, got {width}x{height}")]
    ZeroSizedGrid { width: usize, height: usize },
    #[error("grid shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: GridShape, found: GridShape },
    #[error("no coverage layers to combine")]
    NoLayers,
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),
    #[error("tier {tier}: placed {placed} of {target} nodes ({} could not be placed)", .target - .placed)]
    PlacementExhausted {
        tier: String,
        placed: usize,
        target: usize,
    },
    #[error("invalid scenario: {0}")]
    Config(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type CoverageResult<T> = Result<T, CoverageError>;

/// Distance-to-power mapping evaluated for every grid cell.
pub trait PropagationModel: Sync {
    /// Received power in dBm at `distance` pixels from the transmitter.
    fn received_power_dbm(&self, distance: f64) -> f64;
}
