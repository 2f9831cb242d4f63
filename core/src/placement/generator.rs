//! Transmitter site realization for one tier.
//!
//! A tier lists one or more placement sources that are realized in order into
//! a single accepted set:
//! - `literal`: explicit coordinates, forbidden ones dropped silently
//! - `line`: evenly spaced points between two endpoints
//! - `generated`: lattice scan, then seeded random fill up to a target count
//!
//! Acceptance order is stable so generated fixtures are reproducible.

use crate::placement::lattice::LatticeScan;
use crate::placement::random_fill::{is_separated, RandomFill};
use crate::placement::zones::ExclusionZoneSet;
use crate::prelude::{Coordinate, CoverageError, CoverageResult, GridShape};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementSource {
    Literal {
        points: Vec<Coordinate>,
        /// Greedy first-fit thinning against sites accepted so far.
        #[serde(default)]
        min_separation: f64,
    },
    Line(LineSpec),
    Generated(GeneratedSpec),
}

/// `count` points from `start` to `end` inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub start: Coordinate,
    pub end: Coordinate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSpec {
    #[serde(default)]
    pub start: Coordinate,
    pub step: (f64, f64),
    /// Exclusive lattice bound; the grid extent when absent.
    #[serde(default)]
    pub end: Option<Coordinate>,
    /// Without a target the lattice alone defines the set.
    #[serde(default)]
    pub target_count: Option<usize>,
    #[serde(default)]
    pub min_separation: f64,
    #[serde(default)]
    pub random_seed: u64,
    #[serde(default)]
    pub random_margin: f64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Apply `min_separation` to lattice candidates as well.
    #[serde(default)]
    pub separate_lattice: bool,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl PlacementSource {
    pub fn literal(points: Vec<Coordinate>) -> Self {
        PlacementSource::Literal {
            points,
            min_separation: 0.0,
        }
    }
}

impl GeneratedSpec {
    pub fn lattice(start: Coordinate, step: (f64, f64)) -> Self {
        Self {
            start,
            step,
            end: None,
            target_count: None,
            min_separation: 0.0,
            random_seed: 0,
            random_margin: 0.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            separate_lattice: false,
        }
    }
}

/// Realized sites of one tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealizedPlacement {
    pub coordinates: Vec<Coordinate>,
    /// Candidates dropped by zones or spacing, random draws included.
    pub rejected: usize,
}

pub struct PlacementGenerator {
    shape: GridShape,
    zones: ExclusionZoneSet,
    logger: LogManager,
}

impl PlacementGenerator {
    pub fn new(shape: GridShape, zones: ExclusionZoneSet) -> Self {
        Self {
            shape,
            zones,
            logger: LogManager::new("placement"),
        }
    }

    pub fn zones(&self) -> &ExclusionZoneSet {
        &self.zones
    }

    pub fn literal(&self, points: &[Coordinate]) -> Vec<Coordinate> {
        points
            .iter()
            .copied()
            .filter(|point| self.zones.is_allowed(point))
            .collect()
    }

    pub fn line(&self, spec: &LineSpec) -> Vec<Coordinate> {
        let points = linspace(spec.start, spec.end, spec.count);
        self.literal(&points)
    }

    /// Lattice scan followed by random fill. `accepted` holds the sites the
    /// tier already owns; they count for spacing but not toward the target.
    pub fn generated(
        &self,
        tier: &str,
        spec: &GeneratedSpec,
        accepted: &[Coordinate],
    ) -> CoverageResult<RealizedPlacement> {
        let end = spec.end.unwrap_or_else(|| {
            Coordinate::new(self.shape.width as f64, self.shape.height as f64)
        });
        let target = spec.target_count.unwrap_or(usize::MAX);

        let mut placed: Vec<Coordinate> = Vec::new();
        let mut rejected = 0;
        for candidate in LatticeScan::new(spec.start, spec.step, end)? {
            if placed.len() >= target {
                break;
            }
            let spaced = !spec.separate_lattice
                || is_separated(
                    &candidate,
                    accepted.iter().chain(placed.iter()),
                    spec.min_separation,
                );
            if self.zones.is_allowed(&candidate) && spaced {
                placed.push(candidate);
            } else {
                rejected += 1;
            }
        }

        let Some(target) = spec.target_count else {
            return Ok(RealizedPlacement {
                coordinates: placed,
                rejected,
            });
        };
        if placed.len() >= target {
            return Ok(RealizedPlacement {
                coordinates: placed,
                rejected,
            });
        }

        let missing = target - placed.len();
        self.logger.detail(&format!(
            "tier {}: lattice yielded {} of {}, filling {} at random",
            tier,
            placed.len(),
            target,
            missing
        ));
        let mut fill = RandomFill::new(
            self.shape,
            spec.random_margin,
            spec.random_seed,
            spec.min_separation,
            spec.max_attempts,
        )?;
        let existing: Vec<Coordinate> = accepted.iter().chain(placed.iter()).copied().collect();
        let outcome = fill.fill(&self.zones, &existing, missing);
        rejected += outcome.attempts - outcome.extras.len();
        placed.extend(outcome.extras);

        if placed.len() < target {
            self.logger.warning(&format!(
                "tier {}: random fill gave up after {} attempts",
                tier, outcome.attempts
            ));
            return Err(CoverageError::PlacementExhausted {
                tier: tier.to_string(),
                placed: placed.len(),
                target,
            });
        }
        Ok(RealizedPlacement {
            coordinates: placed,
            rejected,
        })
    }

    /// Realizes every source in order, then truncates to `max_nodes`.
    pub fn realize(
        &self,
        tier: &str,
        sources: &[PlacementSource],
        max_nodes: Option<usize>,
    ) -> CoverageResult<RealizedPlacement> {
        let mut realized = RealizedPlacement::default();
        for source in sources {
            match source {
                PlacementSource::Literal {
                    points,
                    min_separation,
                } => {
                    let mut kept = 0;
                    for point in self.literal(points) {
                        if is_separated(&point, realized.coordinates.iter(), *min_separation) {
                            realized.coordinates.push(point);
                            kept += 1;
                        }
                    }
                    realized.rejected += points.len() - kept;
                }
                PlacementSource::Line(spec) => {
                    let kept = self.line(spec);
                    realized.rejected += spec.count - kept.len();
                    realized.coordinates.extend(kept);
                }
                PlacementSource::Generated(spec) => {
                    let generated = self.generated(tier, spec, &realized.coordinates)?;
                    realized.rejected += generated.rejected;
                    realized.coordinates.extend(generated.coordinates);
                }
            }
        }
        if let Some(cap) = max_nodes {
            realized.coordinates.truncate(cap);
        }
        self.logger.record(&format!(
            "tier {}: {} sites placed, {} candidates rejected",
            tier,
            realized.coordinates.len(),
            realized.rejected
        ));
        Ok(realized)
    }
}

fn linspace(start: Coordinate, end: Coordinate, count: usize) -> Vec<Coordinate> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let t = i as f64 / span;
                    Coordinate::new(
                        start.x + (end.x - start.x) * t,
                        start.y + (end.y - start.y) * t,
                    )
                })
                .collect()
        }
    }
}
