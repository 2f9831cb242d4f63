use crate::placement::zones::ExclusionZoneSet;
use crate::prelude::{Coordinate, CoverageError, CoverageResult, GridShape};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::Range;

/// Outcome of a bounded fill run.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    pub extras: Vec<Coordinate>,
    pub attempts: usize,
}

/// Seeded first-fit random placement with a minimum spacing constraint.
///
/// Draws integer pixel positions uniformly inside the area shrunk by
/// `margin` on every side.
pub struct RandomFill {
    rng: StdRng,
    x_range: Range<i64>,
    y_range: Range<i64>,
    min_separation: f64,
    max_attempts: usize,
}

impl RandomFill {
    pub fn new(
        shape: GridShape,
        margin: f64,
        seed: u64,
        min_separation: f64,
        max_attempts: usize,
    ) -> CoverageResult<Self> {
        let x_range = draw_range(shape.width, margin);
        let y_range = draw_range(shape.height, margin);
        if x_range.is_empty() || y_range.is_empty() {
            return Err(CoverageError::InvalidPlacement(format!(
                "random margin {} leaves no drawable area in a {} grid",
                margin, shape
            )));
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            x_range,
            y_range,
            min_separation,
            max_attempts,
        })
    }

    /// Draws until `needed` extra sites are accepted or the attempt budget is
    /// spent. `accepted` holds every site already placed for the tier.
    pub fn fill(
        &mut self,
        zones: &ExclusionZoneSet,
        accepted: &[Coordinate],
        needed: usize,
    ) -> FillOutcome {
        let mut extras: Vec<Coordinate> = Vec::with_capacity(needed);
        let mut attempts = 0;
        while extras.len() < needed && attempts < self.max_attempts {
            attempts += 1;
            let candidate = Coordinate::new(
                self.rng.gen_range(self.x_range.clone()) as f64,
                self.rng.gen_range(self.y_range.clone()) as f64,
            );
            if !zones.is_allowed(&candidate) {
                continue;
            }
            if is_separated(&candidate, accepted.iter().chain(extras.iter()), self.min_separation) {
                extras.push(candidate);
            }
        }
        FillOutcome { extras, attempts }
    }
}

pub(crate) fn is_separated<'a>(
    candidate: &Coordinate,
    mut others: impl Iterator<Item = &'a Coordinate>,
    min_separation: f64,
) -> bool {
    others.all(|other| candidate.distance(other) >= min_separation)
}

fn draw_range(extent: usize, margin: f64) -> Range<i64> {
    let margin = margin.max(0.0);
    let low = margin.ceil() as i64;
    let high = (extent as f64 - margin).floor() as i64;
    low..high
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::zones::ExclusionZone;

    fn shape() -> GridShape {
        GridShape::new(200, 120).unwrap()
    }

    #[test]
    fn fill_is_reproducible_for_a_seed() {
        let zones = ExclusionZoneSet::new(vec![ExclusionZone::new(50.0, 30.0, 150.0, 90.0)]);
        let run = || {
            RandomFill::new(shape(), 10.0, 99, 15.0, 10_000)
                .unwrap()
                .fill(&zones, &[], 12)
                .extras
        };
        let first = run();
        assert_eq!(first.len(), 12);
        assert_eq!(first, run());
    }

    #[test]
    fn different_seeds_diverge() {
        let zones = ExclusionZoneSet::default();
        let a = RandomFill::new(shape(), 0.0, 1, 5.0, 1_000).unwrap().fill(&zones, &[], 8);
        let b = RandomFill::new(shape(), 0.0, 2, 5.0, 1_000).unwrap().fill(&zones, &[], 8);
        assert_ne!(a.extras, b.extras);
    }

    #[test]
    fn accepted_sites_respect_zones_margin_and_spacing() {
        let zones = ExclusionZoneSet::new(vec![ExclusionZone::new(0.0, 0.0, 100.0, 120.0)]);
        let existing = [Coordinate::new(150.0, 60.0)];
        let outcome = RandomFill::new(shape(), 20.0, 7, 12.0, 50_000)
            .unwrap()
            .fill(&zones, &existing, 10);
        for (i, site) in outcome.extras.iter().enumerate() {
            assert!(zones.is_allowed(site));
            assert!(site.x >= 20.0 && site.x < 180.0);
            assert!(site.y >= 20.0 && site.y < 100.0);
            assert!(site.distance(&existing[0]) >= 12.0);
            for other in &outcome.extras[..i] {
                assert!(site.distance(other) >= 12.0);
            }
        }
    }

    #[test]
    fn attempts_are_bounded() {
        // everything forbidden: the loop must stop at the budget
        let zones = ExclusionZoneSet::new(vec![ExclusionZone::new(0.0, 0.0, 200.0, 120.0)]);
        let outcome = RandomFill::new(shape(), 0.0, 3, 1.0, 500)
            .unwrap()
            .fill(&zones, &[], 4);
        assert!(outcome.extras.is_empty());
        assert_eq!(outcome.attempts, 500);
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let result = RandomFill::new(shape(), 60.0, 0, 1.0, 10);
        assert!(matches!(result, Err(CoverageError::InvalidPlacement(_))));
    }
}
