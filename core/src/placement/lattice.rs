use crate::prelude::{Coordinate, CoverageError, CoverageResult};

/// Regular candidate scan in raster order: rows top to bottom, each row
/// left to right. Positions are `start + k * step` per axis, strictly below
/// `end` (exclusive, like an integer range).
#[derive(Debug, Clone)]
pub struct LatticeScan {
    start: Coordinate,
    step: (f64, f64),
    end: Coordinate,
    row: usize,
    col: usize,
}

impl LatticeScan {
    pub fn new(start: Coordinate, step: (f64, f64), end: Coordinate) -> CoverageResult<Self> {
        let (step_x, step_y) = step;
        if !(step_x.is_finite() && step_x > 0.0 && step_y.is_finite() && step_y > 0.0) {
            return Err(CoverageError::InvalidPlacement(format!(
                "lattice step must be positive, got ({}, {})",
                step_x, step_y
            )));
        }
        Ok(Self {
            start,
            step,
            end,
            row: 0,
            col: 0,
        })
    }
}

impl Iterator for LatticeScan {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        loop {
            let y = self.start.y + self.row as f64 * self.step.1;
            if y >= self.end.y {
                return None;
            }
            let x = self.start.x + self.col as f64 * self.step.0;
            if x < self.end.x {
                self.col += 1;
                return Some(Coordinate::new(x, y));
            }
            if self.col == 0 {
                // empty rows: start.x is already past end.x
                return None;
            }
            self.col = 0;
            self.row += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(start: (f64, f64), step: (f64, f64), end: (f64, f64)) -> Vec<(f64, f64)> {
        LatticeScan::new(start.into(), step, end.into())
            .unwrap()
            .map(Into::into)
            .collect()
    }

    #[test]
    fn scan_is_row_major() {
        let points = scan((0.0, 0.0), (10.0, 5.0), (30.0, 10.0));
        assert_eq!(
            points,
            vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (20.0, 0.0),
                (0.0, 5.0),
                (10.0, 5.0),
                (20.0, 5.0)
            ]
        );
    }

    #[test]
    fn end_bound_is_exclusive() {
        let points = scan((60.0, 60.0), (50.0, 40.0), (560.0, 140.0));
        assert_eq!(points.len(), 10 * 2);
        assert_eq!(points.last(), Some(&(510.0, 100.0)));
    }

    #[test]
    fn start_past_end_yields_nothing() {
        assert!(scan((100.0, 0.0), (10.0, 10.0), (50.0, 50.0)).is_empty());
        assert!(scan((0.0, 100.0), (10.0, 10.0), (50.0, 50.0)).is_empty());
    }

    #[test]
    fn rejects_non_positive_step() {
        let result = LatticeScan::new(Coordinate::default(), (0.0, 5.0), Coordinate::new(10.0, 10.0));
        assert!(matches!(result, Err(CoverageError::InvalidPlacement(_))));
    }
}
