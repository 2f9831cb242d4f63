use crate::coverage::grid::CoverageGrid;
use crate::prelude::{Coordinate, CoverageResult, GridShape, PropagationModel};
use crate::telemetry::log::LogManager;
use rayon::prelude::*;

/// Best-server evaluation of one tier: every cell keeps the strongest
/// received power over the tier's transmitters, never a sum.
pub struct TierEvaluator {
    shape: GridShape,
    floor_dbm: f64,
    logger: LogManager,
}

impl TierEvaluator {
    pub fn new(shape: GridShape, floor_dbm: f64) -> Self {
        Self {
            shape,
            floor_dbm,
            logger: LogManager::new("tier"),
        }
    }

    /// Cells are evaluated at their integer index; rows are split across the
    /// rayon pool and each row is owned by exactly one task.
    pub fn evaluate<M: PropagationModel>(
        &self,
        transmitters: &[Coordinate],
        model: &M,
    ) -> CoverageResult<CoverageGrid> {
        let width = self.shape.width;
        let floor = self.floor_dbm;
        let mut values = vec![floor; self.shape.cell_count()];

        values
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let position = Coordinate::new(x as f64, y as f64);
                    *cell = transmitters.iter().fold(floor, |best, tx| {
                        best.max(model.received_power_dbm(position.distance(tx)))
                    });
                }
            });

        self.logger.detail(&format!(
            "evaluated {} transmitters over {} grid",
            transmitters.len(),
            self.shape
        ));
        CoverageGrid::from_row_major(self.shape, values)
    }
}

/// Convenience wrapper over [`TierEvaluator`].
pub fn compute_tier<M: PropagationModel>(
    transmitters: &[Coordinate],
    model: &M,
    shape: GridShape,
    floor_dbm: f64,
) -> CoverageResult<CoverageGrid> {
    TierEvaluator::new(shape, floor_dbm).evaluate(transmitters, model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::grid::FLOOR_DBM;
    use crate::propagation::{CloseInModel, PropagationParameters};

    fn model() -> CloseInModel {
        CloseInModel::new(PropagationParameters {
            frequency_hz: 3.5e9,
            reference_distance: 1.0,
            path_loss_exponent: 3.2,
            transmit_power_dbm: 33.0,
        })
        .unwrap()
    }

    fn shape() -> GridShape {
        GridShape::new(40, 25).unwrap()
    }

    #[test]
    fn no_transmitters_leaves_the_floor() {
        let grid = compute_tier(&[], &model(), shape(), FLOOR_DBM).unwrap();
        assert!(grid.to_row_major().iter().all(|&v| v == FLOOR_DBM));
    }

    #[test]
    fn single_transmitter_matches_the_model() {
        let m = model();
        let tx = Coordinate::new(10.0, 5.0);
        let grid = compute_tier(&[tx], &m, shape(), FLOOR_DBM).unwrap();
        assert_eq!(grid.get(10, 5), Some(33.0 - m.reference_loss_db()));
        let expected = m.received_power_dbm(Coordinate::new(30.0, 20.0).distance(&tx));
        assert_eq!(grid.get(30, 20), Some(expected));
    }

    #[test]
    fn cells_take_the_strongest_transmitter() {
        let m = model();
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(39.0, 24.0);
        let grid = compute_tier(&[a, b], &m, shape(), FLOOR_DBM).unwrap();
        let solo_a = compute_tier(&[a], &m, shape(), FLOOR_DBM).unwrap();
        let solo_b = compute_tier(&[b], &m, shape(), FLOOR_DBM).unwrap();
        for y in 0..25 {
            for x in 0..40 {
                let best = solo_a.get(x, y).unwrap().max(solo_b.get(x, y).unwrap());
                assert_eq!(grid.get(x, y), Some(best));
            }
        }
    }

    #[test]
    fn transmitter_order_does_not_matter() {
        let m = model();
        let sites = vec![
            Coordinate::new(3.0, 4.0),
            Coordinate::new(20.5, 11.0),
            Coordinate::new(38.0, 2.0),
            Coordinate::new(12.0, 22.0),
        ];
        let mut reversed = sites.clone();
        reversed.reverse();
        let mut rotated = sites.clone();
        rotated.rotate_left(1);
        let reference = compute_tier(&sites, &m, shape(), FLOOR_DBM).unwrap();
        assert_eq!(reference, compute_tier(&reversed, &m, shape(), FLOOR_DBM).unwrap());
        assert_eq!(reference, compute_tier(&rotated, &m, shape(), FLOOR_DBM).unwrap());
    }

    #[test]
    fn weak_signals_are_clamped_to_the_floor() {
        let weak = CloseInModel::new(PropagationParameters {
            transmit_power_dbm: -140.0,
            ..*model().params()
        })
        .unwrap();
        let grid = compute_tier(&[Coordinate::new(0.0, 0.0)], &weak, shape(), FLOOR_DBM).unwrap();
        assert!(grid.to_row_major().iter().all(|&v| v == FLOOR_DBM));
    }
}
