use crate::coverage::grid::CoverageGrid;
use crate::math::power::{dbm_to_mw, mw_to_dbm};
use crate::prelude::{CoverageError, CoverageResult, GridShape};
use crate::telemetry::log::LogManager;
use rayon::prelude::*;

/// Merges independently computed tier grids.
///
/// Two operators:
/// - [`LayerCombiner::combine`]: power superposition, summed in milliwatts
/// - [`LayerCombiner::best_server`]: elementwise maximum in dBm
pub struct LayerCombiner {
    logger: LogManager,
}

impl LayerCombiner {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("combiner"),
        }
    }

    /// `10 * log10(sum(10^(dBm / 10)))` per cell. Floor cells contribute
    /// their (tiny) linear power like any other value.
    pub fn combine(&self, grids: &[CoverageGrid]) -> CoverageResult<CoverageGrid> {
        let shape = common_shape(grids)?;
        if let [single] = grids {
            return Ok(single.clone());
        }
        let views: Vec<_> = grids.iter().map(CoverageGrid::view).collect();
        let mut values = vec![0.0; shape.cell_count()];
        values
            .par_chunks_mut(shape.width)
            .enumerate()
            .for_each(|(y, row)| {
                let mut terms = vec![0.0; views.len()];
                for (x, cell) in row.iter_mut().enumerate() {
                    for (term, view) in terms.iter_mut().zip(&views) {
                        *term = dbm_to_mw(view[(y, x)]);
                    }
                    // summed in sorted order, independent of layer order
                    terms.sort_by(f64::total_cmp);
                    *cell = mw_to_dbm(terms.iter().sum());
                }
            });
        self.logger
            .detail(&format!("combined {} layers over {} grid", grids.len(), shape));
        CoverageGrid::from_row_major(shape, values)
    }

    /// Elementwise maximum across grids.
    pub fn best_server(&self, grids: &[CoverageGrid]) -> CoverageResult<CoverageGrid> {
        let shape = common_shape(grids)?;
        let views: Vec<_> = grids.iter().map(CoverageGrid::view).collect();
        let mut values = vec![f64::NEG_INFINITY; shape.cell_count()];
        values
            .par_chunks_mut(shape.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = views
                        .iter()
                        .fold(f64::NEG_INFINITY, |best, view| best.max(view[(y, x)]));
                }
            });
        CoverageGrid::from_row_major(shape, values)
    }
}

impl Default for LayerCombiner {
    fn default() -> Self {
        Self::new()
    }
}

fn common_shape(grids: &[CoverageGrid]) -> CoverageResult<GridShape> {
    let first = grids.first().ok_or(CoverageError::NoLayers)?;
    let expected = first.shape();
    for grid in &grids[1..] {
        let found = grid.shape();
        if found != expected {
            return Err(CoverageError::ShapeMismatch { expected, found });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::grid::FLOOR_DBM;

    fn grid(width: usize, height: usize, values: Vec<f64>) -> CoverageGrid {
        CoverageGrid::from_row_major(GridShape::new(width, height).unwrap(), values).unwrap()
    }

    fn sample_layers() -> Vec<CoverageGrid> {
        vec![
            grid(3, 2, vec![-60.0, -70.0, -150.0, -95.5, -80.0, -150.0]),
            grid(3, 2, vec![-60.0, -90.0, -150.0, -40.25, -120.0, -65.0]),
            grid(3, 2, vec![-75.0, -71.0, -150.0, -100.0, -81.0, -150.0]),
        ]
    }

    #[test]
    fn single_layer_is_identity() {
        let layers = sample_layers();
        let combined = LayerCombiner::new().combine(&layers[..1]).unwrap();
        assert_eq!(combined, layers[0]);
    }

    #[test]
    fn equal_layers_add_three_db() {
        let a = grid(2, 1, vec![-60.0, -80.0]);
        let combined = LayerCombiner::new().combine(&[a.clone(), a]).unwrap();
        let expected = 10.0 * 2f64.log10();
        assert!((combined.get(0, 0).unwrap() - (-60.0 + expected)).abs() < 1e-9);
        assert!((combined.get(1, 0).unwrap() - (-80.0 + expected)).abs() < 1e-9);
    }

    #[test]
    fn floor_layers_combine_above_the_floor() {
        let floor = CoverageGrid::filled(GridShape::new(5, 4).unwrap(), FLOOR_DBM);
        let combined = LayerCombiner::new().combine(&[floor.clone(), floor]).unwrap();
        for value in combined.to_row_major() {
            assert!((value - (-146.99)).abs() < 0.01);
        }
    }

    #[test]
    fn combined_power_dominates_every_layer() {
        let layers = sample_layers();
        let combined = LayerCombiner::new().combine(&layers).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let strongest = layers
                    .iter()
                    .map(|g| g.get(x, y).unwrap())
                    .fold(f64::NEG_INFINITY, f64::max);
                assert!(combined.get(x, y).unwrap() >= strongest - 1e-9);
            }
        }
    }

    #[test]
    fn layer_order_does_not_matter() {
        let layers = sample_layers();
        let combiner = LayerCombiner::new();
        let reference = combiner.combine(&layers).unwrap();
        let mut reversed = layers.clone();
        reversed.reverse();
        let mut rotated = layers.clone();
        rotated.rotate_left(1);
        assert_eq!(reference, combiner.combine(&reversed).unwrap());
        assert_eq!(reference, combiner.combine(&rotated).unwrap());
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let result = LayerCombiner::new().combine(&[grid(2, 1, vec![0.0; 2]), grid(1, 2, vec![0.0; 2])]);
        match result {
            Err(CoverageError::ShapeMismatch { expected, found }) => {
                assert_eq!(expected, GridShape { width: 2, height: 1 });
                assert_eq!(found, GridShape { width: 1, height: 2 });
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            LayerCombiner::new().combine(&[]),
            Err(CoverageError::NoLayers)
        ));
        assert!(matches!(
            LayerCombiner::new().best_server(&[]),
            Err(CoverageError::NoLayers)
        ));
    }

    #[test]
    fn best_server_takes_the_maximum_without_summing() {
        let layers = sample_layers();
        let best = LayerCombiner::new().best_server(&layers).unwrap();
        assert_eq!(best.get(0, 0), Some(-60.0));
        assert_eq!(best.get(0, 1), Some(-40.25));
        assert_eq!(best.get(2, 0), Some(-150.0));
    }
}
