use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::{Result, SetupError};

/// Cell-center coordinates and areas of an unstructured mesh.
/// Flat per-cell arrays sharing one cell ordering.
#[derive(Clone, Debug)]
pub struct CellGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub area: Vec<f64>,
}

/// Result of a nearest-cell lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestCell {
    pub index: usize,
    pub distance: f64,
}

impl CellGrid {
    pub fn new(x: Vec<f64>, y: Vec<f64>, area: Vec<f64>) -> Result<Self> {
        let n = x.len();
        if n == 0 {
            return Err(SetupError::EmptyGrid);
        }
        for (name, len) in [("yCell", y.len()), ("areaCell", area.len())] {
            if len != n {
                return Err(SetupError::CellCount {
                    name: name.to_string(),
                    len,
                    cells: n,
                });
            }
        }
        Ok(Self { x, y, area })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Brute-force nearest cell center to (x, y).
    /// Equal distances resolve to the lowest cell index.
    pub fn nearest(&self, x: f64, y: f64) -> NearestCell {
        let (index, distance) = self
            .x
            .par_iter()
            .zip(self.y.par_iter())
            .enumerate()
            .map(|(i, (&cx, &cy))| {
                let dx = x - cx;
                let dy = y - cy;
                (i, (dx * dx + dy * dy).sqrt())
            })
            .min_by(|a, b| match a.1.total_cmp(&b.1) {
                Ordering::Equal => a.0.cmp(&b.0),
                ord => ord,
            })
            .unwrap_or((0, f64::INFINITY));
        NearestCell { index, distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_cells() -> CellGrid {
        CellGrid::new(
            vec![0.0, 100.0, 0.0],
            vec![0.0, 0.0, 100.0],
            vec![1.0e4; 3],
        )
        .unwrap()
    }

    #[test]
    fn nearest_picks_closest_center() {
        let grid = three_cells();
        let hit = grid.nearest(10.0, 0.0);
        assert_eq!(hit.index, 0);
        assert!((hit.distance - 10.0).abs() < 1e-12);

        assert_eq!(grid.nearest(90.0, 5.0).index, 1);
        assert_eq!(grid.nearest(-3.0, 80.0).index, 2);
    }

    #[test]
    fn exact_hit_has_zero_distance() {
        let hit = three_cells().nearest(100.0, 0.0);
        assert_eq!(hit.index, 1);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        // (100, 100) is equidistant from cells 1 and 2
        let hit = three_cells().nearest(100.0, 100.0);
        assert_eq!(hit.index, 1);
        assert_eq!(three_cells().nearest(50.0, 50.0).index, 0);

        let grid = CellGrid::new(vec![5.0; 64], vec![5.0; 64], vec![1.0; 64]).unwrap();
        assert_eq!(grid.nearest(0.0, 0.0).index, 0);
    }

    #[test]
    fn mismatched_arrays_rejected() {
        let err = CellGrid::new(vec![0.0, 1.0], vec![0.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, SetupError::CellCount { len: 1, cells: 2, .. }));

        let err = CellGrid::new(vec![0.0], vec![0.0], vec![]).unwrap_err();
        assert!(matches!(err, SetupError::CellCount { len: 0, cells: 1, .. }));
    }

    #[test]
    fn empty_grid_rejected() {
        let err = CellGrid::new(vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, SetupError::EmptyGrid));
    }
}
