use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, SetupError};
use crate::grid::CellGrid;
use crate::presets::Moulin;

/// Where one moulin landed on the mesh.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub id: u16,
    pub x: f64,
    pub y: f64,
    pub q: f64,
    pub cell: usize,
    pub cell_x: f64,
    pub cell_y: f64,
    pub distance: f64,
    /// Contribution added to the cell, kg m^-2 s^-1.
    pub flux: f64,
}

/// Overwrite the background melt slice with a uniform flux.
pub fn apply_background_melt(melt: &mut [f64], flux: f64) {
    melt.fill(flux);
}

/// Zero the discharge slice, then add each moulin's discharge to its nearest
/// cell as an areal mass flux (`q * water_density / area`).
/// Moulins that share a nearest cell accumulate.
pub fn apply_moulin_discharge(
    grid: &CellGrid,
    moulins: &[Moulin],
    water_density: f64,
    discharge: &mut [f64],
) -> Result<Vec<Placement>> {
    if discharge.len() != grid.len() {
        return Err(SetupError::CellCount {
            name: "discharge".to_string(),
            len: discharge.len(),
            cells: grid.len(),
        });
    }

    discharge.fill(0.0);
    let mut placements = Vec::with_capacity(moulins.len());

    for m in moulins {
        let hit = grid.nearest(m.x, m.y);
        let cell = hit.index;
        let area = grid.area[cell];
        if area.is_nan() || area <= 0.0 {
            return Err(SetupError::DegenerateCell { cell, area });
        }
        let flux = m.q * water_density / area;
        discharge[cell] += flux;

        info!(
            "Moulin {}: x={}, y={}; xCell={}, yCell={}, dist={:.3}",
            m.id, m.x, m.y, grid.x[cell], grid.y[cell], hit.distance
        );

        placements.push(Placement {
            id: m.id,
            x: m.x,
            y: m.y,
            q: m.q,
            cell,
            cell_x: grid.x[cell],
            cell_y: grid.y[cell],
            distance: hit.distance,
            flux,
        });
    }

    for (cell, ids) in shared_cells(&placements) {
        warn!("moulins {:?} all map to cell {}; mesh does not resolve them individually", ids, cell);
    }

    Ok(placements)
}

/// Cells that received more than one moulin, with the ids that landed there.
pub fn shared_cells(placements: &[Placement]) -> Vec<(usize, Vec<u16>)> {
    let mut by_cell: Vec<(usize, Vec<u16>)> = Vec::new();
    for p in placements {
        match by_cell.iter_mut().find(|(c, _)| *c == p.cell) {
            Some((_, ids)) => ids.push(p.id),
            None => by_cell.push((p.cell, vec![p.id])),
        }
    }
    by_cell.retain(|(_, ids)| ids.len() > 1);
    by_cell.sort_by_key(|(c, _)| *c);
    by_cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::select_variant;

    fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    fn moulin(id: u16, x: f64, y: f64, q: f64) -> Moulin {
        Moulin { id, x, y, q }
    }

    fn three_cells(area: f64) -> CellGrid {
        CellGrid::new(vec![0.0, 100.0, 0.0], vec![0.0, 0.0, 100.0], vec![area; 3]).unwrap()
    }

    /// Regular 1 km mesh over the experiment B domain (100 km x 20 km).
    fn shmip_mesh() -> CellGrid {
        let (mut x, mut y) = (Vec::new(), Vec::new());
        for j in 0..=20 {
            for i in 0..=100 {
                x.push(i as f64 * 1000.0);
                y.push(j as f64 * 1000.0);
            }
        }
        let n = x.len();
        CellGrid::new(x, y, vec![1.0e6; n]).unwrap()
    }

    #[test]
    fn point_goes_to_nearest_cell() {
        let grid = three_cells(2500.0);
        let mut field = vec![0.0; 3];
        let placed =
            apply_moulin_discharge(&grid, &[moulin(0, 10.0, 0.0, 5.0)], 1000.0, &mut field).unwrap();

        assert_eq!(placed[0].cell, 0);
        assert_approx(placed[0].distance, 10.0, 1e-12);
        assert_approx(field[0], 5.0 * 1000.0 / 2500.0, 1e-12);
        assert_eq!(field[1], 0.0);
        assert_eq!(field[2], 0.0);
    }

    #[test]
    fn single_moulin_on_cell_center() {
        let grid = shmip_mesh();
        let moulins = select_variant(1).unwrap();
        let mut field = vec![0.0; grid.len()];
        let placed = apply_moulin_discharge(&grid, moulins, 1000.0, &mut field).unwrap();

        let cell = placed[0].cell;
        assert_eq!((grid.x[cell], grid.y[cell]), (59000.0, 8000.0));
        assert_eq!(placed[0].distance, 0.0);
        assert_approx(field[cell], 90.0 * 1000.0 / grid.area[cell], 1e-15);
        assert_eq!(field.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn shared_cell_accumulates() {
        let grid = three_cells(4000.0);
        let moulins = [moulin(0, 90.0, 3.0, 2.0), moulin(1, 95.0, -4.0, 6.0)];
        let mut field = vec![0.0; 3];
        let placed = apply_moulin_discharge(&grid, &moulins, 1000.0, &mut field).unwrap();

        assert!(placed.iter().all(|p| p.cell == 1));
        assert_approx(field[1], (2.0 + 6.0) * 1000.0 / 4000.0, 1e-12);
        assert_eq!(shared_cells(&placed), vec![(1, vec![0, 1])]);
    }

    #[test]
    fn prior_content_is_discarded() {
        let grid = three_cells(1000.0);
        let mut field = vec![7.0, 8.0, 9.0];
        apply_moulin_discharge(&grid, &[moulin(0, 0.0, 90.0, 1.0)], 1000.0, &mut field).unwrap();
        assert_eq!(field, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let grid = shmip_mesh();
        let moulins = select_variant(5).unwrap();
        let mut field = vec![0.0; grid.len()];

        apply_moulin_discharge(&grid, moulins, 1000.0, &mut field).unwrap();
        let first = field.clone();
        apply_moulin_discharge(&grid, moulins, 1000.0, &mut field).unwrap();
        assert_eq!(first, field);
    }

    #[test]
    fn mass_is_conserved_on_uniform_mesh() {
        let grid = shmip_mesh();
        for n in 1..=5 {
            let mut field = vec![0.0; grid.len()];
            apply_moulin_discharge(&grid, select_variant(n).unwrap(), 1000.0, &mut field).unwrap();
            let mass: f64 = field.iter().zip(&grid.area).map(|(f, a)| f * a).sum();
            assert_approx(mass, 90.0 * 1000.0, 1e-6);
        }
    }

    #[test]
    fn degenerate_area_is_an_error() {
        let grid = CellGrid::new(vec![0.0, 10.0], vec![0.0, 0.0], vec![1.0, 0.0]).unwrap();
        let mut field = vec![0.0; 2];
        let err = apply_moulin_discharge(&grid, &[moulin(0, 9.0, 0.0, 1.0)], 1000.0, &mut field)
            .unwrap_err();
        assert!(matches!(err, SetupError::DegenerateCell { cell: 1, .. }));
    }

    #[test]
    fn field_length_must_match_grid() {
        let grid = three_cells(1.0);
        let mut field = vec![0.0; 2];
        assert!(apply_moulin_discharge(&grid, &[], 1000.0, &mut field).is_err());
    }

    #[test]
    fn background_melt_overwrites() {
        let mut melt = vec![1.0, -2.0, 3.5];
        apply_background_melt(&mut melt, 7.93e-11 * 1000.0);
        assert!(melt.iter().all(|&v| v == 7.93e-11 * 1000.0));
    }
}
