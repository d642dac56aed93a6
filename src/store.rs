use std::collections::HashMap;

use crate::config::Params;
use crate::error::{Result, SetupError};
use crate::grid::CellGrid;

/// Named per-cell fields of a mesh state file.
///
/// Time-dependent fields are addressed by `[time, cell]`; `read_slice` and
/// `write_slice` move a whole cell row for one time record.
pub trait GridStore {
    fn cells(&self, params: &Params) -> Result<CellGrid>;
    fn read_slice(&self, name: &str, time: usize) -> Result<Vec<f64>>;
    fn write_slice(&mut self, name: &str, time: usize, values: &[f64]) -> Result<()>;
}

/// Grid state held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryGrid {
    pub coords: HashMap<String, Vec<f64>>,
    pub fields: HashMap<String, Vec<Vec<f64>>>,
}

impl MemoryGrid {
    /// Mesh with the given cell centers and areas, plus zeroed `[1, cell]`
    /// discharge and melt fields.
    pub fn new(x: Vec<f64>, y: Vec<f64>, area: Vec<f64>, params: &Params) -> Self {
        let n = x.len();
        let mut grid = Self::default();
        grid.coords.insert(params.x_cell.to_string(), x);
        grid.coords.insert(params.y_cell.to_string(), y);
        grid.coords.insert(params.area_cell.to_string(), area);
        grid.fields
            .insert(params.discharge_field.to_string(), vec![vec![0.0; n]]);
        grid.fields
            .insert(params.melt_field.to_string(), vec![vec![0.0; n]]);
        grid
    }

    fn coord(&self, name: &str) -> Result<Vec<f64>> {
        self.coords
            .get(name)
            .cloned()
            .ok_or_else(|| SetupError::VariableNotFound(name.to_string()))
    }

    fn record(&self, name: &str, time: usize) -> Result<&Vec<f64>> {
        let records = self
            .fields
            .get(name)
            .ok_or_else(|| SetupError::VariableNotFound(name.to_string()))?;
        records.get(time).ok_or(SetupError::TimeIndex {
            name: name.to_string(),
            index: time,
            records: records.len(),
        })
    }
}

impl GridStore for MemoryGrid {
    fn cells(&self, params: &Params) -> Result<CellGrid> {
        CellGrid::new(
            self.coord(params.x_cell)?,
            self.coord(params.y_cell)?,
            self.coord(params.area_cell)?,
        )
    }

    fn read_slice(&self, name: &str, time: usize) -> Result<Vec<f64>> {
        self.record(name, time).cloned()
    }

    fn write_slice(&mut self, name: &str, time: usize, values: &[f64]) -> Result<()> {
        let len = self.record(name, time)?.len();
        if values.len() != len {
            return Err(SetupError::CellCount {
                name: name.to_string(),
                len: values.len(),
                cells: len,
            });
        }
        if let Some(row) = self.fields.get_mut(name).and_then(|r| r.get_mut(time)) {
            row.copy_from_slice(values);
        }
        Ok(())
    }
}
