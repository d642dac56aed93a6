use std::path::Path;

use tracing::debug;

use crate::config::Params;
use crate::error::{Result, SetupError};
use crate::grid::CellGrid;
use crate::store::GridStore;

/// NetCDF mesh state file opened for in-place update.
pub struct NetcdfGrid {
    file: netcdf::FileMut,
}

impl NetcdfGrid {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = netcdf::append(path)?;
        debug!("opened {} for update", path.display());
        Ok(Self { file })
    }

    fn variable(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| SetupError::VariableNotFound(name.to_string()))
    }

    fn read_1d(&self, name: &str) -> Result<Vec<f64>> {
        let var = self.variable(name)?;
        let rank = var.dimensions().len();
        if rank != 1 {
            return Err(SetupError::Rank {
                name: name.to_string(),
                rank,
                expected: 1,
            });
        }
        Ok(var.get_values::<f64, _>(..)?)
    }

    /// `(records, cells)` of a `[time, cell]` field.
    fn shape(&self, name: &str) -> Result<(usize, usize)> {
        let var = self.variable(name)?;
        match var.dimensions() {
            [time, cell] => Ok((time.len(), cell.len())),
            dims => Err(SetupError::Rank {
                name: name.to_string(),
                rank: dims.len(),
                expected: 2,
            }),
        }
    }
}

impl GridStore for NetcdfGrid {
    fn cells(&self, params: &Params) -> Result<CellGrid> {
        CellGrid::new(
            self.read_1d(params.x_cell)?,
            self.read_1d(params.y_cell)?,
            self.read_1d(params.area_cell)?,
        )
    }

    fn read_slice(&self, name: &str, time: usize) -> Result<Vec<f64>> {
        let (records, _) = self.shape(name)?;
        if time >= records {
            return Err(SetupError::TimeIndex {
                name: name.to_string(),
                index: time,
                records,
            });
        }
        Ok(self.variable(name)?.get_values::<f64, _>((time, ..))?)
    }

    fn write_slice(&mut self, name: &str, time: usize, values: &[f64]) -> Result<()> {
        let (_, cells) = self.shape(name)?;
        if values.len() != cells {
            return Err(SetupError::CellCount {
                name: name.to_string(),
                len: values.len(),
                cells,
            });
        }
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| SetupError::VariableNotFound(name.to_string()))?;
        var.put_values(values, (time, ..))?;
        Ok(())
    }
}
