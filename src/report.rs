use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SetupError};
use crate::placement::{Placement, shared_cells};

/// Summary of a setup run, written as JSON with `--report`.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub file: PathBuf,
    pub restart: PathBuf,
    pub variant: i64,
    pub cells: usize,
    pub background_melt_flux: f64,
    pub total_discharge: f64,
    pub max_distance: f64,
    pub shared_cells: Vec<SharedCell>,
    pub placements: Vec<Placement>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SharedCell {
    pub cell: usize,
    pub moulins: Vec<u16>,
}

impl Report {
    pub fn new(
        file: &Path,
        restart: &Path,
        variant: i64,
        cells: usize,
        background_melt_flux: f64,
        placements: Vec<Placement>,
    ) -> Self {
        let total_discharge = placements.iter().map(|p| p.q).sum();
        let max_distance = placements.iter().map(|p| p.distance).fold(0.0, f64::max);
        let shared_cells = shared_cells(&placements)
            .into_iter()
            .map(|(cell, moulins)| SharedCell { cell, moulins })
            .collect();
        Self {
            file: file.to_path_buf(),
            restart: restart.to_path_buf(),
            variant,
            cells,
            background_melt_flux,
            total_discharge,
            max_distance,
            shared_cells,
            placements,
        }
    }

    /// Line announcing the finished output file.
    pub fn confirmation(&self) -> String {
        format!("Successfully added initial conditions to: {}", self.file.display())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let io_err = |source: std::io::Error| SetupError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n").map_err(io_err)?;
        out.flush().map_err(io_err)
    }
}
