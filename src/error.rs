use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SetupError>;

/// Everything that can abort a setup run. None of these are recoverable.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("a restart file from test A1 is required to set up this test; specify it with -a")]
    MissingRestart,

    #[error("undefined variant {0}: experiment B defines variants 1-5")]
    UndefinedVariant(i64),

    #[error("source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("failed to copy {} to {}: {source}", .src.display(), .dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("variable not found: {0}")]
    VariableNotFound(String),

    #[error("variable {name} has {rank} dimensions, expected {expected}")]
    Rank {
        name: String,
        rank: usize,
        expected: usize,
    },

    #[error("variable {name} spans {len} cells, grid has {cells}")]
    CellCount {
        name: String,
        len: usize,
        cells: usize,
    },

    #[error("time index {index} out of range for {name} ({records} records)")]
    TimeIndex {
        name: String,
        index: usize,
        records: usize,
    },

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("cell {cell} has non-positive area {area}")]
    DegenerateCell { cell: usize, area: f64 },

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[cfg(feature = "netcdf")]
    #[error("netCDF error: {0}")]
    Netcdf(#[from] netcdf::error::Error),
}
