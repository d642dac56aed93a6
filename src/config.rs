use std::path::PathBuf;

/// Working file used when `-f` is not given.
pub const DEFAULT_FILE: &str = "landice_grid.nc";

/// Physical constants and file layout for the setup stage.
#[derive(Clone, Debug)]
pub struct Params {
    // Physics
    pub water_density: f64,      // kg/m^3
    pub background_melt: f64,    // m/s of water, spread uniformly over the bed

    // File layout
    pub time_index: usize,
    pub x_cell: &'static str,
    pub y_cell: &'static str,
    pub area_cell: &'static str,
    pub discharge_field: &'static str,
    pub melt_field: &'static str,
}

impl Params {
    /// Background melt as an areal mass flux (kg m^-2 s^-1).
    pub fn background_melt_flux(&self) -> f64 {
        self.background_melt * self.water_density
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            water_density: 1000.0,
            background_melt: 7.93e-11,
            time_index: 0,
            x_cell: "xCell",
            y_cell: "yCell",
            area_cell: "areaCell",
            discharge_field: "externalWaterInput",
            melt_field: "basalMeltInput",
        }
    }
}

/// Resolved inputs for one setup run.
#[derive(Clone, Debug)]
pub struct Options {
    pub file: PathBuf,
    pub restart: Option<PathBuf>,
    pub variant: i64,
    pub report: Option<PathBuf>,
    pub params: Params,
}

impl Options {
    pub fn new(restart: Option<PathBuf>, variant: i64) -> Self {
        Self {
            file: PathBuf::from(DEFAULT_FILE),
            restart,
            variant,
            report: None,
            params: Params::default(),
        }
    }
}
