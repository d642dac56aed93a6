pub mod config;
pub mod error;
pub mod grid;
#[cfg(feature = "netcdf")]
pub mod netcdf_store;
pub mod placement;
pub mod prepare;
pub mod presets;
pub mod report;
pub mod store;

use config::Params;
use error::Result;
use placement::{Placement, apply_background_melt, apply_moulin_discharge};
use presets::Moulin;
use store::GridStore;

pub use error::SetupError;

#[derive(Clone, Debug)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Fields written by one pass of the setup stage.
#[derive(Clone, Debug)]
pub struct Applied {
    pub cells: usize,
    pub placements: Vec<Placement>,
}

/// Reset the background melt and moulin discharge fields of `store` at
/// `params.time_index` and place `moulins` on their nearest cells.
///
/// Both fields are read before either is written, so a file missing one of
/// them is left untouched.
pub fn apply_initial_conditions<S: GridStore>(
    store: &mut S,
    moulins: &[Moulin],
    params: &Params,
) -> Result<Applied> {
    let t = params.time_index;
    let grid = store.cells(params)?;
    let mut melt = store.read_slice(params.melt_field, t)?;
    let mut discharge = store.read_slice(params.discharge_field, t)?;

    apply_background_melt(&mut melt, params.background_melt_flux());
    let placements = apply_moulin_discharge(&grid, moulins, params.water_density, &mut discharge)?;

    store.write_slice(params.melt_field, t, &melt)?;
    store.write_slice(params.discharge_field, t, &discharge)?;

    Ok(Applied {
        cells: grid.len(),
        placements,
    })
}

/// Full setup run: validate inputs, copy the restart file, rewrite the
/// forcing fields in the copy and optionally write a JSON report.
#[cfg(feature = "netcdf")]
pub fn run(opts: &config::Options) -> Result<(report::Report, Vec<Timing>)> {
    use std::time::Instant;
    use tracing::info;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Validate before anything touches the filesystem
    let restart = opts.restart.as_deref().ok_or(SetupError::MissingRestart)?;
    let moulins = presets::select_variant(opts.variant)?;
    info!(
        "setting up experiment B{} with {} moulins ({} m^3/s total)",
        opts.variant,
        moulins.len(),
        presets::total_discharge(moulins)
    );

    // 2. Copy restart file
    let t = Instant::now();
    prepare::prepare_file(Some(restart), &opts.file)?;
    timings.push(Timing {
        name: "copy",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Rewrite melt + discharge in place
    let t = Instant::now();
    let applied = {
        let mut grid = netcdf_store::NetcdfGrid::open(&opts.file)?;
        apply_initial_conditions(&mut grid, moulins, &opts.params)?
        // file closed on drop
    };
    timings.push(Timing {
        name: "fields",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let report = report::Report::new(
        &opts.file,
        restart,
        opts.variant,
        applied.cells,
        opts.params.background_melt_flux(),
        applied.placements,
    );

    // 4. Optional report
    if let Some(path) = &opts.report {
        let t = Instant::now();
        report.write_json(path)?;
        info!("wrote placement report to {}", path.display());
        timings.push(Timing {
            name: "report",
            ms: t.elapsed().as_secs_f64() * 1000.0,
        });
    }

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((report, timings))
}
