use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, debug, warn};
use tracing_subscriber::FmtSubscriber;

use shmip_b::config::{DEFAULT_FILE, Options, Params};

/// Set up initial conditions for SHMIP land-ice hydrology experiment B.
///
/// Copies a restart file from test A1, resets the background basal melt and
/// places the moulins of the chosen variant on their nearest mesh cells.
#[derive(Parser)]
#[command(name = "shmip-b")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// File to set up
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Restart file from test A1 to use to set up this test
    #[arg(short = 'a', value_name = "FILE")]
    restart: Option<PathBuf>,

    /// Test variant to set up, 1-5
    #[arg(short, long, value_name = "NUMBER", allow_negative_numbers = true)]
    number: i64,

    /// Write a JSON report of moulin placements
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let file = cli.file.unwrap_or_else(|| {
        warn!("No file specified. Attempting to use {}", DEFAULT_FILE);
        PathBuf::from(DEFAULT_FILE)
    });

    let opts = Options {
        file,
        restart: cli.restart,
        variant: cli.number,
        report: cli.report,
        params: Params::default(),
    };

    let (report, timings) = shmip_b::run(&opts)?;
    println!("{}", report.confirmation());

    debug!("{} cells, max placement distance {:.1} m", report.cells, report.max_distance);
    for t in &timings {
        debug!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    Ok(())
}
