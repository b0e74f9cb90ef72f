//! # OpenMP Scaling Plots Entry Point
//!
//! Reads the OpenMP benchmark CSV, derives speedup and efficiency for every
//! row, prints a summary and writes the four scaling charts.
//!
//! ## Outputs
//! - `<out-dir>/omp_{timeplot,speedplot,weaktimeplot,effplot}.pdf`
//! - `--export PATH`: normalized table as CSV.
//! - `--html PATH`: interactive 2x2 report.
//!
//! Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=info`).

use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::{info, warn};

use omp_scaling_plots::{
    advanced::report::write_html_report,
    charts::{ChartConfig, render_all},
    deriver::{DeriveOptions, normalize_with},
    utils::{export::export_normalized_csv, summary::print_summary},
};

#[derive(Parser, Debug)]
#[command(name = "omp_plots")]
#[command(about = "Speedup/efficiency charts for the OpenMP sorting benchmarks")]
#[command(version)]
struct Args {
    /// Benchmark CSV written by the OpenMP driver
    input: PathBuf,

    /// Directory for the chart files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the normalized table to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Also write an interactive HTML report
    #[arg(long)]
    html: Option<PathBuf>,

    /// Skip the PDF charts
    #[arg(long)]
    no_plots: bool,

    /// Fail when a problem size has no single-thread baseline
    #[arg(long)]
    strict_baselines: bool,

    /// Upper y limit of the time chart (default: max time + 1)
    #[arg(long)]
    time_y_max: Option<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    println!("\n{}", "=".repeat(60));
    println!("OPENMP SCALING ANALYSIS: {}", args.input.display());
    println!("{}\n", "=".repeat(60));

    let options = DeriveOptions {
        require_baselines: args.strict_baselines,
    };
    let table = normalize_with(&args.input, options)?;
    if table.is_empty() {
        warn!("{} contains no benchmark rows", args.input.display());
    }

    let mut config = ChartConfig::default().with_out_dir(&args.out_dir);
    config.time_y_max = args.time_y_max;

    print_summary(&table, &config)?;

    if let Some(path) = &args.export {
        export_normalized_csv(&table, path)?;
    }

    if !args.no_plots {
        let written = render_all(&table, &config)?;
        info!("{} charts written to {}", written.len(), args.out_dir.display());
        for path in &written {
            println!("  {}", path.display());
        }
    }

    if let Some(path) = &args.html {
        write_html_report(&table, &config, path)?;
    }

    println!("\nDone.");
    Ok(())
}
