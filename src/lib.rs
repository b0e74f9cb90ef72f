//! # OpenMP scaling results post-processor
//!
//! Reads the CSV written by the OpenMP sorting benchmarks (one row per
//! method, thread count and problem size), derives speedup and efficiency
//! with delta-method uncertainty, and renders the scaling charts.
//!
//! ## Pipeline
//! - **Deriver:** `deriver::normalize(path)` → [`deriver::NormalizedTable`].
//! - **Charts:** `charts::render_all(&table, &config)` → four PDF files (drawn as SVG, converted with svg2pdf).
//! - **Reports:** console summary, normalized CSV export, plotly HTML report.
//!
//! ## Outputs
//! - `omp_timeplot.pdf`, `omp_speedplot.pdf`, `omp_weaktimeplot.pdf`, `omp_effplot.pdf`.

pub mod error;
pub mod deriver;
pub mod charts;
pub mod utils;
pub mod advanced;

pub use error::{ChartError, DeriveError};
