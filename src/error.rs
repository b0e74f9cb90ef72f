//! Error types for ingestion and chart rendering.
//!
//! Schema and coercion failures abort the run; data-quality problems are
//! reported through `log` and never show up here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required column \"{column}\"")]
    MissingColumn { column: &'static str },
    #[error("line {line}: column \"{column}\": {message}")]
    TypeCoercion {
        line: u64,
        column: String,
        message: String,
    },
    #[error("no single-thread baseline for problem sizes {sizes:?}")]
    MissingBaseline { sizes: Vec<u64> },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("aggregation failed: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
    #[error("nothing to plot: {0}")]
    Empty(&'static str),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ChartError::Draw(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeriveError>;
