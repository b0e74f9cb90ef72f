// Chart renderer: per-method aggregation (polars) and PDF output (plotters SVG, converted by svg2pdf)
// for the time, speedup, weak-scaling time and efficiency plots.

pub mod config;
pub mod kind;
pub mod aggregate;
pub mod render;

pub use config::{ChartConfig, MethodStyle};
pub use kind::{ChartKind, Metric};
pub use render::{render, render_all, render_svg};
