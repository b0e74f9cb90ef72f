//! Interactive HTML report: the four scaling charts as one 2x2 plotly figure.
//!
//! Panels: time (log x) | speedup, weak-scaling time | efficiency.
//! Same per-method aggregation and colors as the SVG charts.

use plotly::{
    Plot, Scatter,
    common::{DashType, ErrorData, ErrorType, Line, Marker, Mode},
    layout::{Axis, AxisType, GridPattern, Layout, LayoutGrid},
};
use std::{fs, path::Path};

use log::info;

use crate::charts::{
    aggregate::{ChartData, table_frame},
    config::{ChartConfig, hex_color},
    kind::ChartKind,
};
use crate::deriver::NormalizedTable;
use crate::error::ChartError;

fn axis_ids(kind: ChartKind) -> (&'static str, &'static str) {
    match kind {
        ChartKind::Time => ("x", "y"),
        ChartKind::Speedup => ("x2", "y2"),
        ChartKind::WeakTime => ("x3", "y3"),
        ChartKind::Efficiency => ("x4", "y4"),
    }
}

/// Builds the combined figure without writing it.
pub fn build_report(table: &NormalizedTable, config: &ChartConfig) -> Result<Plot, ChartError> {
    let frame = table_frame(table)?;
    let mut plot = Plot::new();
    let reference = hex_color(config.reference_color);

    for (panel, kind) in ChartKind::ALL.into_iter().enumerate() {
        let data = ChartData::collect(table, &frame, kind, config)?;
        let (xa, ya) = axis_ids(kind);
        let x_max = f64::from(data.max_threads);

        // Reference line per panel
        let reference_line = match kind {
            ChartKind::Time => data
                .serial_time
                .map(|t| ("Serial time", vec![1.0, x_max], vec![t, t])),
            ChartKind::Speedup => Some(("Ideal", vec![0.0, x_max], vec![0.0, x_max])),
            ChartKind::Efficiency => Some(("Ideal", vec![0.0, x_max + 2.0], vec![1.0, 1.0])),
            ChartKind::WeakTime => None,
        };
        if let Some((label, xs, ys)) = reference_line {
            plot.add_trace(
                Scatter::new(xs, ys)
                    .name(label)
                    .mode(Mode::Lines)
                    .line(Line::new().color(reference.clone()).dash(DashType::Dash))
                    .show_legend(kind == ChartKind::Time || kind == ChartKind::Speedup)
                    .legend_group(label)
                    .x_axis(xa)
                    .y_axis(ya),
            );
        }

        for s in data.series.iter().filter(|s| !s.points.is_empty()) {
            let color = s.style.hex();
            let xs: Vec<f64> = s.points.iter().map(|p| p.x()).collect();
            let ys: Vec<f64> = s.points.iter().map(|p| p.mean).collect();
            let errs: Vec<f64> = s.points.iter().map(|p| p.err).collect();

            plot.add_trace(
                Scatter::new(xs, ys)
                    .name(&s.style.label)
                    .mode(Mode::LinesMarkers)
                    .line(Line::new().color(color.clone()))
                    .marker(Marker::new().color(color))
                    .error_y(ErrorData::new(ErrorType::Data).array(errs))
                    .legend_group(&s.style.label)
                    .show_legend(panel == 0)
                    .x_axis(xa)
                    .y_axis(ya),
            );
        }
    }

    let layout = Layout::new()
        .title("OpenMP Sorting Scaling Study")
        .height(1000)
        .width(1600)
        .show_legend(true)
        .grid(
            LayoutGrid::new()
                .rows(2)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        // Top-left: time, log2 threads
        .x_axis(
            Axis::new()
                .title(ChartKind::Time.x_desc())
                .type_(AxisType::Log)
                .domain(&[0.0, 0.48]),
        )
        .y_axis(Axis::new().title(ChartKind::Time.y_desc()).domain(&[0.55, 1.0]))
        // Top-right: speedup
        .x_axis2(Axis::new().title(ChartKind::Speedup.x_desc()).domain(&[0.52, 1.0]))
        .y_axis2(Axis::new().title(ChartKind::Speedup.y_desc()).domain(&[0.55, 1.0]))
        // Bottom-left: weak scaling time
        .x_axis3(Axis::new().title(ChartKind::WeakTime.x_desc()).domain(&[0.0, 0.48]))
        .y_axis3(Axis::new().title(ChartKind::WeakTime.y_desc()).domain(&[0.0, 0.45]))
        // Bottom-right: efficiency
        .x_axis4(Axis::new().title(ChartKind::Efficiency.x_desc()).domain(&[0.52, 1.0]))
        .y_axis4(
            Axis::new()
                .title(ChartKind::Efficiency.y_desc())
                .tick_format(".0%")
                .range(vec![0.0, 1.1])
                .domain(&[0.0, 0.45]),
        );

    plot.set_layout(layout);
    Ok(plot)
}

/// Writes the combined report as a standalone HTML file.
pub fn write_html_report<P: AsRef<Path>>(
    table: &NormalizedTable,
    config: &ChartConfig,
    path: P,
) -> Result<(), ChartError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let plot = build_report(table, config)?;
    fs::write(path, plot.to_html())?;
    info!("HTML report generated: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deriver::{DeriveOptions, normalize_reader};

    #[test]
    fn report_contains_every_plotted_method() {
        let data = "Method,Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\n\
                    serial,Yes,1,100,100,10,1,9,11\n\
                    task,Yes,2,100,100,6,0.5,5.5,6.5\n\
                    psrs,Yes,4,100,100,3,0.2,2.8,3.2\n";
        let table = normalize_reader(data.as_bytes(), DeriveOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.html");

        write_html_report(&table, &ChartConfig::default(), &out).unwrap();

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("OpenMP Sorting Scaling Study"));
        assert!(html.contains("Task"));
        assert!(html.contains("PSRS"));
    }
}
