//! Rendering of the four scaling charts.
//!
//! plotters draws each chart into an in-memory SVG document, which svg2pdf
//! converts into the PDF written to disk. Every chart: one line + markers + vertical error bars per method, a green
//! reference line, and a legend. The time plot uses a log2 thread axis; the
//! others are linear with dotted guides at powers of two.

use plotters::{coord::{Shift, types::RangedCoordf64}, prelude::*};
use std::{fs, path::PathBuf};
use svg2pdf::{ConversionOptions, PageOptions, usvg};

use log::info;

use crate::charts::{
    aggregate::{ChartData, MethodSeries, table_frame},
    config::ChartConfig,
    kind::ChartKind,
};
use crate::deriver::NormalizedTable;
use crate::error::ChartError;

type Root<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const ERROR_BAR_WIDTH: u32 = 6;
const MARKER_SIZE: i32 = 3;

/// Renders all four charts into `config.out_dir`, overwriting existing files.
pub fn render_all(table: &NormalizedTable, config: &ChartConfig) -> Result<Vec<PathBuf>, ChartError> {
    fs::create_dir_all(&config.out_dir)?;
    let frame = table_frame(table)?;

    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let data = ChartData::collect(table, &frame, kind, config)?;
        written.push(render(&data, config)?);
    }
    Ok(written)
}

/// Renders one chart as PDF; returns the written path.
pub fn render(data: &ChartData, config: &ChartConfig) -> Result<PathBuf, ChartError> {
    let path = config.out_dir.join(data.kind.file_name());
    let svg = render_svg(data, config)?;
    fs::write(&path, svg_to_pdf(&svg)?)?;
    info!("{} written", path.display());
    Ok(path)
}

/// Draws one chart and returns the SVG document.
pub fn render_svg(data: &ChartData, config: &ChartConfig) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        draw_to(&root, data, config)?;
    }
    Ok(svg)
}

/// Vector conversion; text is resolved against the system fonts.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, ChartError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| ChartError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| ChartError::Pdf(e.to_string()))
}

fn draw_to(root: &Root<'_>, data: &ChartData, config: &ChartConfig) -> Result<(), ChartError> {
    root.fill(&WHITE)?;

    match data.kind {
        ChartKind::Time => draw_time(root, data, config)?,
        ChartKind::Speedup => {
            let y_max = data.max_value + 1.0;
            draw_linear(root, data, config, y_max, 0.0, |chart, _| {
                let ideal = f64::from(data.max_threads);
                let color = config.reference_color;
                chart
                    .draw_series(LineSeries::new(vec![(0.0, 0.0), (ideal, ideal)], color.stroke_width(1)))?
                    .label("Ideal")
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
                Ok(SeriesLabelPosition::UpperRight)
            })?
        }
        ChartKind::WeakTime => {
            let y_max = data.max_value + 5.0;
            draw_linear(root, data, config, y_max, 0.1, |_, _| Ok(SeriesLabelPosition::UpperLeft))?
        }
        ChartKind::Efficiency => {
            draw_linear(root, data, config, 1.1, 0.0, |chart, x_max| {
                let color = config.reference_color;
                chart
                    .draw_series(LineSeries::new(vec![(0.0, 1.0), (x_max, 1.0)], color.stroke_width(2)))?
                    .label("Ideal")
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
                Ok(SeriesLabelPosition::UpperRight)
            })?
        }
    }

    root.present()?;
    Ok(())
}

/// Average time vs threads on a log2 axis, with the serial mean as reference.
fn draw_time(root: &Root<'_>, data: &ChartData, config: &ChartConfig) -> Result<(), ChartError> {
    let family = config.font_family.as_str();
    let x_hi = f64::from(data.max_threads.max(2).next_power_of_two()) * 1.25;
    let y_max = config.time_y_max.unwrap_or(data.max_value + 1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(&data.title, (family, config.title_font_size))
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(70)
        .build_cartesian_2d((0.8f64..x_hi).log_scale().base(2.0), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc(data.kind.x_desc())
        .y_desc(data.kind.y_desc())
        .axis_desc_style((family, config.title_font_size))
        .label_style((family, config.tick_font_size))
        .bold_line_style(config.guide_color.mix(0.3))
        .light_line_style(WHITE)
        .x_label_formatter(&|x: &f64| format!("{}", x.round() as u64))
        .draw()?;

    if let Some(serial) = data.serial_time {
        let color = config.reference_color;
        chart
            .draw_series(LineSeries::new(vec![(0.8, serial), (x_hi, serial)], color.stroke_width(2)))?
            .label("Serial time")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    draw_methods(&mut chart, &data.series)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE)
        .border_style(&BLACK)
        .label_font((family, config.legend_font_size))
        .draw()?;

    Ok(())
}

/// Linear thread axis `0..max+2` with power-of-two guides. `reference`
/// draws the chart-specific reference line and picks the legend corner.
fn draw_linear<F>(
    root: &Root<'_>,
    data: &ChartData,
    config: &ChartConfig,
    y_max: f64,
    guide_label_y: f64,
    reference: F,
) -> Result<(), ChartError>
where
    F: FnOnce(
        &mut ChartContext<'_, SVGBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        f64,
    ) -> Result<SeriesLabelPosition, ChartError>,
{
    let family = config.font_family.as_str();
    let x_max = f64::from(data.max_threads) + 2.0;
    let is_efficiency = data.kind == ChartKind::Efficiency;

    let mut chart = ChartBuilder::on(root)
        .caption(&data.title, (family, config.title_font_size))
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    let threads = |x: &f64| format!("{}", x.round() as u64);
    let percent = |y: &f64| format!("{:.0}%", y * 100.0);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(data.kind.x_desc())
        .y_desc(data.kind.y_desc())
        .axis_desc_style((family, config.title_font_size))
        .label_style((family, config.tick_font_size))
        .bold_line_style(config.guide_color.mix(0.3))
        .light_line_style(WHITE)
        .x_label_formatter(&threads);
    if is_efficiency {
        mesh.y_labels(12).y_label_formatter(&percent);
    }
    mesh.draw()?;

    draw_power_guides(&mut chart, data.max_threads, y_max, guide_label_y, config)?;
    let legend_at = reference(&mut chart, x_max)?;
    draw_methods(&mut chart, &data.series)?;

    chart
        .configure_series_labels()
        .position(legend_at)
        .background_style(&WHITE)
        .border_style(&BLACK)
        .label_font((family, config.legend_font_size))
        .draw()?;

    Ok(())
}

/// Faint gray verticals at 2, 4, 8, ...; labelled from 8 upwards.
fn draw_power_guides(
    chart: &mut ChartContext<'_, SVGBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    max_threads: u32,
    y_max: f64,
    label_y: f64,
    config: &ChartConfig,
) -> Result<(), ChartError> {
    let steps = max_threads.checked_ilog2().unwrap_or(0);
    let font = (config.font_family.as_str(), config.tick_font_size)
        .into_font()
        .color(&config.guide_color);

    for i in 1..=steps {
        let x = f64::from(1u32 << i);
        chart.draw_series(LineSeries::new(
            vec![(x, 0.0), (x, y_max)],
            config.guide_color.mix(0.7).stroke_width(1),
        ))?;
        if i > 2 {
            chart.draw_series(std::iter::once(Text::new(
                format!("{}", 1u32 << i),
                (x - 0.1, label_y),
                font.clone(),
            )))?;
        }
    }
    Ok(())
}

/// Line, markers and ±std error bars for every non-empty method series.
fn draw_methods<X>(
    chart: &mut ChartContext<'_, SVGBackend<'_>, Cartesian2d<X, RangedCoordf64>>,
    series: &[MethodSeries],
) -> Result<(), ChartError>
where
    X: Ranged<ValueType = f64>,
{
    for s in series.iter().filter(|s| !s.points.is_empty()) {
        let color = s.style.color;

        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|p| (p.x(), p.mean)),
                color.stroke_width(1),
            ))?
            .label(s.style.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart.draw_series(
            s.points
                .iter()
                .map(|p| Circle::new((p.x(), p.mean), MARKER_SIZE, color.filled())),
        )?;

        chart.draw_series(s.points.iter().map(|p| {
            ErrorBar::new_vertical(
                p.x(),
                p.mean - p.err,
                p.mean,
                p.mean + p.err,
                color.stroke_width(1),
                ERROR_BAR_WIDTH,
            )
        }))?;
    }
    Ok(())
}
