//! Per-method, per-thread-count aggregation of the normalized table.
//!
//! The table is loaded into a polars frame once; every chart then filters by
//! method, groups by `th` and averages the metric and its std-dev column.
//! Undefined values are nulls and drop out of the means.

use polars::prelude::*;

use crate::charts::{
    config::{ChartConfig, MethodStyle, SERIAL_METHOD},
    kind::{ChartKind, Metric},
};
use crate::deriver::NormalizedTable;
use crate::error::ChartError;

/// One averaged point: x = thread count, y = mean metric, err = mean std-dev.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub threads: u32,
    pub mean: f64,
    pub err: f64,
}

impl SeriesPoint {
    pub fn x(&self) -> f64 {
        f64::from(self.threads)
    }
}

#[derive(Debug, Clone)]
pub struct MethodSeries {
    pub style: MethodStyle,
    pub points: Vec<SeriesPoint>,
}

/// Everything a renderer needs for one chart.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub kind: ChartKind,
    pub series: Vec<MethodSeries>,
    /// Mean time of all `serial` rows (time plot reference line).
    pub serial_time: Option<f64>,
    pub max_threads: u32,
    /// Largest defined value of the chart's metric over the whole table.
    pub max_value: f64,
    pub title: String,
}

/// Builds the frame the charts aggregate from.
pub fn table_frame(table: &NormalizedTable) -> PolarsResult<DataFrame> {
    let rows = table.rows();
    df!(
        "method" => rows.iter().map(|r| r.method.as_str()).collect::<Vec<_>>(),
        "th" => rows.iter().map(|r| i64::from(r.th)).collect::<Vec<_>>(),
        "n" => rows.iter().map(|r| r.n as i64).collect::<Vec<_>>(),
        "t" => rows.iter().map(|r| r.t).collect::<Vec<_>>(),
        "std" => rows.iter().map(|r| r.std).collect::<Vec<_>>(),
        "sp" => rows.iter().map(|r| r.sp).collect::<Vec<_>>(),
        "sp_std" => rows.iter().map(|r| r.sp_std).collect::<Vec<_>>(),
        "eff" => rows.iter().map(|r| r.eff).collect::<Vec<_>>(),
        "eff_std" => rows.iter().map(|r| r.eff_std).collect::<Vec<_>>(),
    )
}

/// Mean of `metric` and its std-dev per thread count for one method,
/// sorted by thread count. Groups whose metric is entirely undefined are
/// skipped; an undefined std-dev mean becomes a zero-height error bar.
pub fn method_series(frame: &DataFrame, method: &str, metric: Metric) -> PolarsResult<Vec<SeriesPoint>> {
    let (value, err) = metric.columns();
    let grouped = frame
        .clone()
        .lazy()
        .filter(col("method").eq(lit(method)))
        .group_by([col("th")])
        .agg([col(value).mean(), col(err).mean()])
        .sort(["th"], SortMultipleOptions::default())
        .collect()?;

    let threads = grouped.column("th")?.i64()?;
    let means = grouped.column(value)?.f64()?;
    let errs = grouped.column(err)?.f64()?;

    let mut points = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        if let (Some(th), Some(mean)) = (threads.get(i), means.get(i)) {
            points.push(SeriesPoint {
                threads: th as u32,
                mean,
                err: errs.get(i).unwrap_or(0.0),
            });
        }
    }
    Ok(points)
}

/// Mean time over every row of `method`, `None` when it has no rows.
pub fn method_mean_time(frame: &DataFrame, method: &str) -> PolarsResult<Option<f64>> {
    let out = frame
        .clone()
        .lazy()
        .filter(col("method").eq(lit(method)))
        .select([col("t").mean()])
        .collect()?;
    Ok(out.column("t")?.f64()?.get(0))
}

impl ChartData {
    pub fn collect(
        table: &NormalizedTable,
        frame: &DataFrame,
        kind: ChartKind,
        config: &ChartConfig,
    ) -> Result<Self, ChartError> {
        let first = table
            .rows()
            .first()
            .ok_or(ChartError::Empty("normalized table has no rows"))?;
        let max_threads = table.max_threads().unwrap_or(1);

        let metric = kind.metric();
        let mut series = Vec::with_capacity(config.methods.len());
        for style in &config.methods {
            let points = method_series(frame, &style.key, metric)?;
            series.push(MethodSeries {
                style: style.clone(),
                points,
            });
        }

        let serial_time = match kind {
            ChartKind::Time => method_mean_time(frame, SERIAL_METHOD)?,
            _ => None,
        };

        let max_value = table
            .rows()
            .iter()
            .filter_map(|r| match metric {
                Metric::Time => Some(r.t),
                Metric::Speedup => r.speedup().map(|m| m.value),
                Metric::Efficiency => r.efficiency().map(|m| m.value),
            })
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);

        let n = first.n as f64;
        let per_thread = if first.th == 0 { n } else { n / f64::from(first.th) };

        Ok(Self {
            kind,
            series,
            serial_time,
            max_threads,
            max_value,
            title: kind.title(n, per_thread),
        })
    }
}
