//! The four chart kinds and the metric each one plots.

/// A derived quantity together with its paired std-dev column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Time,
    Speedup,
    Efficiency,
}

impl Metric {
    /// `(value column, std-dev column)` in the normalized table.
    pub fn columns(&self) -> (&'static str, &'static str) {
        match self {
            Metric::Time => ("t", "std"),
            Metric::Speedup => ("sp", "sp_std"),
            Metric::Efficiency => ("eff", "eff_std"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Time,
    Speedup,
    WeakTime,
    Efficiency,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Time,
        ChartKind::Speedup,
        ChartKind::WeakTime,
        ChartKind::Efficiency,
    ];

    pub fn metric(&self) -> Metric {
        match self {
            ChartKind::Time | ChartKind::WeakTime => Metric::Time,
            ChartKind::Speedup => Metric::Speedup,
            ChartKind::Efficiency => Metric::Efficiency,
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Time => "omp_timeplot",
            ChartKind::Speedup => "omp_speedplot",
            ChartKind::WeakTime => "omp_weaktimeplot",
            ChartKind::Efficiency => "omp_effplot",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.file_stem())
    }

    pub fn x_desc(&self) -> &'static str {
        match self {
            ChartKind::Time => "Number of Threads (Log2 scale)",
            _ => "Number of Threads",
        }
    }

    pub fn y_desc(&self) -> &'static str {
        match self.metric() {
            Metric::Time => "Average Time (s)",
            Metric::Speedup => "Speedup",
            Metric::Efficiency => "Efficiency",
        }
    }

    /// Chart title; `n` is the first row's element count, `per_thread` the
    /// same count divided by that row's thread count.
    pub fn title(&self, n: f64, per_thread: f64) -> String {
        match self {
            ChartKind::Time => format!("OpenMP Average Time ({} elements)", sci_label(n)),
            ChartKind::Speedup => format!("OpenMP Speedup ({} elements)", sci_label(n)),
            ChartKind::WeakTime => format!(
                "OpenMP Average Time ({} elements per thread)",
                sci_label(per_thread)
            ),
            ChartKind::Efficiency => format!(
                "OpenMP Efficiency ({} elements per thread)",
                sci_label(per_thread)
            ),
        }
    }
}

/// `%.0e` style: `100000000` → `1e+08`.
pub fn sci_label(value: f64) -> String {
    let raw = format!("{:.0e}", value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => raw,
    }
}
