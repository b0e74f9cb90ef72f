//! Console summary: serial baselines followed by a per-method table of mean
//! time, speedup and efficiency for every thread count.

use std::{collections::BTreeMap, fmt::Write};

use crate::charts::{
    aggregate::{method_series, table_frame},
    config::{ChartConfig, SERIAL_METHOD},
    kind::Metric,
};
use crate::deriver::NormalizedTable;
use crate::error::ChartError;

#[derive(Debug, Default, Clone, Copy)]
struct Cells {
    t: Option<f64>,
    sp: Option<f64>,
    eff: Option<f64>,
}

fn cell(v: Option<f64>) -> String {
    v.map(|x| format!("{:.4}", x)).unwrap_or_else(|| "-".to_string())
}

/// Renders the summary table as text.
pub fn format_summary(table: &NormalizedTable, config: &ChartConfig) -> Result<String, ChartError> {
    let frame = table_frame(table)?;
    let mut out = String::new();

    let _ = writeln!(out, "SERIAL BASELINES");
    let _ = writeln!(out, "================\n");
    let _ = writeln!(out, "{:<14} {:<12} {:<12}", "Elements", "Time (s)", "Std (s)");
    let _ = writeln!(out, "{}", "=".repeat(40));
    for (n, base) in table.baselines().iter() {
        let _ = writeln!(out, "{:<14} {:<12.4} {:<12.4}", n, base.value, base.std);
    }
    if !table.missing_baselines().is_empty() {
        let _ = writeln!(out, "No baseline for: {:?}", table.missing_baselines());
    }
    let _ = writeln!(out);

    let keys = std::iter::once(SERIAL_METHOD).chain(config.methods.iter().map(|m| m.key.as_str()));
    for method in keys {
        let mut by_threads: BTreeMap<u32, Cells> = BTreeMap::new();
        for p in method_series(&frame, method, Metric::Time)? {
            by_threads.entry(p.threads).or_default().t = Some(p.mean);
        }
        for p in method_series(&frame, method, Metric::Speedup)? {
            by_threads.entry(p.threads).or_default().sp = Some(p.mean);
        }
        for p in method_series(&frame, method, Metric::Efficiency)? {
            by_threads.entry(p.threads).or_default().eff = Some(p.mean);
        }
        if by_threads.is_empty() {
            continue;
        }

        let _ = writeln!(out, "METHOD: {} ({} rows)", method, table.rows_for(method).count());
        let _ = writeln!(out, "{:<8} {:<12} {:<10} {:<10}", "Threads", "Time (s)", "Speedup", "Eff.");
        let _ = writeln!(out, "{}", "=".repeat(42));
        for (th, c) in &by_threads {
            let _ = writeln!(
                out,
                "{:<8} {:<12} {:<10} {:<10}",
                th,
                cell(c.t),
                cell(c.sp),
                cell(c.eff)
            );
        }
        let _ = writeln!(out);
    }

    if !table.unsorted_rows().is_empty() {
        let _ = writeln!(out, "WARNING: {} row(s) not sorted correctly", table.unsorted_rows().len());
        for row in table.unsorted_rows() {
            let _ = writeln!(out, "  {}", row);
        }
    }

    Ok(out)
}

pub fn print_summary(table: &NormalizedTable, config: &ChartConfig) -> Result<(), ChartError> {
    print!("{}", format_summary(table, config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deriver::{DeriveOptions, normalize_reader};

    #[test]
    fn lists_baselines_and_methods_with_placeholders() {
        let data = "Method,Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\n\
                    serial,Yes,1,100,100,10,1,9,11\n\
                    task,Yes,2,100,100,5,0.5,4.5,5.5\n";
        let table = normalize_reader(data.as_bytes(), DeriveOptions::default()).unwrap();
        let text = format_summary(&table, &ChartConfig::default()).unwrap();

        assert!(text.contains("SERIAL BASELINES"));
        assert!(text.contains("METHOD: serial"));
        assert!(text.contains("METHOD: task"));
        assert!(!text.contains("METHOD: psrs"));
        // task at 2 threads: speedup 2, efficiency undefined (100 / 2 has no baseline)
        let task_row = text
            .lines()
            .skip_while(|l| !l.starts_with("METHOD: task"))
            .find(|l| l.starts_with('2'))
            .unwrap();
        assert!(task_row.contains("2.0000"));
        assert!(task_row.trim_end().ends_with('-'));
    }

    #[test]
    fn names_every_unsorted_row() {
        let data = "Method,Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\n\
                    serial,Yes,1,100,100,10,1,9,11\n\
                    task,No,2,100,100,5,0.5,4.5,5.5\n";
        let table = normalize_reader(data.as_bytes(), DeriveOptions::default()).unwrap();
        let text = format_summary(&table, &ChartConfig::default()).unwrap();

        assert!(text.contains("WARNING: 1 row(s) not sorted correctly"));
        let flagged = text
            .lines()
            .skip_while(|l| !l.starts_with("WARNING"))
            .nth(1)
            .unwrap();
        assert!(flagged.contains("line 3"));
        assert!(flagged.contains("method=task"));
        assert!(flagged.contains("threads=2"));
    }

    #[test]
    fn method_headers_count_their_rows() {
        let data = "Method,Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\n\
                    serial,Yes,1,100,100,10,1,9,11\n\
                    task,Yes,2,100,100,5,0.5,4.5,5.5\n\
                    task,Yes,4,100,100,3,0.5,2.5,3.5\n";
        let table = normalize_reader(data.as_bytes(), DeriveOptions::default()).unwrap();
        let text = format_summary(&table, &ChartConfig::default()).unwrap();
        assert!(text.contains("METHOD: task (2 rows)"));
        assert!(text.contains("METHOD: serial (1 rows)"));
    }
}
