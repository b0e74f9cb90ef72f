use std::{fs, io::Write};

use omp_scaling_plots::{
    advanced::report::write_html_report,
    charts::{
        ChartConfig, ChartKind, Metric,
        aggregate::{ChartData, method_series, table_frame},
        render_all, render_svg,
    },
    deriver::{DeriveOptions, NormalizedTable, normalize, normalize_reader},
    error::ChartError,
    utils::summary::format_summary,
};
use tempfile::{NamedTempFile, tempdir};

const HEADER: &str = "Method,Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\n";

/// Strong scaling at n=1000 plus a weak-scaling run at 1000 per thread.
fn scaling_table() -> NormalizedTable {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}serial,Yes,1,1000,1.000000e+03,8,0.4,7.6,8.4\n\
         task,Yes,2,1000,1.000000e+03,4.4,0.2,4.2,4.6\n\
         task,Yes,4,1000,1.000000e+03,2.5,0.1,2.4,2.6\n\
         simple,Yes,4,1000,1.000000e+03,2.2,0.1,2.1,2.3\n\
         hyper,Yes,8,8000,8.000000e+03,9,0.3,8.7,9.3\n\
         psrs,Yes,8,8000,8.000000e+03,10,0.5,9.5,10.5\n",
        HEADER
    )
    .unwrap();
    file.flush().unwrap();
    normalize(file.path()).unwrap()
}

#[test]
fn writes_the_four_charts_into_the_output_directory() {
    let table = scaling_table();
    let dir = tempdir().unwrap();
    let out = dir.path().join("plots");
    let config = ChartConfig::default().with_out_dir(&out);

    let written = render_all(&table, &config).unwrap();

    let mut names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "omp_effplot.pdf",
            "omp_speedplot.pdf",
            "omp_timeplot.pdf",
            "omp_weaktimeplot.pdf"
        ]
    );
    for kind in ChartKind::ALL {
        let pdf = fs::read(out.join(kind.file_name())).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}

#[test]
fn chart_drawings_carry_titles_legends_and_method_labels() {
    let table = scaling_table();
    let frame = table_frame(&table).unwrap();
    let config = ChartConfig::default();
    let svg = |kind| {
        let data = ChartData::collect(&table, &frame, kind, &config).unwrap();
        render_svg(&data, &config).unwrap()
    };

    let time = svg(ChartKind::Time);
    assert!(time.contains("Serial time"));
    for label in ["Task", "Simple", "Hyper", "PSRS"] {
        assert!(time.contains(label), "{} missing from the time chart", label);
    }

    let speedup = svg(ChartKind::Speedup);
    assert!(speedup.contains("Ideal"));
    assert!(speedup.contains("Simple"));

    let eff = svg(ChartKind::Efficiency);
    assert!(eff.contains("OpenMP Efficiency (1e+03 elements per thread)"));
    assert!(eff.contains("Ideal"));
    assert!(eff.contains("Hyper"));
    assert!(eff.contains("PSRS"));
}

#[test]
fn rerendering_overwrites_existing_charts() {
    let table = scaling_table();
    let dir = tempdir().unwrap();
    let config = ChartConfig::default().with_out_dir(dir.path());
    let stale = dir.path().join(ChartKind::Time.file_name());
    fs::write(&stale, "stale").unwrap();

    render_all(&table, &config).unwrap();

    assert_ne!(fs::read(&stale).unwrap(), b"stale");
}

#[test]
fn efficiency_series_only_holds_weak_scaling_rows() {
    let table = scaling_table();
    let frame = table_frame(&table).unwrap();

    // hyper ran 8000 on 8 threads: 8000 / 8 = 1000 has a baseline
    let hyper = method_series(&frame, "hyper", Metric::Efficiency).unwrap();
    assert_eq!(hyper.len(), 1);
    assert_eq!(hyper[0].threads, 8);
    assert!((hyper[0].mean - 8.0 / 9.0).abs() < 1e-9);

    // task ran 1000 on 2 and 4 threads: 500 and 250 have no baseline
    assert!(method_series(&frame, "task", Metric::Efficiency).unwrap().is_empty());

    let task_speedup = method_series(&frame, "task", Metric::Speedup).unwrap();
    let threads: Vec<u32> = task_speedup.iter().map(|p| p.threads).collect();
    assert_eq!(threads, [2, 4]);
}

#[test]
fn summary_and_report_cover_the_same_methods() {
    let table = scaling_table();
    let config = ChartConfig::default();

    let text = format_summary(&table, &config).unwrap();
    for method in ["serial", "task", "simple", "hyper", "psrs"] {
        assert!(text.contains(&format!("METHOD: {}", method)), "{} missing", method);
    }

    let dir = tempdir().unwrap();
    let html = dir.path().join("report.html");
    write_html_report(&table, &config, &html).unwrap();
    let page = fs::read_to_string(&html).unwrap();
    assert!(page.contains("Simple"));
    assert!(page.contains("Hyper"));
}

#[test]
fn empty_results_cannot_be_charted() {
    let table = normalize_reader(HEADER.as_bytes(), DeriveOptions::default()).unwrap();
    let dir = tempdir().unwrap();
    let config = ChartConfig::default().with_out_dir(dir.path());

    assert!(matches!(render_all(&table, &config), Err(ChartError::Empty(_))));
}
