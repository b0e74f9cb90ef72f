//! table.rs
//! Normalized benchmark table: short column names plus derived speedup and
//! efficiency, each with its propagated standard deviation.
//!
//! Pipeline: read rows → report unsorted rows → attach scaling families →
//! serial baselines per `n` → `sp` keyed on `n`, `eff` keyed on `n / th`.

use serde::Serialize;
use std::{fmt, fs::File, io::Read, path::Path};

use log::{info, warn};

use crate::deriver::{
    baseline::Baselines,
    propagation::{Measurement, ratio},
    record::{LocatedRecord, RawRecord, read_records},
};
use crate::error::{DeriveError, Result};

/// Output column order of the normalized table.
pub const COLUMNS: [&str; 12] = [
    "th", "n", "n_sci", "t", "std", "min", "max", "method", "sp", "sp_std", "eff", "eff_std",
];

/// Which baselines a row can be compared against.
///
/// `strong` is the row's own problem size (speedup). `weak` is the per-thread
/// size `n / th`, present only when the division is exact (efficiency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalingFamily {
    pub strong: u64,
    pub weak: Option<u64>,
}

impl ScalingFamily {
    pub fn of(n: u64, th: u32) -> Self {
        let th = u64::from(th);
        let weak = (th != 0 && n % th == 0).then(|| n / th);
        Self { strong: n, weak }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub th: u32,
    pub n: u64,
    pub n_sci: u64,
    pub t: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub method: String,
    pub sp: Option<f64>,
    pub sp_std: Option<f64>,
    pub eff: Option<f64>,
    pub eff_std: Option<f64>,
    #[serde(skip)]
    pub family: ScalingFamily,
}

impl NormalizedRow {
    fn from_raw(raw: RawRecord) -> Self {
        Self {
            family: ScalingFamily::of(raw.elements, raw.threads),
            th: raw.threads,
            n: raw.elements,
            n_sci: raw.elements_sci,
            t: raw.time,
            std: raw.std,
            min: raw.min,
            max: raw.max,
            method: raw.method,
            sp: None,
            sp_std: None,
            eff: None,
            eff_std: None,
        }
    }

    fn measurement(&self) -> Measurement {
        Measurement::new(self.t, self.std)
    }

    pub fn speedup(&self) -> Option<Measurement> {
        Some(Measurement::new(self.sp?, self.sp_std?))
    }

    pub fn efficiency(&self) -> Option<Measurement> {
        Some(Measurement::new(self.eff?, self.eff_std?))
    }
}

/// A row whose `Sorted` flag was not affirmative.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsortedRow {
    pub line: u64,
    pub method: String,
    pub threads: u32,
    pub elements: u64,
    pub sorted: String,
}

impl fmt::Display for UnsortedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: method={} threads={} elements={} sorted={:?}",
            self.line, self.method, self.threads, self.elements, self.sorted
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveOptions {
    /// Treat a problem size with no single-thread rows as fatal.
    pub require_baselines: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    rows: Vec<NormalizedRow>,
    baselines: Baselines,
    unsorted: Vec<UnsortedRow>,
    missing_baselines: Vec<u64>,
}

impl NormalizedTable {
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn baselines(&self) -> &Baselines {
        &self.baselines
    }

    /// Rows flagged by the sortedness check, in file order.
    pub fn unsorted_rows(&self) -> &[UnsortedRow] {
        &self.unsorted
    }

    /// Problem sizes present in the table without a single-thread baseline.
    pub fn missing_baselines(&self) -> &[u64] {
        &self.missing_baselines
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_threads(&self) -> Option<u32> {
        self.rows.iter().map(|r| r.th).max()
    }

    pub fn rows_for<'a>(&'a self, method: &'a str) -> impl Iterator<Item = &'a NormalizedRow> + 'a {
        self.rows.iter().filter(move |r| r.method == method)
    }
}

/// Loads and normalizes one benchmark CSV.
pub fn normalize<P: AsRef<Path>>(path: P) -> Result<NormalizedTable> {
    normalize_with(path, DeriveOptions::default())
}

pub fn normalize_with<P: AsRef<Path>>(path: P, options: DeriveOptions) -> Result<NormalizedTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DeriveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Reading benchmark results from {}", path.display());
    normalize_reader(file, options)
}

pub fn normalize_reader<R: Read>(reader: R, options: DeriveOptions) -> Result<NormalizedTable> {
    let records = read_records(reader)?;
    let unsorted = check_sorted(&records);
    derive(records, unsorted, options)
}

/// Advisory only: every flagged row is logged and kept.
fn check_sorted(records: &[LocatedRecord]) -> Vec<UnsortedRow> {
    let unsorted: Vec<UnsortedRow> = records
        .iter()
        .filter(|r| !r.record.is_sorted())
        .map(|r| UnsortedRow {
            line: r.line,
            method: r.record.method.clone(),
            threads: r.record.threads,
            elements: r.record.elements,
            sorted: r.record.sorted.clone(),
        })
        .collect();

    if !unsorted.is_empty() {
        warn!("{} row(s) not marked as sorted:", unsorted.len());
        for row in &unsorted {
            warn!("  {}", row);
        }
    }
    unsorted
}

fn derive(
    records: Vec<LocatedRecord>,
    unsorted: Vec<UnsortedRow>,
    options: DeriveOptions,
) -> Result<NormalizedTable> {
    let baselines = Baselines::from_records(records.iter().map(|r| &r.record));

    let mut sizes: Vec<u64> = records.iter().map(|r| r.record.elements).collect();
    sizes.sort_unstable();
    sizes.dedup();
    let missing: Vec<u64> = sizes
        .into_iter()
        .filter(|n| baselines.get(*n).is_none())
        .collect();

    if !missing.is_empty() {
        if options.require_baselines {
            return Err(DeriveError::MissingBaseline { sizes: missing });
        }
        warn!("No single-thread baseline for sizes {:?}; their speedup stays undefined", missing);
    }

    let mut rows: Vec<NormalizedRow> = records
        .into_iter()
        .map(|r| NormalizedRow::from_raw(r.record))
        .collect();

    for row in rows.iter_mut() {
        if let Some(base) = baselines.get(row.family.strong) {
            let sp = ratio(base, row.measurement());
            row.sp = Some(sp.value);
            row.sp_std = Some(sp.std);
        }
        if let Some(base) = row.family.weak.and_then(|n| baselines.get(n)) {
            let eff = ratio(base, row.measurement());
            row.eff = Some(eff.value);
            row.eff_std = Some(eff.std);
        }
    }

    info!(
        "Normalized {} rows ({} baselines, {} unsorted)",
        rows.len(),
        baselines.len(),
        unsorted.len()
    );

    Ok(NormalizedTable {
        rows,
        baselines,
        unsorted,
        missing_baselines: missing,
    })
}
