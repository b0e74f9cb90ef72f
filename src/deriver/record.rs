//! record.rs
//! Raw benchmark rows as written by the OpenMP scaling driver.
//!
//! The header spellings below are the file contract; they are matched exactly
//! (after whitespace trimming) and in any column order.

use serde::{Deserialize, Deserializer, de::Error as _};
use std::io::Read;

use crate::error::{DeriveError, Result};

pub const COL_SORTED: &str = "Sorted";
pub const COL_THREADS: &str = "Threads";
pub const COL_ELEMENTS: &str = "Elements";
pub const COL_ELEMENTS_SCI: &str = "Elements (Scientific)";
pub const COL_TIME: &str = "Average time (s)";
pub const COL_STD: &str = "St. Deviation (s)";
pub const COL_MIN: &str = "Min (s)";
pub const COL_MAX: &str = "Max (s)";
pub const COL_METHOD: &str = "Method";

/// Every header the input must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_SORTED,
    COL_THREADS,
    COL_ELEMENTS,
    COL_ELEMENTS_SCI,
    COL_TIME,
    COL_STD,
    COL_MIN,
    COL_MAX,
    COL_METHOD,
];

/// Affirmative value of the `Sorted` column.
pub const SORTED_YES: &str = "Yes";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Sorted")]
    pub sorted: String,
    #[serde(rename = "Threads")]
    pub threads: u32,
    #[serde(rename = "Elements")]
    pub elements: u64,
    #[serde(rename = "Elements (Scientific)", deserialize_with = "integral_from_float")]
    pub elements_sci: u64,
    #[serde(rename = "Average time (s)")]
    pub time: f64,
    #[serde(rename = "St. Deviation (s)")]
    pub std: f64,
    #[serde(rename = "Min (s)")]
    pub min: f64,
    #[serde(rename = "Max (s)")]
    pub max: f64,
    #[serde(rename = "Method")]
    pub method: String,
}

impl RawRecord {
    pub fn is_sorted(&self) -> bool {
        self.sorted == SORTED_YES
    }
}

/// A raw record together with the 1-based file line it came from.
#[derive(Debug, Clone)]
pub struct LocatedRecord {
    pub line: u64,
    pub record: RawRecord,
}

/// The driver prints the scientific column with `%e` (`1.000000e+08`);
/// plain integers are accepted too. Fractions are truncated.
fn integral_from_float<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(D::Error::custom(format!(
            "expected a non-negative element count, got {}",
            value
        )));
    }
    Ok(value.trunc() as u64)
}

/// Reads every row, failing on the first schema or coercion problem.
///
/// The header is checked before any data row is touched so a file without,
/// say, `Method` is rejected even when it has no rows at all.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<LocatedRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DeriveError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record: RawRecord = row
            .deserialize(Some(&headers))
            .map_err(|err| coercion_error(err, &headers, line))?;
        records.push(LocatedRecord { line, record });
    }

    Ok(records)
}

fn coercion_error(err: csv::Error, headers: &csv::StringRecord, line: u64) -> DeriveError {
    let detail = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => Some((de.field(), de.kind().to_string())),
        _ => None,
    };

    match detail {
        Some((field, message)) => DeriveError::TypeCoercion {
            line,
            column: field
                .and_then(|idx| headers.get(idx as usize))
                .unwrap_or("?")
                .to_string(),
            message,
        },
        None => DeriveError::Csv(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\"Method\",\"Sorted\",\"Threads\",\"Elements\",\"Elements (Scientific)\",\"Average time (s)\",\"St. Deviation (s)\",\"Min (s)\",\"Max (s)\"\n";

    #[test]
    fn parses_driver_output_with_padding_and_sci_notation() {
        let data = format!(
            "{}task, Yes,4,100000000,1.000000e+08,2.500000,0.100000,2.400000,2.600000\n",
            HEADER
        );
        let rows = read_records(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0].record;
        assert_eq!(rows[0].line, 2);
        assert_eq!(r.method, "task");
        assert!(r.is_sorted());
        assert_eq!(r.threads, 4);
        assert_eq!(r.elements, 100_000_000);
        assert_eq!(r.elements_sci, 100_000_000);
        assert!((r.time - 2.5).abs() < 1e-12);
    }

    #[test]
    fn missing_method_column_is_schema_error() {
        let data = "Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\nYes,1,100,100,1.0,0.1,0.9,1.1\n";
        match read_records(data.as_bytes()) {
            Err(DeriveError::MissingColumn { column }) => assert_eq!(column, COL_METHOD),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn header_only_file_without_method_is_rejected() {
        let data = "Sorted,Threads,Elements,Elements (Scientific),Average time (s),St. Deviation (s),Min (s),Max (s)\n";
        assert!(matches!(
            read_records(data.as_bytes()),
            Err(DeriveError::MissingColumn { .. })
        ));
    }

    #[test]
    fn non_numeric_time_names_line_and_column() {
        let data = format!(
            "{}serial,Yes,1,100,100,1.0,0.1,0.9,1.1\ntask,Yes,2,100,100,fast,0.1,0.9,1.1\n",
            HEADER
        );
        match read_records(data.as_bytes()) {
            Err(DeriveError::TypeCoercion { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, COL_TIME);
            }
            other => panic!("expected coercion error, got {:?}", other),
        }
    }

    #[test]
    fn negative_sci_count_is_rejected() {
        let data = format!("{}serial,Yes,1,100,-1e2,1.0,0.1,0.9,1.1\n", HEADER);
        assert!(matches!(
            read_records(data.as_bytes()),
            Err(DeriveError::TypeCoercion { .. })
        ));
    }
}
