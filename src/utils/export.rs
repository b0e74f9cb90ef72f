//! CSV export of the normalized table.
//!
//! One row per input row, short column names, undefined derived values as
//! empty cells. The header is always written, even for an empty table.
//! Overwrites the target file.

use std::{fs::create_dir_all, path::Path};

use csv::WriterBuilder;
use log::info;

use crate::deriver::{COLUMNS, NormalizedTable};
use crate::error::DeriveError;

pub fn export_normalized_csv<P: AsRef<Path>>(table: &NormalizedTable, path: P) -> Result<(), DeriveError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|source| DeriveError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(COLUMNS)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| DeriveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Normalized table ({} rows) exported to {}", table.len(), path.display());
    Ok(())
}
