// src/storage/results.rs
use std::io::Write;
use std::path::Path;

use crate::extractors::report::{ExtractedRow, COLUMNS};
use crate::utils::error::StorageError;

/// Writes the collected rows as one CSV table with a header row.
pub fn write_results<P: AsRef<Path>>(path: P, rows: &[ExtractedRow]) -> Result<(), StorageError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_rows(file, rows)?;
    tracing::info!("Saved {} rows to {}", rows.len(), path.as_ref().display());
    Ok(())
}

pub fn write_rows<W: Write>(writer: W, rows: &[ExtractedRow]) -> Result<(), StorageError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS)?;
    for row in rows {
        csv.write_record(row.to_record())?;
    }
    csv.flush()?;
    Ok(())
}
