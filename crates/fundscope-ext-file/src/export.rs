//! CSV and JSON report exporters.

use std::io::Write;
use std::path::Path;

use fundscope_holdings::{RecordColumns, SchemeOverlap};
use serde::Serialize;
use tracing::info;

use crate::error::{FileError, FileResult};

/// Label used in errors for in-memory and stream writers.
const STREAM: &str = "<output>";

// =============================================================================
// CSV
// =============================================================================

/// Writes records as CSV with a header row.
///
/// An empty record list writes the header row alone.
pub fn write_csv<T, W>(writer: W, records: &[T]) -> FileResult<()>
where
    T: Serialize + RecordColumns,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv_writer
            .write_record(T::COLUMNS)
            .map_err(|e| FileError::csv(STREAM, e))?;
    }
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| FileError::csv(STREAM, e))?;
    }
    csv_writer.flush().map_err(|e| FileError::io(STREAM, e))
}

/// Renders records as a CSV string.
pub fn to_csv_string<T: Serialize + RecordColumns>(records: &[T]) -> FileResult<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the overlap matrix as CSV: a `Scheme` column followed by one
/// column per scheme.
pub fn write_matrix_csv<W: Write>(writer: W, overlap: &SchemeOverlap) -> FileResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(overlap.scheme_count() + 1);
    header.push("Scheme".to_string());
    header.extend(overlap.schemes.iter().cloned());
    csv_writer
        .write_record(&header)
        .map_err(|e| FileError::csv(STREAM, e))?;

    for (scheme, row) in overlap.schemes.iter().zip(&overlap.matrix) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(scheme.clone());
        record.extend(row.iter().map(ToString::to_string));
        csv_writer
            .write_record(&record)
            .map_err(|e| FileError::csv(STREAM, e))?;
    }

    csv_writer.flush().map_err(|e| FileError::io(STREAM, e))
}

/// Renders the overlap matrix as a CSV string.
pub fn matrix_to_csv_string(overlap: &SchemeOverlap) -> FileResult<String> {
    let mut buffer = Vec::new();
    write_matrix_csv(&mut buffer, overlap)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

// =============================================================================
// JSON
// =============================================================================

/// Writes a value as pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized, W: Write>(mut writer: W, value: &T) -> FileResult<()> {
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| FileError::json(STREAM, e))?;
    writeln!(writer).map_err(|e| FileError::io(STREAM, e))
}

/// Renders a value as pretty-printed JSON.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> FileResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| FileError::json(STREAM, e))
}

// =============================================================================
// FILES
// =============================================================================

/// Writes rendered report text to `path`, replacing any existing file.
pub fn write_report(path: impl AsRef<Path>, contents: &str) -> FileResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| FileError::io(path, e))?;

    info!(path = %path.display(), bytes = contents.len(), "wrote report");
    Ok(())
}
