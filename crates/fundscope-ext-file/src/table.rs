//! CSV flat-table sources.

use std::io::Read;
use std::path::{Path, PathBuf};

use fundscope_core::HoldingRow;
use fundscope_holdings::rows_from_table;
use tracing::{debug, info};

use crate::error::{FileError, FileResult};
use crate::source::HoldingsSource;

/// Reads a flat holdings table from CSV text.
///
/// Cells are trimmed and ragged records are allowed; short records read as
/// blank cells. Bytes that are not valid UTF-8 are replaced rather than
/// failing the table. `origin` only labels errors.
pub fn read_table<R: Read>(reader: R, origin: impl AsRef<Path>) -> FileResult<Vec<HoldingRow>> {
    let origin = origin.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| FileError::csv(origin, e))?
        .iter()
        .map(decode_cell)
        .collect();

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| FileError::csv(origin, e))?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            debug!(
                path = %origin.display(),
                line = record.position().map(|p| p.line()),
                "replacing invalid UTF-8 in table record"
            );
        }
        records.push(record.iter().map(decode_cell).collect::<Vec<_>>());
    }

    Ok(rows_from_table(&headers, &records)?)
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// CSV file with one holding per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTableSource {
    file_path: PathBuf,
}

impl CsvTableSource {
    /// Creates a source for a CSV table.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl HoldingsSource for CsvTableSource {
    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }

    fn load(&self) -> FileResult<Vec<HoldingRow>> {
        let file =
            std::fs::File::open(&self.file_path).map_err(|e| FileError::io(&self.file_path, e))?;
        let rows = read_table(file, &self.file_path)?;

        info!(
            path = %self.file_path.display(),
            rows = rows.len(),
            "loaded holdings table"
        );
        Ok(rows)
    }
}
