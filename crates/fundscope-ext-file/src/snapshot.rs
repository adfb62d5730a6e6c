//! JSON holdings snapshots.

use std::path::{Path, PathBuf};

use fundscope_core::{HoldingRecord, HoldingRow, HoldingsSnapshot};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{FileError, FileResult};
use crate::source::HoldingsSource;

// =============================================================================
// PARSING
// =============================================================================

/// Parses a JSON holdings document.
///
/// Two layouts are accepted:
/// - an object mapping scheme names to record lists;
/// - a bare record list for a single scheme, attributed to `scheme`.
///
/// `origin` only labels errors.
pub fn parse_snapshot(
    text: &str,
    scheme: Option<&str>,
    origin: impl AsRef<Path>,
) -> FileResult<HoldingsSnapshot> {
    let origin = origin.as_ref();
    let document: Value = serde_json::from_str(text).map_err(|e| FileError::json(origin, e))?;

    match document {
        Value::Object(_) => {
            if let Some(scheme) = scheme {
                warn!(
                    path = %origin.display(),
                    scheme,
                    "scheme name ignored for a multi-scheme snapshot"
                );
            }
            serde_json::from_value(document).map_err(|e| FileError::json(origin, e))
        }
        Value::Array(_) => {
            let Some(scheme) = scheme else {
                return Err(FileError::invalid_source(
                    origin.display().to_string(),
                    "a record list needs a scheme name",
                ));
            };
            let records: Vec<HoldingRecord> =
                serde_json::from_value(document).map_err(|e| FileError::json(origin, e))?;
            Ok(HoldingsSnapshot::new().with_scheme(scheme, records)?)
        }
        _ => Err(FileError::invalid_source(
            origin.display().to_string(),
            "expected a JSON object or array",
        )),
    }
}

// =============================================================================
// JSON SNAPSHOT SOURCE
// =============================================================================

/// JSON file holding a snapshot or a single scheme's record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSnapshotSource {
    file_path: PathBuf,
    scheme: Option<String>,
}

impl JsonSnapshotSource {
    /// Creates a source for a multi-scheme snapshot.
    ///
    /// A bare record list in this file is attributed to the file stem.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            scheme: None,
        }
    }

    /// Creates a source for one scheme's record list.
    pub fn for_scheme(file_path: impl AsRef<Path>, scheme: impl Into<String>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            scheme: Some(scheme.into()),
        }
    }

    /// Path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the file as a snapshot.
    pub fn load_snapshot(&self) -> FileResult<HoldingsSnapshot> {
        let text = std::fs::read_to_string(&self.file_path)
            .map_err(|e| FileError::io(&self.file_path, e))?;

        let scheme = match &self.scheme {
            Some(scheme) => Some(scheme.clone()),
            None if is_record_list(&text) => self
                .file_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned()),
            None => None,
        };
        let snapshot = parse_snapshot(&text, scheme.as_deref(), &self.file_path)?;

        info!(
            path = %self.file_path.display(),
            schemes = snapshot.scheme_count(),
            records = snapshot.record_count(),
            "loaded holdings snapshot"
        );
        Ok(snapshot)
    }
}

impl HoldingsSource for JsonSnapshotSource {
    fn describe(&self) -> String {
        match &self.scheme {
            Some(scheme) => format!("{scheme}={}", self.file_path.display()),
            None => self.file_path.display().to_string(),
        }
    }

    fn load(&self) -> FileResult<Vec<HoldingRow>> {
        Ok(self.load_snapshot()?.to_rows())
    }
}

fn is_record_list(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scheme_map() {
        let text = r#"{
            "F1": [{"stock": "AAA", "percent_aum": 1.5, "sentiment": "Buy"}],
            "F2": [{"Stock": "BBB", "% AUM": "2.5%"}, {"stock": "CCC"}]
        }"#;
        let snapshot = parse_snapshot(text, None, "inline.json").unwrap();
        assert_eq!(snapshot.scheme_count(), 2);
        assert_eq!(snapshot.record_count(), 3);

        let f2 = snapshot.get("F2").unwrap();
        assert_eq!(f2[0].stock, "BBB");
        assert_eq!(f2[0].percent_aum, Some(2.5));
    }

    #[test]
    fn test_parse_record_list_needs_scheme() {
        let text = r#"[{"stock": "AAA"}]"#;
        let snapshot = parse_snapshot(text, Some("Axis Midcap"), "inline.json").unwrap();
        assert_eq!(snapshot.get("Axis Midcap").unwrap().len(), 1);

        let err = parse_snapshot(text, None, "inline.json").unwrap_err();
        assert!(matches!(err, FileError::InvalidSource { .. }));
    }

    #[test]
    fn test_parse_rejects_scalars_and_bad_json() {
        assert!(matches!(
            parse_snapshot("42", None, "x.json").unwrap_err(),
            FileError::InvalidSource { .. }
        ));
        assert!(matches!(
            parse_snapshot("{not json", None, "x.json").unwrap_err(),
            FileError::Json { .. }
        ));
    }

    #[test]
    fn test_bad_cells_skip_only_their_row() {
        let text = r#"{"F1": [
            {"stock": "AAA", "percent_aum": 1.0},
            {"stock": null, "percent_aum": 2.0},
            {"stock": 42, "sentiment": 3}
        ]}"#;
        let rows = parse_snapshot(text, None, "x.json").unwrap().to_rows();
        assert_eq!(rows.len(), 3);

        let usable: Vec<_> = rows.iter().filter(|r| r.is_well_formed()).collect();
        assert_eq!(usable.len(), 2);
        assert_eq!(usable[0].stock, "AAA");
        assert_eq!(usable[1].stock, "42");
        assert_eq!(usable[1].sentiment, None);
    }

    #[test]
    fn test_unknown_sentiment_is_missing() {
        let text = r#"{"F1": [{"stock": "AAA", "sentiment": "sideways"}]}"#;
        let rows = parse_snapshot(text, None, "x.json").unwrap().to_rows();
        assert_eq!(rows[0].sentiment, None);
    }
}
