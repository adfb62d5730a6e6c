//! Holdings sources and input specifications.

use std::fmt;
use std::path::{Path, PathBuf};

use fundscope_core::HoldingRow;
use tracing::debug;

use crate::config::SourceSpec;
use crate::error::{FileError, FileResult};
use crate::snapshot::JsonSnapshotSource;
use crate::table::CsvTableSource;

/// Anything that yields flat holding rows.
pub trait HoldingsSource: Send + Sync {
    /// Short human-readable label, used in logs and errors.
    fn describe(&self) -> String;

    /// Reads every holding row of the source.
    fn load(&self) -> FileResult<Vec<HoldingRow>>;
}

/// A parsed input argument: what to read and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// Multi-scheme JSON snapshot.
    Snapshot(PathBuf),
    /// Single-scheme JSON record list with an explicit scheme name.
    SchemeList {
        /// Scheme the records belong to.
        scheme: String,
        /// JSON file path.
        path: PathBuf,
    },
    /// Flat CSV table.
    Table(PathBuf),
}

impl InputSpec {
    /// Parses `PATH.json`, `PATH.csv` or `NAME=PATH`.
    pub fn parse(spec: &str) -> FileResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(FileError::invalid_source(spec, "empty input"));
        }

        if let Some((scheme, path)) = spec.split_once('=') {
            let scheme = scheme.trim();
            let path = path.trim();
            if scheme.is_empty() {
                return Err(FileError::invalid_source(spec, "empty scheme name"));
            }
            if path.is_empty() {
                return Err(FileError::invalid_source(spec, "empty path"));
            }
            return Ok(InputSpec::SchemeList {
                scheme: scheme.to_string(),
                path: PathBuf::from(path),
            });
        }

        Self::from_path(spec)
    }

    /// Chooses the input kind from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(InputSpec::Snapshot(path.to_path_buf())),
            "csv" => Ok(InputSpec::Table(path.to_path_buf())),
            _ => Err(FileError::invalid_source(
                path.display().to_string(),
                "expected a .json or .csv file, or NAME=PATH",
            )),
        }
    }

    /// Builds the input of a configured source, resolving relative paths
    /// against `base_dir`.
    pub fn from_source_spec(source: &SourceSpec, base_dir: &Path) -> FileResult<Self> {
        let path = if source.path.is_absolute() {
            source.path.clone()
        } else {
            base_dir.join(&source.path)
        };

        match &source.scheme {
            Some(scheme) if scheme.trim().is_empty() => Err(FileError::invalid_source(
                source.path.display().to_string(),
                "empty scheme name",
            )),
            Some(scheme) => Ok(InputSpec::SchemeList {
                scheme: scheme.trim().to_string(),
                path,
            }),
            None => Self::from_path(path),
        }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        match self {
            InputSpec::Snapshot(path) | InputSpec::Table(path) => path,
            InputSpec::SchemeList { path, .. } => path,
        }
    }

    /// Creates the source that reads this input.
    pub fn to_source(&self) -> Box<dyn HoldingsSource> {
        match self {
            InputSpec::Snapshot(path) => Box::new(JsonSnapshotSource::new(path)),
            InputSpec::SchemeList { scheme, path } => {
                Box::new(JsonSnapshotSource::for_scheme(path, scheme.clone()))
            }
            InputSpec::Table(path) => Box::new(CsvTableSource::new(path)),
        }
    }
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSpec::Snapshot(path) | InputSpec::Table(path) => write!(f, "{}", path.display()),
            InputSpec::SchemeList { scheme, path } => write!(f, "{scheme}={}", path.display()),
        }
    }
}

/// Loads and concatenates the rows of every input, in order.
pub fn load_rows(inputs: &[InputSpec]) -> FileResult<Vec<HoldingRow>> {
    let mut rows = Vec::new();
    for input in inputs {
        let source = input.to_source();
        let loaded = source.load()?;
        debug!(source = %source.describe(), rows = loaded.len(), "read holdings source");
        rows.extend(loaded);
    }
    Ok(rows)
}
