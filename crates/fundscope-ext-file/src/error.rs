//! Error types for file sources and exporters.

use std::path::{Path, PathBuf};

use fundscope_core::CoreError;
use fundscope_holdings::HoldingsError;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading inputs or writing reports.
#[derive(Debug, Error)]
pub enum FileError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or written.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A CSV table could not be parsed or written.
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// A TOML document could not be parsed.
    #[error("TOML error in {}: {source}", path.display())]
    Toml {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// An input specification cannot be turned into a holdings source.
    #[error("Invalid source '{spec}': {reason}")]
    InvalidSource {
        /// The offending specification.
        spec: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Aggregation error.
    #[error(transparent)]
    Holdings(#[from] HoldingsError),

    /// Domain type error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FileError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a JSON error for `path`.
    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a CSV error for `path`.
    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a TOML error for `path`.
    pub fn toml(path: impl AsRef<Path>, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid source error.
    pub fn invalid_source(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FileError::io(
            "data/holdings.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("data/holdings.json"));

        let err = FileError::invalid_source("=x.json", "empty scheme name");
        assert_eq!(err.to_string(), "Invalid source '=x.json': empty scheme name");

        let err: FileError = HoldingsError::no_usable_rows(2).into();
        assert!(err.to_string().contains("all 2 rows"));
    }
}
