//! Error types for holdings aggregation.
//!
//! This module defines the error types used throughout the holdings crate.
//! Missing optional data never produces an error; only input that cannot be
//! aggregated at all does.

use thiserror::Error;

/// Result type for holdings operations.
pub type HoldingsResult<T> = Result<T, HoldingsError>;

/// Errors that can occur during holdings aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoldingsError {
    /// Every input row lacked a scheme or a stock name.
    #[error("No usable holding rows: all {total} rows lack a scheme or stock name")]
    NoUsableRows {
        /// Number of rows that were supplied.
        total: usize,
    },

    /// The scheme and stock columns of a flat table could not be identified.
    #[error("Cannot identify scheme and stock columns in headers {headers:?}")]
    ColumnResolution {
        /// The table headers that were inspected.
        headers: Vec<String>,
    },

    /// Invalid aggregator configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

impl HoldingsError {
    /// Create a no usable rows error.
    #[must_use]
    pub fn no_usable_rows(total: usize) -> Self {
        Self::NoUsableRows { total }
    }

    /// Create a column resolution error.
    #[must_use]
    pub fn column_resolution<S: AsRef<str>>(headers: &[S]) -> Self {
        Self::ColumnResolution {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        }
    }

    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
