//! Error types for the Fundscope core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core type construction and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A sentiment label that is not one of Buy, Hold, Trimmed or Exited.
    #[error("Unknown sentiment label: '{label}'")]
    UnknownSentiment {
        /// The label that failed to parse.
        label: String,
    },

    /// A scheme or stock name that is blank after trimming.
    #[error("Invalid {kind} name: '{value}'")]
    InvalidName {
        /// What the name identifies ("scheme" or "stock").
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl CoreError {
    /// Creates an unknown sentiment error.
    #[must_use]
    pub fn unknown_sentiment(label: impl Into<String>) -> Self {
        Self::UnknownSentiment {
            label: label.into(),
        }
    }

    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidName {
            kind,
            value: value.into(),
        }
    }
}
