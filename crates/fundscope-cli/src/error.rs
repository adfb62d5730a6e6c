//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No holdings inputs were given on the command line or in the configuration.
    #[error("No holdings inputs. Pass --input PATH or list [[sources]] in the configuration file.")]
    NoInputs,

    /// The summary command has no stock universe to report on.
    #[error("No stock universe. Pass --universe PATH or add a [universe] table to the configuration file.")]
    MissingUniverse,

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Invalid argument value.
    #[error("Invalid value for {name}: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
