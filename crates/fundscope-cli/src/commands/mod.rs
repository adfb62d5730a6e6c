//! CLI command implementations.

pub mod config;
pub mod conviction;
pub mod overlap;
pub mod schemes;
pub mod stocks;
pub mod summary;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use conviction::ConvictionArgs;
pub use overlap::OverlapArgs;
pub use schemes::SchemesArgs;
pub use stocks::StocksArgs;
pub use summary::SummaryArgs;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::debug;

use fundscope_core::HoldingRow;
use fundscope_ext_file::{load_rows, InputSpec, ProjectConfig};
use fundscope_holdings::AggregatorConfig;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::Output;

/// Holdings inputs shared by the aggregation commands.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Holdings input: a .json snapshot, a .csv table, or NAME=PATH for one
    /// scheme's record list. Repeatable; replaces the configured sources.
    #[arg(short, long = "input", value_name = "INPUT")]
    pub inputs: Vec<String>,
}

/// Global options and the resolved project configuration.
#[derive(Debug, Default)]
pub struct RunContext {
    /// Output format.
    pub format: OutputFormat,
    /// Output file.
    pub output: Option<PathBuf>,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Path of the loaded configuration file.
    pub config_path: Option<PathBuf>,
    /// Loaded configuration; defaults when no file was found.
    pub project: ProjectConfig,
}

impl RunContext {
    /// Aggregator settings from the configuration.
    pub fn aggregator(&self) -> &AggregatorConfig {
        &self.project.aggregator
    }

    /// Output target of the command.
    pub fn output(&self) -> Output<'_> {
        Output {
            format: self.format,
            path: self.output.as_deref(),
            quiet: self.quiet,
        }
    }

    /// Loads holding rows from `--input` arguments, or from the configured
    /// sources when none are given.
    pub fn load_rows(&self, args: &InputArgs) -> Result<Vec<HoldingRow>> {
        let inputs = self.resolve_inputs(args)?;
        let rows = load_rows(&inputs).context("failed to load holdings")?;
        debug!(inputs = inputs.len(), rows = rows.len(), "loaded holdings");
        Ok(rows)
    }

    fn resolve_inputs(&self, args: &InputArgs) -> Result<Vec<InputSpec>> {
        if !args.inputs.is_empty() {
            return args
                .inputs
                .iter()
                .map(|spec| InputSpec::parse(spec).map_err(Into::into))
                .collect();
        }

        let inputs = self.project.inputs()?;
        if inputs.is_empty() {
            return Err(CliError::NoInputs.into());
        }
        Ok(inputs)
    }
}

/// Validates a `--top` limit.
pub fn validate_top(top: Option<usize>) -> CliResult<Option<usize>> {
    match top {
        Some(0) => Err(CliError::InvalidArgument {
            name: "--top",
            reason: "must be at least 1".to_string(),
        }),
        other => Ok(other),
    }
}

/// Keeps the first `top` items when a limit is given.
pub fn truncate<T>(mut items: Vec<T>, top: Option<usize>) -> Vec<T> {
    if let Some(top) = top {
        items.truncate(top);
    }
    items
}
