//! Config command implementation.
//!
//! Resolves the project configuration file and shows what was loaded.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::debug;

use fundscope_ext_file::{to_json_string, ProjectConfig};

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::error::CliError;
use crate::output::{print_header, print_table, print_warning, KeyValue};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "fundscope.toml";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration
    Show,

    /// Show which configuration file is used
    Path,
}

/// Finds the configuration file to load.
///
/// An explicit path (from `--config` or `FUNDSCOPE_CONFIG`) must exist.
/// Otherwise `./fundscope.toml` is used when present, then
/// `fundscope/fundscope.toml` under the user config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, CliError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(CliError::ConfigNotFound(path.to_path_buf()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    let user = dirs::config_dir().map(|dir| dir.join("fundscope").join(CONFIG_FILE_NAME));
    Ok(user.filter(|path| path.is_file()))
}

/// Loads the project configuration, or defaults when there is no file.
pub fn load_project(explicit: Option<&Path>) -> Result<(Option<PathBuf>, ProjectConfig)> {
    match resolve_config_path(explicit)? {
        Some(path) => {
            debug!(path = %path.display(), "using configuration file");
            let project = ProjectConfig::from_file(&path)?;
            Ok((Some(path), project))
        }
        None => {
            debug!("no configuration file, using defaults");
            Ok((None, ProjectConfig::default()))
        }
    }
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &RunContext) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

fn execute_show(ctx: &RunContext) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return ctx.output().deliver(&to_json_string(&ctx.project)?);
    }

    let project = &ctx.project;
    let aggregator = &project.aggregator;
    let mut rows = vec![
        KeyValue::new(
            "file",
            ctx.config_path
                .as_ref()
                .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
        ),
        KeyValue::new("aggregator.parallel", aggregator.parallel.to_string()),
        KeyValue::new(
            "aggregator.parallel_threshold",
            aggregator.parallel_threshold.to_string(),
        ),
        KeyValue::new("aggregator.aum_decimals", aggregator.aum_decimals.to_string()),
        KeyValue::new(
            "aggregator.score_decimals",
            aggregator.score_decimals.to_string(),
        ),
    ];
    for (category, stocks) in project.universe.iter() {
        rows.push(KeyValue::new(
            format!("universe.{category}"),
            format!("{} stock(s)", stocks.len()),
        ));
    }
    for input in project.inputs()? {
        rows.push(KeyValue::new("source", input.to_string()));
    }

    let output = ctx.output();
    if !output.is_table() {
        return output.emit("Configuration", &rows, &rows);
    }

    if !ctx.quiet {
        print_header("Configuration");
    }
    print_table(&rows);
    Ok(())
}

fn execute_path(ctx: &RunContext) -> Result<()> {
    match &ctx.config_path {
        Some(path) => println!("{}", path.display()),
        None => {
            if !ctx.quiet {
                print_warning(&format!(
                    "No configuration file found; create ./{CONFIG_FILE_NAME} or set FUNDSCOPE_CONFIG"
                ));
            }
        }
    }
    Ok(())
}
