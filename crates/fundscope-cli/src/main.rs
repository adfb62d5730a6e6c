//! Fundscope CLI - Command-line interface for mutual-fund holdings analytics.
//!
//! # Usage
//!
//! ```bash
//! # Summarize every stock across a holdings snapshot
//! fundscope stocks --input holdings.json
//!
//! # Rank stocks by conviction, high category only
//! fundscope conviction --input holdings.json --category high
//!
//! # Pairwise scheme overlap as CSV
//! fundscope overlap --input holdings.json --format csv --output overlap.csv
//!
//! # Category summary against a stock universe
//! fundscope summary --input holdings.json --universe universe.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::RunContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let (config_path, project) = commands::config::load_project(cli.config.as_deref())?;
    let ctx = RunContext {
        format: cli.format,
        output: cli.output,
        quiet: cli.quiet,
        config_path,
        project,
    };

    match cli.command {
        Commands::Stocks(args) => commands::stocks::execute(args, &ctx)?,
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Conviction(args) => commands::conviction::execute(args, &ctx)?,
        Commands::Overlap(args) => commands::overlap::execute(args, &ctx)?,
        Commands::Schemes(args) => commands::schemes::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so reports on stdout stay clean.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("fundscope=debug,fundscope_holdings=debug,fundscope_ext_file=debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
