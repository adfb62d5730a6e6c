//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, ConvictionArgs, OverlapArgs, SchemesArgs, StocksArgs, SummaryArgs,
};

/// Fundscope - Mutual-fund holdings conviction and overlap analytics
#[derive(Parser)]
#[command(name = "fundscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout (CSV unless --format json)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    /// Project configuration file (TOML or JSON)
    #[arg(short, long, value_name = "PATH", env = "FUNDSCOPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Summarize stocks: fund count, average % AUM and dominant sentiment
    Stocks(StocksArgs),

    /// Summarize the stocks of each stock universe category
    Summary(SummaryArgs),

    /// Rank stocks by the share of schemes holding them
    Conviction(ConvictionArgs),

    /// Compare schemes by the stocks they hold in common
    Overlap(OverlapArgs),

    /// Summarize the holdings of each scheme
    Schemes(SchemesArgs),

    /// Show the resolved project configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
