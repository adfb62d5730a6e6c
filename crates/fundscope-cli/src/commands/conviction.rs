//! Conviction command implementation.
//!
//! Ranks stocks by the percentage of schemes holding them.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use tabled::Tabled;

use fundscope_holdings::{
    compute_conviction, filter_by_category, ConvictionCategory, ConvictionRecord, ConvictionRow,
};

use crate::commands::{truncate, validate_top, InputArgs, RunContext};

/// Conviction category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    /// Held by at least half of the schemes
    High,
    /// Held by at least a quarter of the schemes
    Medium,
    /// Held by fewer than a quarter of the schemes
    Low,
}

impl From<CategoryFilter> for ConvictionCategory {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::High => ConvictionCategory::High,
            CategoryFilter::Medium => ConvictionCategory::Medium,
            CategoryFilter::Low => ConvictionCategory::Low,
        }
    }
}

/// Arguments for the conviction command.
#[derive(Args, Debug)]
pub struct ConvictionArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only one conviction category
    #[arg(long, value_enum)]
    pub category: Option<CategoryFilter>,

    /// Show at most N stocks
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,
}

/// Table view of a conviction row.
#[derive(Tabled)]
pub struct ConvictionTableRow {
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Schemes")]
    scheme_count: usize,
    #[tabled(rename = "Appearances")]
    appearances: usize,
    #[tabled(rename = "Held By")]
    schemes: String,
}

impl From<&ConvictionRow> for ConvictionTableRow {
    fn from(row: &ConvictionRow) -> Self {
        Self {
            stock: row.stock.clone(),
            score: format!("{:.1}%", row.conviction_score),
            category: row.category.to_string(),
            scheme_count: row.scheme_count,
            appearances: row.total_appearances,
            schemes: row.schemes.join(", "),
        }
    }
}

/// Execute the conviction command.
pub fn execute(args: ConvictionArgs, ctx: &RunContext) -> Result<()> {
    let top = validate_top(args.top)?;
    let rows = ctx.load_rows(&args.input)?;

    let mut conviction = compute_conviction(&rows, ctx.aggregator())?;
    if let Some(category) = args.category {
        conviction = filter_by_category(&conviction, category.into());
    }
    let conviction = truncate(conviction, top);

    let records: Vec<ConvictionRecord> = conviction.iter().map(Into::into).collect();
    let table: Vec<ConvictionTableRow> = conviction.iter().map(Into::into).collect();
    ctx.output().emit("Conviction", &records, &table)?;

    if ctx.output().is_table() && !ctx.quiet && !conviction.is_empty() {
        let high = conviction
            .iter()
            .filter(|r| r.category == ConvictionCategory::High)
            .count();
        println!(
            "{} high-conviction stock(s) of {} shown",
            high.to_string().green().bold(),
            conviction.len()
        );
    }
    Ok(())
}
