//! Summary command implementation.
//!
//! Reports, for each category of the stock universe, how many schemes hold
//! each listed stock.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use fundscope_ext_file::{load_universe, to_csv_string};
use fundscope_holdings::{
    category_records, summarize_categories, RecordColumns, StockSummaryRecord, StockUniverse,
};

use crate::commands::stocks::StockRow;
use crate::commands::{InputArgs, RunContext};
use crate::error::CliError;
use crate::output::{print_header, print_table};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Stock universe file (TOML or JSON mapping category to stock list);
    /// defaults to the configuration's [universe] table
    #[arg(short, long, value_name = "PATH")]
    pub universe: Option<PathBuf>,

    /// Summarize only this category (repeatable)
    #[arg(long = "only", value_name = "CATEGORY")]
    pub only: Vec<String>,
}

/// Flat CSV layout of a category summary.
#[derive(Debug, Serialize)]
struct CategoryCsvRecord<'a> {
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Stock")]
    stock: &'a str,
    #[serde(rename = "# Funds Holding")]
    funds_holding: usize,
    #[serde(rename = "Avg % AUM")]
    avg_percent_aum: f64,
    #[serde(rename = "Sentiment")]
    sentiment: &'a str,
}

impl RecordColumns for CategoryCsvRecord<'_> {
    const COLUMNS: &'static [&'static str] =
        &["Category", "Stock", "# Funds Holding", "Avg % AUM", "Sentiment"];
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &RunContext) -> Result<()> {
    let universe = resolve_universe(&args, ctx)?;
    let rows = ctx.load_rows(&args.input)?;
    let summary = summarize_categories(&rows, &universe, ctx.aggregator())?;
    let output = ctx.output();

    if output.is_table() {
        for (category, stocks) in &summary {
            if !ctx.quiet {
                print_header(&category_title(category));
            }
            let table: Vec<StockRow> = stocks.iter().map(Into::into).collect();
            print_table(&table);
        }
        return Ok(());
    }

    let records = category_records(&summary);
    let flat: Vec<CategoryCsvRecord<'_>> = records
        .iter()
        .flat_map(|(category, stocks)| stocks.iter().map(move |r| flatten(category, r)))
        .collect();
    output.emit_document(&records, Some(to_csv_string(&flat)?))
}

fn resolve_universe(args: &SummaryArgs, ctx: &RunContext) -> Result<StockUniverse> {
    let universe = match &args.universe {
        Some(path) => load_universe(path)?,
        None => ctx.project.universe.clone(),
    };

    let universe = if args.only.is_empty() {
        universe
    } else {
        let mut selected = StockUniverse::new();
        for key in &args.only {
            let stocks = universe.stocks(key).ok_or_else(|| CliError::InvalidArgument {
                name: "--only",
                reason: format!("unknown category '{key}'"),
            })?;
            selected.insert(key.clone(), stocks.iter().cloned());
        }
        selected
    };

    if universe.is_empty() {
        return Err(CliError::MissingUniverse.into());
    }
    Ok(universe)
}

fn flatten<'a>(category: &'a str, record: &'a StockSummaryRecord) -> CategoryCsvRecord<'a> {
    CategoryCsvRecord {
        category,
        stock: &record.stock,
        funds_holding: record.funds_holding,
        avg_percent_aum: record.avg_percent_aum,
        sentiment: &record.sentiment,
    }
}

/// "small_cap" → "Small Cap".
fn category_title(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_title() {
        assert_eq!(category_title("small_cap"), "Small Cap");
        assert_eq!(category_title("mid-cap"), "Mid Cap");
        assert_eq!(category_title("flexi"), "Flexi");
    }
}
