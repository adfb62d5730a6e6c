//! Schemes command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundscope_holdings::{summarize_schemes, RecordColumns, SchemeSummary};

use crate::commands::{InputArgs, RunContext};

/// Stocks listed per scheme in the table unless all are requested.
const STOCK_PREVIEW: usize = 3;

/// Arguments for the schemes command.
#[derive(Args, Debug)]
pub struct SchemesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// List every stock of each scheme in the table, not just the first few
    #[arg(long)]
    pub all_stocks: bool,
}

/// Export record of a scheme summary.
#[derive(Debug, Serialize)]
pub struct SchemeRecord {
    #[serde(rename = "Scheme")]
    scheme: String,
    #[serde(rename = "Holdings")]
    holdings: usize,
    #[serde(rename = "Rows")]
    rows: usize,
    #[serde(rename = "Avg % AUM")]
    avg_percent_aum: Option<f64>,
    #[serde(rename = "Stocks")]
    stocks: String,
}

impl RecordColumns for SchemeRecord {
    const COLUMNS: &'static [&'static str] = &["Scheme", "Holdings", "Rows", "Avg % AUM", "Stocks"];
}

impl From<&SchemeSummary> for SchemeRecord {
    fn from(summary: &SchemeSummary) -> Self {
        Self {
            scheme: summary.scheme.clone(),
            holdings: summary.holdings_count,
            rows: summary.row_count,
            avg_percent_aum: summary.avg_percent_aum,
            stocks: summary.stocks.join(", "),
        }
    }
}

/// Table view of a scheme summary.
#[derive(Tabled)]
pub struct SchemeRow {
    #[tabled(rename = "Scheme")]
    scheme: String,
    #[tabled(rename = "Holdings")]
    holdings: usize,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Avg % AUM")]
    avg_aum: String,
    #[tabled(rename = "Stocks")]
    stocks: String,
}

impl SchemeRow {
    fn new(summary: &SchemeSummary, all_stocks: bool) -> Self {
        Self {
            scheme: summary.scheme.clone(),
            holdings: summary.holdings_count,
            rows: summary.row_count,
            avg_aum: summary
                .avg_percent_aum
                .map_or_else(|| "-".to_string(), |v| format!("{v:.2}%")),
            stocks: if all_stocks || summary.stocks.len() <= STOCK_PREVIEW {
                summary.stocks.join(", ")
            } else {
                format!(
                    "{}, (+{} more)",
                    summary.stocks[..STOCK_PREVIEW].join(", "),
                    summary.stocks.len() - STOCK_PREVIEW
                )
            },
        }
    }
}

/// Execute the schemes command.
pub fn execute(args: SchemesArgs, ctx: &RunContext) -> Result<()> {
    let rows = ctx.load_rows(&args.input)?;
    let summaries = summarize_schemes(&rows, ctx.aggregator())?;

    let records: Vec<SchemeRecord> = summaries.iter().map(Into::into).collect();
    let table: Vec<SchemeRow> = summaries
        .iter()
        .map(|s| SchemeRow::new(s, args.all_stocks))
        .collect();
    ctx.output().emit("Schemes", &records, &table)
}
