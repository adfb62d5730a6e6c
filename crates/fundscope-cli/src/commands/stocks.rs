//! Stocks command implementation.
//!
//! Summarizes every stock in the holdings, or only the requested ones.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use fundscope_holdings::{summarize_stocks, StockSummary, StockSummaryRecord};

use crate::commands::{truncate, validate_top, InputArgs, RunContext};
use crate::output::format_aum;

/// Arguments for the stocks command.
#[derive(Args, Debug)]
pub struct StocksArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report only this stock (repeatable); unheld stocks show as "Not Held"
    #[arg(short, long = "stock", value_name = "NAME")]
    pub stocks: Vec<String>,

    /// Show at most N stocks
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,
}

/// Table view of a stock summary.
#[derive(Tabled)]
pub struct StockRow {
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "# Funds")]
    funds: usize,
    #[tabled(rename = "Appearances")]
    appearances: usize,
    #[tabled(rename = "Avg % AUM")]
    avg_aum: String,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
    #[tabled(rename = "Conviction")]
    conviction: String,
}

impl From<&StockSummary> for StockRow {
    fn from(summary: &StockSummary) -> Self {
        Self {
            stock: summary.stock.clone(),
            funds: summary.fund_count,
            appearances: summary.total_appearances,
            avg_aum: format_aum(summary.avg_percent_aum, summary.has_aum_data),
            sentiment: summary.dominant_sentiment.to_string(),
            conviction: format!("{:.1}%", summary.conviction_score),
        }
    }
}

/// Execute the stocks command.
pub fn execute(args: StocksArgs, ctx: &RunContext) -> Result<()> {
    let top = validate_top(args.top)?;
    let rows = ctx.load_rows(&args.input)?;

    let targets: Vec<&str> = args.stocks.iter().map(String::as_str).collect();
    let targets = (!targets.is_empty()).then_some(targets.as_slice());

    let summaries = truncate(summarize_stocks(&rows, targets, ctx.aggregator())?, top);

    let records: Vec<StockSummaryRecord> = summaries.iter().map(Into::into).collect();
    let table: Vec<StockRow> = summaries.iter().map(Into::into).collect();
    ctx.output().emit("Stock Summary", &records, &table)
}
