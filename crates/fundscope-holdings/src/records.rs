//! Flat output records.
//!
//! These are the column layouts written to CSV and JSON exports. Field names
//! are the published column headers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analytics::{round_to, CategorySummary, ConvictionRow, OverlapPair, StockSummary};

/// Decimal places of exported Jaccard values.
pub const JACCARD_DECIMALS: u32 = 4;

/// Column headers of an export record, in serialization order.
///
/// Lets a CSV export of zero records still carry its header row.
pub trait RecordColumns {
    /// Header names, matching the serde field names.
    const COLUMNS: &'static [&'static str];
}

/// One row of a stock summary export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummaryRecord {
    /// Stock name.
    #[serde(rename = "Stock")]
    pub stock: String,
    /// Distinct schemes holding the stock.
    #[serde(rename = "# Funds Holding")]
    pub funds_holding: usize,
    /// Mean % AUM, rounded.
    #[serde(rename = "Avg % AUM")]
    pub avg_percent_aum: f64,
    /// Dominant sentiment label.
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
}

impl RecordColumns for StockSummaryRecord {
    const COLUMNS: &'static [&'static str] = &["Stock", "# Funds Holding", "Avg % AUM", "Sentiment"];
}

impl From<&StockSummary> for StockSummaryRecord {
    fn from(summary: &StockSummary) -> Self {
        Self {
            stock: summary.stock.clone(),
            funds_holding: summary.fund_count,
            avg_percent_aum: summary.avg_percent_aum,
            sentiment: summary.dominant_sentiment.to_string(),
        }
    }
}

/// One row of a conviction export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvictionRecord {
    /// Stock name.
    #[serde(rename = "Stock")]
    pub stock: String,
    /// Matching rows.
    #[serde(rename = "Total_Appearances")]
    pub total_appearances: usize,
    /// Distinct schemes holding the stock.
    #[serde(rename = "Scheme_Count")]
    pub scheme_count: usize,
    /// Conviction score, rounded.
    #[serde(rename = "Conviction_Score")]
    pub conviction_score: f64,
    /// High, Medium or Low.
    #[serde(rename = "Conviction_Category")]
    pub conviction_category: String,
    /// Holding schemes joined with ", ".
    #[serde(rename = "Schemes_List")]
    pub schemes_list: String,
}

impl RecordColumns for ConvictionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Stock",
        "Total_Appearances",
        "Scheme_Count",
        "Conviction_Score",
        "Conviction_Category",
        "Schemes_List",
    ];
}

impl From<&ConvictionRow> for ConvictionRecord {
    fn from(row: &ConvictionRow) -> Self {
        Self {
            stock: row.stock.clone(),
            total_appearances: row.total_appearances,
            scheme_count: row.scheme_count,
            conviction_score: row.conviction_score,
            conviction_category: row.category.to_string(),
            schemes_list: row.schemes.join(", "),
        }
    }
}

/// One row of a scheme overlap export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapPairRecord {
    /// First scheme.
    #[serde(rename = "Scheme_A")]
    pub scheme_a: String,
    /// Second scheme.
    #[serde(rename = "Scheme_B")]
    pub scheme_b: String,
    /// Stocks held by both.
    #[serde(rename = "Common_Stocks")]
    pub common_stocks: usize,
    /// Jaccard similarity rounded to [`JACCARD_DECIMALS`] places.
    #[serde(rename = "Jaccard")]
    pub jaccard: f64,
    /// Common stocks joined with ", ".
    #[serde(rename = "Common_List")]
    pub common_list: String,
}

impl RecordColumns for OverlapPairRecord {
    const COLUMNS: &'static [&'static str] =
        &["Scheme_A", "Scheme_B", "Common_Stocks", "Jaccard", "Common_List"];
}

impl From<&OverlapPair> for OverlapPairRecord {
    fn from(pair: &OverlapPair) -> Self {
        Self {
            scheme_a: pair.scheme_a.clone(),
            scheme_b: pair.scheme_b.clone(),
            common_stocks: pair.common_stock_count,
            jaccard: round_to(pair.jaccard, JACCARD_DECIMALS),
            common_list: pair.common_stocks.join(", "),
        }
    }
}

/// Converts a category summary into export records, keyed by category.
#[must_use]
pub fn category_records(summary: &CategorySummary) -> BTreeMap<String, Vec<StockSummaryRecord>> {
    summary
        .iter()
        .map(|(category, stocks)| {
            (
                category.clone(),
                stocks.iter().map(StockSummaryRecord::from).collect(),
            )
        })
        .collect()
}
