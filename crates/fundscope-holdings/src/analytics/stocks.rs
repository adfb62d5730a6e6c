//! Per-stock holdings summaries.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use fundscope_core::{CoreError, HoldingRow, NameKey, Sentiment};
use tracing::debug;

use super::conviction::conviction_score;
use super::round_to;
use crate::dataset::{HoldingsDataset, StockStats};
use crate::error::HoldingsResult;
use crate::types::AggregatorConfig;

/// Label reported for a requested stock that no scheme holds.
pub const NOT_HELD_LABEL: &str = "Not Held";

/// Label reported for a held stock whose rows carry no sentiment.
pub const UNKNOWN_SENTIMENT_LABEL: &str = "Unknown";

/// Dominant sentiment of a stock across its holding rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SentimentSummary {
    /// The most frequent sentiment among matching rows.
    Dominant(Sentiment),
    /// The stock is held but no row carries a sentiment.
    Unknown,
    /// No scheme holds the stock.
    NotHeld,
}

impl SentimentSummary {
    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SentimentSummary::Dominant(s) => s.label(),
            SentimentSummary::Unknown => UNKNOWN_SENTIMENT_LABEL,
            SentimentSummary::NotHeld => NOT_HELD_LABEL,
        }
    }

    /// Returns the dominant sentiment, if any.
    #[must_use]
    pub fn sentiment(&self) -> Option<Sentiment> {
        match self {
            SentimentSummary::Dominant(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<SentimentSummary> for String {
    fn from(value: SentimentSummary) -> Self {
        value.label().to_string()
    }
}

impl TryFrom<String> for SentimentSummary {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(NOT_HELD_LABEL) {
            Ok(SentimentSummary::NotHeld)
        } else if trimmed.eq_ignore_ascii_case(UNKNOWN_SENTIMENT_LABEL) {
            Ok(SentimentSummary::Unknown)
        } else {
            trimmed.parse().map(SentimentSummary::Dominant)
        }
    }
}

/// Summary of one stock across all schemes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    /// Stock name (first-seen spelling, or the requested spelling).
    pub stock: String,

    /// Number of distinct schemes holding the stock.
    pub fund_count: usize,

    /// Number of matching rows, including repeats within a scheme.
    pub total_appearances: usize,

    /// Mean % AUM over rows that carry one; 0 when none do.
    pub avg_percent_aum: f64,

    /// False when no matching row carries a % AUM value.
    pub has_aum_data: bool,

    /// Dominant sentiment, or the Not Held / Unknown sentinel.
    pub dominant_sentiment: SentimentSummary,

    /// Percentage of schemes holding the stock.
    pub conviction_score: f64,
}

impl StockSummary {
    /// Returns true if at least one scheme holds the stock.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.fund_count > 0
    }

    fn not_held(stock: &str) -> Self {
        Self {
            stock: stock.to_string(),
            fund_count: 0,
            total_appearances: 0,
            avg_percent_aum: 0.0,
            has_aum_data: false,
            dominant_sentiment: SentimentSummary::NotHeld,
            conviction_score: 0.0,
        }
    }

    fn from_stats(
        stock: &str,
        stats: &StockStats<'_>,
        total_schemes: usize,
        config: &AggregatorConfig,
    ) -> Self {
        let mean = stats.mean_percent_aum();
        Self {
            stock: stock.to_string(),
            fund_count: stats.fund_count(),
            total_appearances: stats.appearances,
            avg_percent_aum: mean.map_or(0.0, |m| round_to(m, config.aum_decimals)),
            has_aum_data: mean.is_some(),
            dominant_sentiment: stats
                .dominant_sentiment()
                .map_or(SentimentSummary::Unknown, SentimentSummary::Dominant),
            conviction_score: round_to(
                conviction_score(stats.fund_count(), total_schemes),
                config.score_decimals,
            ),
        }
    }
}

/// Summarizes stocks across all schemes.
///
/// With `targets`, exactly the requested stocks are summarized (matched
/// case-insensitively; blank and duplicate targets are ignored). A requested
/// stock that no scheme holds is still reported, with a fund count of 0 and a
/// [`SentimentSummary::NotHeld`] sentiment. Without `targets`, every stock
/// present in the rows is summarized.
///
/// Results are ordered by descending fund count, then ascending stock name.
///
/// # Errors
///
/// Fails when the rows are non-empty but none names both a scheme and a stock,
/// or when the configuration is invalid.
///
/// # Example
///
/// ```rust
/// use fundscope_core::HoldingRow;
/// use fundscope_holdings::{summarize_stocks, AggregatorConfig};
///
/// let rows = vec![
///     HoldingRow::new("F1", "AAA").with_percent_aum(2.0),
///     HoldingRow::new("F2", "aaa").with_percent_aum(3.0),
/// ];
/// let summaries = summarize_stocks(&rows, Some(&["AAA", "ZZZ"][..]), &AggregatorConfig::default()).unwrap();
/// assert_eq!(summaries[0].fund_count, 2);
/// assert_eq!(summaries[0].avg_percent_aum, 2.5);
/// assert!(!summaries[1].is_held());
/// ```
pub fn summarize_stocks(
    rows: &[HoldingRow],
    targets: Option<&[&str]>,
    config: &AggregatorConfig,
) -> HoldingsResult<Vec<StockSummary>> {
    config.validate()?;
    let dataset = HoldingsDataset::from_rows(rows)?;

    let mut summaries = match targets {
        Some(targets) => summarize_requested(&dataset, targets, config),
        None => summarize_discovered(&dataset, config),
    };
    summaries.sort_by_cached_key(|s| (Reverse(s.fund_count), NameKey::new(&s.stock)));

    debug!(
        stocks = summaries.len(),
        schemes = dataset.scheme_count(),
        "summarized stocks"
    );
    Ok(summaries)
}

/// Summaries for requested stocks, in request order.
pub(crate) fn summarize_requested<S: AsRef<str>>(
    dataset: &HoldingsDataset<'_>,
    targets: &[S],
    config: &AggregatorConfig,
) -> Vec<StockSummary> {
    let stats = dataset.stock_stats();
    let total_schemes = dataset.scheme_count();
    let mut seen = HashSet::new();

    targets
        .iter()
        .filter_map(|target| {
            let name = target.as_ref().trim();
            let key = NameKey::new(name)?;
            if !seen.insert(key.clone()) {
                return None;
            }
            Some(match stats.get(&key) {
                Some(s) => StockSummary::from_stats(name, s, total_schemes, config),
                None => StockSummary::not_held(name),
            })
        })
        .collect()
}

fn summarize_discovered(
    dataset: &HoldingsDataset<'_>,
    config: &AggregatorConfig,
) -> Vec<StockSummary> {
    let stats: BTreeMap<NameKey, StockStats<'_>> = dataset.stock_stats();
    let total_schemes = dataset.scheme_count();

    stats
        .iter()
        .map(|(key, s)| {
            let name = dataset.stock_name(key).unwrap_or_else(|| key.as_str());
            StockSummary::from_stats(name, s, total_schemes, config)
        })
        .collect()
}
