//! Category summaries over a stock universe.
//!
//! A category summary reports, for each category of a caller-supplied
//! [`StockUniverse`] (e.g. the top small-cap and mid-cap stocks), how many
//! schemes hold each listed stock, their average % AUM and dominant sentiment.

use std::collections::BTreeMap;

use fundscope_core::HoldingRow;
use tracing::debug;

use super::stocks::{summarize_requested, StockSummary};
use crate::dataset::HoldingsDataset;
use crate::error::HoldingsResult;
use crate::types::{AggregatorConfig, StockUniverse};

/// Category key → stock summaries, in the universe's stock order.
pub type CategorySummary = BTreeMap<String, Vec<StockSummary>>;

/// Summarizes the stocks of every universe category.
///
/// Every listed stock is reported, including those no scheme holds.
/// An empty universe yields an empty summary.
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
/// use fundscope_holdings::{summarize_categories, AggregatorConfig, StockUniverse};
///
/// let rows = vec![HoldingRow::new("SBI Small Cap Fund", "Kaynes Technology")];
/// let universe = StockUniverse::new()
///     .with_category("small_cap", ["Kaynes Technology", "Anant Raj"]);
///
/// let summary = summarize_categories(&rows, &universe, &AggregatorConfig::default()).unwrap();
/// let small = &summary["small_cap"];
/// assert_eq!(small[0].fund_count, 1);
/// assert_eq!(small[1].dominant_sentiment.to_string(), "Not Held");
/// ```
pub fn summarize_categories(
    rows: &[HoldingRow],
    universe: &StockUniverse,
    config: &AggregatorConfig,
) -> HoldingsResult<CategorySummary> {
    config.validate()?;
    let dataset = HoldingsDataset::from_rows(rows)?;

    let summary: CategorySummary = universe
        .iter()
        .map(|(category, stocks)| {
            (
                category.to_string(),
                summarize_requested(&dataset, stocks, config),
            )
        })
        .collect();

    debug!(categories = summary.len(), "summarized categories");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::SentimentSummary;
    use fundscope_core::Sentiment;

    fn rows() -> Vec<HoldingRow> {
        vec![
            HoldingRow::new("SBI Small Cap Fund", "Kaynes Technology")
                .with_percent_aum(2.5)
                .with_sentiment(Sentiment::Buy),
            HoldingRow::new("HDFC Midcap Opportunities", "kaynes technology")
                .with_percent_aum(1.5)
                .with_sentiment(Sentiment::Buy),
            HoldingRow::new("HDFC Midcap Opportunities", "Persistent Systems")
                .with_percent_aum(3.1)
                .with_sentiment(Sentiment::Hold),
        ]
    }

    #[test]
    fn test_preserves_universe_order() {
        let universe = StockUniverse::new()
            .with_category("small_cap", ["Anant Raj", "Kaynes Technology"])
            .with_category("mid_cap", ["Persistent Systems"]);

        let summary =
            summarize_categories(&rows(), &universe, &AggregatorConfig::default()).unwrap();
        assert_eq!(summary.len(), 2);

        let small = &summary["small_cap"];
        assert_eq!(small[0].stock, "Anant Raj");
        assert_eq!(small[0].dominant_sentiment, SentimentSummary::NotHeld);
        assert_eq!(small[1].stock, "Kaynes Technology");
        assert_eq!(small[1].fund_count, 2);
        assert!((small[1].avg_percent_aum - 2.0).abs() < 1e-12);
        assert_eq!(
            small[1].dominant_sentiment,
            SentimentSummary::Dominant(Sentiment::Buy)
        );

        let mid = &summary["mid_cap"];
        assert_eq!(mid[0].fund_count, 1);
        assert!((mid[0].conviction_score - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_universe() {
        let summary =
            summarize_categories(&rows(), &StockUniverse::new(), &AggregatorConfig::default())
                .unwrap();
        assert!(summary.is_empty());
    }
}
