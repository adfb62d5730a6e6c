//! Conviction analysis.
//!
//! The conviction score of a stock is the percentage of schemes holding it.
//! A stock held by many schemes signals broad fund-manager confidence.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use fundscope_core::HoldingRow;
use tracing::debug;

use super::round_to;
use crate::dataset::HoldingsDataset;
use crate::error::HoldingsResult;
use crate::types::AggregatorConfig;

/// Minimum score (inclusive) of the High category.
pub const HIGH_CONVICTION_THRESHOLD: f64 = 50.0;

/// Minimum score (inclusive) of the Medium category.
pub const MEDIUM_CONVICTION_THRESHOLD: f64 = 25.0;

/// Decimals of the score the category is read from, whatever the reported
/// precision.
pub const CATEGORY_SCORE_DECIMALS: u32 = 1;

/// Conviction bucket of a stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConvictionCategory {
    /// Held by at least half of the schemes.
    High,
    /// Held by at least a quarter of the schemes.
    Medium,
    /// Held by fewer than a quarter of the schemes.
    Low,
}

impl ConvictionCategory {
    /// Categorizes a conviction score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONVICTION_THRESHOLD {
            ConvictionCategory::High
        } else if score >= MEDIUM_CONVICTION_THRESHOLD {
            ConvictionCategory::Medium
        } else {
            ConvictionCategory::Low
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ConvictionCategory::High => "High",
            ConvictionCategory::Medium => "Medium",
            ConvictionCategory::Low => "Low",
        }
    }
}

impl fmt::Display for ConvictionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of `total_schemes` represented by `fund_count`, in [0, 100].
///
/// Returns 0 when there are no schemes.
#[must_use]
pub fn conviction_score(fund_count: usize, total_schemes: usize) -> f64 {
    if total_schemes == 0 {
        return 0.0;
    }
    (fund_count as f64 / total_schemes as f64 * 100.0).clamp(0.0, 100.0)
}

/// Conviction of one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvictionRow {
    /// Stock name (first-seen spelling).
    pub stock: String,

    /// Number of matching rows, including repeats within a scheme.
    pub total_appearances: usize,

    /// Number of distinct schemes holding the stock.
    pub scheme_count: usize,

    /// Percentage of schemes holding the stock, rounded.
    pub conviction_score: f64,

    /// Category of the score at [`CATEGORY_SCORE_DECIMALS`] places.
    pub category: ConvictionCategory,

    /// Schemes holding the stock, ordered by name.
    pub schemes: Vec<String>,
}

/// Computes the conviction of every stock in the rows.
///
/// Scores are reported at `config.score_decimals` places. Categories are
/// read from the score at [`CATEGORY_SCORE_DECIMALS`] places, so a reported
/// 50.0 is High and coarser reporting never moves the thresholds. Results
/// are ordered by descending score, then ascending stock name.
///
/// # Errors
///
/// Fails when the rows are non-empty but none names both a scheme and a stock,
/// or when the configuration is invalid.
pub fn compute_conviction(
    rows: &[HoldingRow],
    config: &AggregatorConfig,
) -> HoldingsResult<Vec<ConvictionRow>> {
    config.validate()?;
    let dataset = HoldingsDataset::from_rows(rows)?;
    let total_schemes = dataset.scheme_count();

    let mut keyed: Vec<_> = dataset
        .stock_stats()
        .into_iter()
        .map(|(key, stats)| {
            let raw = conviction_score(stats.fund_count(), total_schemes);
            let score = round_to(raw, config.score_decimals);
            let category =
                ConvictionCategory::from_score(round_to(raw, CATEGORY_SCORE_DECIMALS));
            let row = ConvictionRow {
                stock: dataset
                    .stock_name(&key)
                    .unwrap_or_else(|| key.as_str())
                    .to_string(),
                total_appearances: stats.appearances,
                scheme_count: stats.fund_count(),
                conviction_score: score,
                category,
                schemes: stats.schemes.values().map(|s| (*s).to_string()).collect(),
            };
            (key, row)
        })
        .collect();

    keyed.sort_by(|(ka, a), (kb, b)| {
        b.conviction_score
            .partial_cmp(&a.conviction_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| ka.cmp(kb))
    });

    debug!(
        stocks = keyed.len(),
        schemes = total_schemes,
        "computed conviction"
    );
    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Keeps only rows of the given category, preserving order.
#[must_use]
pub fn filter_by_category(
    rows: &[ConvictionRow],
    category: ConvictionCategory,
) -> Vec<ConvictionRow> {
    rows.iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn four_schemes() -> Vec<HoldingRow> {
        vec![
            HoldingRow::new("F1", "AAA"),
            HoldingRow::new("F2", "AAA"),
            HoldingRow::new("F3", "AAA"),
            HoldingRow::new("F1", "BBB"),
            HoldingRow::new("F2", "bbb"),
            HoldingRow::new("F3", "CCC"),
            HoldingRow::new("F4", "DDD"),
            HoldingRow::new("F4", "DDD"),
        ]
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(ConvictionCategory::from_score(100.0), ConvictionCategory::High);
        assert_eq!(ConvictionCategory::from_score(50.0), ConvictionCategory::High);
        assert_eq!(ConvictionCategory::from_score(49.9), ConvictionCategory::Medium);
        assert_eq!(ConvictionCategory::from_score(25.0), ConvictionCategory::Medium);
        assert_eq!(ConvictionCategory::from_score(24.9), ConvictionCategory::Low);
        assert_eq!(ConvictionCategory::from_score(0.0), ConvictionCategory::Low);
    }

    #[test]
    fn test_coarse_score_keeps_category_thresholds() {
        // AAA is held by 62 of 125 schemes: 49.6%.
        let mut rows: Vec<HoldingRow> = (0..125)
            .map(|i| HoldingRow::new(format!("F{i:03}"), "ZZZ"))
            .collect();
        rows.extend((0..62).map(|i| HoldingRow::new(format!("F{i:03}"), "AAA")));

        let config = AggregatorConfig::default().with_score_decimals(0);
        let conviction = compute_conviction(&rows, &config).unwrap();
        let aaa = conviction.iter().find(|r| r.stock == "AAA").unwrap();
        assert_relative_eq!(aaa.conviction_score, 50.0);
        assert_eq!(aaa.category, ConvictionCategory::Medium);

        let conviction = compute_conviction(&rows, &AggregatorConfig::default()).unwrap();
        let aaa = conviction.iter().find(|r| r.stock == "AAA").unwrap();
        assert_relative_eq!(aaa.conviction_score, 49.6);
        assert_eq!(aaa.category, ConvictionCategory::Medium);
    }

    #[test]
    fn test_conviction_score() {
        assert_relative_eq!(conviction_score(1, 2), 50.0);
        assert_relative_eq!(conviction_score(0, 5), 0.0);
        assert_relative_eq!(conviction_score(3, 3), 100.0);
        assert_relative_eq!(conviction_score(3, 0), 0.0);
    }

    #[test]
    fn test_compute_conviction() {
        let rows = compute_conviction(&four_schemes(), &AggregatorConfig::default()).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.stock.as_str()).collect();
        assert_eq!(names, vec!["AAA", "BBB", "CCC", "DDD"]);

        assert_relative_eq!(rows[0].conviction_score, 75.0);
        assert_eq!(rows[0].category, ConvictionCategory::High);
        assert_eq!(rows[0].schemes, vec!["F1", "F2", "F3"]);

        assert_relative_eq!(rows[1].conviction_score, 50.0);
        assert_eq!(rows[1].category, ConvictionCategory::High);

        assert_relative_eq!(rows[2].conviction_score, 25.0);
        assert_eq!(rows[2].category, ConvictionCategory::Medium);

        let ddd = &rows[3];
        assert_eq!(ddd.scheme_count, 1);
        assert_eq!(ddd.total_appearances, 2);
        assert_eq!(ddd.category, ConvictionCategory::Medium);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let rows = vec![
            HoldingRow::new("F1", "AAA"),
            HoldingRow::new("F2", "BBB"),
            HoldingRow::new("F3", "CCC"),
        ];
        let conviction = compute_conviction(&rows, &AggregatorConfig::default()).unwrap();
        assert_relative_eq!(conviction[0].conviction_score, 33.3);
        assert_eq!(conviction[0].category, ConvictionCategory::Medium);
    }

    #[test]
    fn test_filter_by_category() {
        let rows = compute_conviction(&four_schemes(), &AggregatorConfig::default()).unwrap();
        let high = filter_by_category(&rows, ConvictionCategory::High);
        assert_eq!(high.len(), 2);
        assert!(filter_by_category(&rows, ConvictionCategory::Low).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let rows = compute_conviction(&[], &AggregatorConfig::default()).unwrap();
        assert!(rows.is_empty());
    }
}
