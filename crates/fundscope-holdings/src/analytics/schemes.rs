//! Per-scheme summaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use fundscope_core::{HoldingRow, NameKey};

use super::round_to;
use crate::dataset::HoldingsDataset;
use crate::error::HoldingsResult;
use crate::types::AggregatorConfig;

/// Summary of one scheme's holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeSummary {
    /// Scheme name (first-seen spelling).
    pub scheme: String,

    /// Number of distinct stocks held.
    pub holdings_count: usize,

    /// Distinct stocks held, ordered by name.
    pub stocks: Vec<String>,

    /// Number of usable rows attributed to the scheme.
    pub row_count: usize,

    /// Mean % AUM over rows that carry one.
    pub avg_percent_aum: Option<f64>,
}

#[derive(Default)]
struct SchemeAccumulator {
    rows: usize,
    aum_sum: f64,
    aum_count: usize,
}

/// Summarizes every scheme in the rows, ordered by scheme name.
///
/// # Errors
///
/// Fails when the rows are non-empty but none names both a scheme and a stock,
/// or when the configuration is invalid.
pub fn summarize_schemes(
    rows: &[HoldingRow],
    config: &AggregatorConfig,
) -> HoldingsResult<Vec<SchemeSummary>> {
    config.validate()?;
    let dataset = HoldingsDataset::from_rows(rows)?;

    let mut accumulators: BTreeMap<&NameKey, SchemeAccumulator> = BTreeMap::new();
    for indexed in dataset.rows() {
        let acc = accumulators.entry(&indexed.scheme).or_default();
        acc.rows += 1;
        if let Some(pct) = indexed.row.percent_value() {
            acc.aum_sum += pct;
            acc.aum_count += 1;
        }
    }

    let summaries = dataset
        .scheme_holdings()
        .into_iter()
        .map(|(key, stocks)| {
            let acc = accumulators.get(&key);
            let avg_percent_aum = acc.filter(|a| a.aum_count > 0).map(|a| {
                round_to(a.aum_sum / a.aum_count as f64, config.aum_decimals)
            });
            SchemeSummary {
                scheme: dataset
                    .scheme_name(&key)
                    .unwrap_or_else(|| key.as_str())
                    .to_string(),
                holdings_count: stocks.len(),
                stocks: stocks
                    .iter()
                    .map(|k| dataset.stock_name(k).unwrap_or_else(|| k.as_str()).to_string())
                    .collect(),
                row_count: acc.map_or(0, |a| a.rows),
                avg_percent_aum,
            }
        })
        .collect();

    Ok(summaries)
}
