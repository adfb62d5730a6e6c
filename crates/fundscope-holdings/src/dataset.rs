//! Validated, normalised view over holding rows.
//!
//! Every aggregation starts by indexing the caller's rows: malformed rows
//! (blank scheme or stock) are skipped, names are normalised to
//! [`NameKey`]s and the first-seen spelling of each name is kept for display.

use std::collections::{BTreeMap, BTreeSet};

use fundscope_core::{HoldingRow, NameKey, Sentiment};
use tracing::debug;

use crate::error::{HoldingsError, HoldingsResult};

/// A well-formed row with its normalised identities.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRow<'a> {
    pub scheme: NameKey,
    pub stock: NameKey,
    pub row: &'a HoldingRow,
}

/// Per-stock accumulator shared by the stock and conviction summaries.
#[derive(Debug, Clone, Default)]
pub(crate) struct StockStats<'a> {
    /// Distinct schemes holding the stock, with their display names.
    pub schemes: BTreeMap<NameKey, &'a str>,
    /// Matching rows, including repeats within a scheme.
    pub appearances: usize,
    aum_sum: f64,
    aum_count: usize,
    /// Sentiment counts in first-encountered order.
    sentiments: Vec<(Sentiment, usize)>,
}

impl<'a> StockStats<'a> {
    fn record(&mut self, scheme: &NameKey, scheme_name: &'a str, row: &HoldingRow) {
        self.schemes
            .entry(scheme.clone())
            .or_insert(scheme_name);
        self.appearances += 1;

        if let Some(pct) = row.percent_value() {
            self.aum_sum += pct;
            self.aum_count += 1;
        }

        if let Some(sentiment) = row.sentiment {
            match self.sentiments.iter_mut().find(|(s, _)| *s == sentiment) {
                Some((_, count)) => *count += 1,
                None => self.sentiments.push((sentiment, 1)),
            }
        }
    }

    /// Number of distinct schemes holding the stock.
    pub fn fund_count(&self) -> usize {
        self.schemes.len()
    }

    /// Mean percent of AUM over rows that carry one.
    pub fn mean_percent_aum(&self) -> Option<f64> {
        if self.aum_count == 0 {
            None
        } else {
            Some(self.aum_sum / self.aum_count as f64)
        }
    }

    /// Most frequent sentiment; ties go to the value seen first.
    pub fn dominant_sentiment(&self) -> Option<Sentiment> {
        let mut best: Option<(Sentiment, usize)> = None;
        for &(sentiment, count) in &self.sentiments {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((sentiment, count));
            }
        }
        best.map(|(sentiment, _)| sentiment)
    }
}

/// Holding rows indexed by normalised scheme and stock names.
///
/// Construction fails only when a non-empty input contains no usable row.
/// An empty input produces an empty dataset.
#[derive(Debug, Clone)]
pub struct HoldingsDataset<'a> {
    rows: Vec<IndexedRow<'a>>,
    skipped: usize,
    scheme_names: BTreeMap<NameKey, &'a str>,
    stock_names: BTreeMap<NameKey, &'a str>,
}

impl<'a> HoldingsDataset<'a> {
    /// Indexes `rows`, skipping malformed ones.
    pub fn from_rows(rows: &'a [HoldingRow]) -> HoldingsResult<Self> {
        let mut indexed = Vec::with_capacity(rows.len());
        let mut scheme_names = BTreeMap::new();
        let mut stock_names = BTreeMap::new();
        let mut skipped = 0usize;

        for (position, row) in rows.iter().enumerate() {
            let (Some(scheme), Some(stock)) = (row.scheme_key(), row.stock_key()) else {
                debug!(
                    position,
                    scheme = %row.scheme,
                    stock = %row.stock,
                    "skipping malformed holding row"
                );
                skipped += 1;
                continue;
            };

            scheme_names
                .entry(scheme.clone())
                .or_insert_with(|| row.scheme.trim());
            stock_names
                .entry(stock.clone())
                .or_insert_with(|| row.stock.trim());
            indexed.push(IndexedRow { scheme, stock, row });
        }

        if indexed.is_empty() && !rows.is_empty() {
            return Err(HoldingsError::no_usable_rows(rows.len()));
        }

        if skipped > 0 {
            debug!(skipped, usable = indexed.len(), "skipped malformed holding rows");
        }

        Ok(Self {
            rows: indexed,
            skipped,
            scheme_names,
            stock_names,
        })
    }

    /// Number of usable rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no usable rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of malformed rows that were skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of distinct schemes.
    #[must_use]
    pub fn scheme_count(&self) -> usize {
        self.scheme_names.len()
    }

    /// Number of distinct stocks.
    #[must_use]
    pub fn stock_count(&self) -> usize {
        self.stock_names.len()
    }

    /// Display name of a scheme.
    #[must_use]
    pub fn scheme_name(&self, key: &NameKey) -> Option<&'a str> {
        self.scheme_names.get(key).copied()
    }

    /// Display name of a stock.
    #[must_use]
    pub fn stock_name(&self, key: &NameKey) -> Option<&'a str> {
        self.stock_names.get(key).copied()
    }

    /// Iterates scheme keys and display names in key order.
    pub fn schemes(&self) -> impl Iterator<Item = (&NameKey, &'a str)> {
        self.scheme_names.iter().map(|(k, v)| (k, *v))
    }

    pub(crate) fn rows(&self) -> &[IndexedRow<'a>] {
        &self.rows
    }

    /// Accumulates per-stock statistics, keyed by stock.
    pub(crate) fn stock_stats(&self) -> BTreeMap<NameKey, StockStats<'a>> {
        let mut stats: BTreeMap<NameKey, StockStats<'a>> = BTreeMap::new();
        for indexed in &self.rows {
            let scheme_name = self.display_scheme(indexed);
            stats
                .entry(indexed.stock.clone())
                .or_default()
                .record(&indexed.scheme, scheme_name, indexed.row);
        }
        stats
    }

    /// Distinct stock set of every scheme, keyed by scheme.
    pub(crate) fn scheme_holdings(&self) -> BTreeMap<NameKey, BTreeSet<NameKey>> {
        let mut holdings: BTreeMap<NameKey, BTreeSet<NameKey>> = BTreeMap::new();
        for indexed in &self.rows {
            holdings
                .entry(indexed.scheme.clone())
                .or_default()
                .insert(indexed.stock.clone());
        }
        holdings
    }

    fn display_scheme(&self, indexed: &IndexedRow<'a>) -> &'a str {
        self.scheme_names
            .get(&indexed.scheme)
            .copied()
            .unwrap_or_else(|| indexed.row.scheme.trim())
    }
}
