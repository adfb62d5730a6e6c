//! Scheme overlap analysis.
//!
//! Two schemes overlap (converge) when they hold the same stocks. Overlap is
//! reported as the count of common stocks and as the Jaccard similarity of
//! the two stock sets, for every unordered pair of distinct schemes, together
//! with the full scheme × scheme matrix of common-stock counts.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use fundscope_core::{HoldingRow, NameKey};
use tracing::debug;

use super::parallel::maybe_parallel_map;
use crate::dataset::HoldingsDataset;
use crate::error::HoldingsResult;
use crate::types::AggregatorConfig;

/// Jaccard similarity |A ∩ B| / |A ∪ B| of two sets.
///
/// Returns 0 when both sets are empty and 1 for a non-empty set compared
/// with itself.
#[must_use]
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let common = a.intersection(b).count();
    let union = a.len() + b.len() - common;
    if union == 0 {
        0.0
    } else {
        common as f64 / union as f64
    }
}

/// Overlap between two distinct schemes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapPair {
    /// First scheme of the pair (earlier in enumeration order).
    pub scheme_a: String,

    /// Second scheme of the pair.
    pub scheme_b: String,

    /// Number of stocks held by both schemes.
    pub common_stock_count: usize,

    /// Jaccard similarity of the two stock sets, in [0, 1].
    pub jaccard: f64,

    /// Names of the stocks held by both schemes, ordered by name.
    pub common_stocks: Vec<String>,
}

/// Overlap of every scheme with every other scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeOverlap {
    /// Schemes in enumeration order (ascending normalised name).
    pub schemes: Vec<String>,

    /// `matrix[i][j]` = common stocks of `schemes[i]` and `schemes[j]`;
    /// the diagonal holds each scheme's own distinct holdings count.
    pub matrix: Vec<Vec<usize>>,

    /// Every unordered pair `i < j` in enumeration order.
    pub pairs: Vec<OverlapPair>,
}

impl SchemeOverlap {
    /// Number of schemes.
    #[must_use]
    pub fn scheme_count(&self) -> usize {
        self.schemes.len()
    }

    /// Common-stock count of two schemes, looked up case-insensitively.
    ///
    /// For the same scheme twice this is its holdings count.
    #[must_use]
    pub fn common(&self, a: &str, b: &str) -> Option<usize> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.matrix[i][j])
    }

    /// The pair entry for two distinct schemes, in either order.
    #[must_use]
    pub fn pair(&self, a: &str, b: &str) -> Option<&OverlapPair> {
        let ka = NameKey::new(a)?;
        let kb = NameKey::new(b)?;
        self.pairs.iter().find(|p| {
            let pa = NameKey::new(&p.scheme_a);
            let pb = NameKey::new(&p.scheme_b);
            (pa.as_ref() == Some(&ka) && pb.as_ref() == Some(&kb))
                || (pa.as_ref() == Some(&kb) && pb.as_ref() == Some(&ka))
        })
    }

    /// Pairs ordered by descending Jaccard similarity, then descending
    /// common-stock count, then enumeration order.
    #[must_use]
    pub fn pairs_by_similarity(&self) -> Vec<&OverlapPair> {
        let mut pairs: Vec<&OverlapPair> = self.pairs.iter().collect();
        pairs.sort_by(|a, b| {
            b.jaccard
                .partial_cmp(&a.jaccard)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.common_stock_count.cmp(&a.common_stock_count))
        });
        pairs
    }

    /// Returns true if the matrix equals its transpose.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.matrix.iter().enumerate().all(|(i, row)| {
            row.iter()
                .enumerate()
                .all(|(j, value)| self.matrix[j][i] == *value)
        })
    }

    fn position(&self, scheme: &str) -> Option<usize> {
        let key = NameKey::new(scheme)?;
        self.schemes
            .iter()
            .position(|s| NameKey::new(s).as_ref() == Some(&key))
    }
}

/// Computes pairwise overlap between all schemes in the rows.
///
/// Schemes are enumerated in ascending order of their normalised names, so
/// the result does not depend on row order. When the `parallel` feature is
/// enabled and the scheme count reaches `config.parallel_threshold`, matrix
/// rows are computed in parallel; the output is identical either way.
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
/// use fundscope_holdings::{compute_scheme_overlap, AggregatorConfig};
///
/// let rows = vec![
///     HoldingRow::new("F1", "AAA"),
///     HoldingRow::new("F1", "BBB"),
///     HoldingRow::new("F2", "BBB"),
///     HoldingRow::new("F2", "CCC"),
/// ];
/// let overlap = compute_scheme_overlap(&rows, &AggregatorConfig::default()).unwrap();
/// assert_eq!(overlap.pairs[0].common_stock_count, 1);
/// assert!((overlap.pairs[0].jaccard - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn compute_scheme_overlap(
    rows: &[HoldingRow],
    config: &AggregatorConfig,
) -> HoldingsResult<SchemeOverlap> {
    config.validate()?;
    let dataset = HoldingsDataset::from_rows(rows)?;

    let holdings: Vec<(NameKey, BTreeSet<NameKey>)> =
        dataset.scheme_holdings().into_iter().collect();

    let schemes: Vec<String> = holdings
        .iter()
        .map(|(key, _)| {
            dataset
                .scheme_name(key)
                .unwrap_or_else(|| key.as_str())
                .to_string()
        })
        .collect();

    let indices: Vec<usize> = (0..holdings.len()).collect();
    let matrix: Vec<Vec<usize>> = maybe_parallel_map(&indices, config, |&i| {
        let own = &holdings[i].1;
        holdings
            .iter()
            .enumerate()
            .map(|(j, (_, other))| {
                if i == j {
                    own.len()
                } else {
                    own.intersection(other).count()
                }
            })
            .collect()
    });

    let mut pairs = Vec::with_capacity(holdings.len() * holdings.len().saturating_sub(1) / 2);
    for i in 0..holdings.len() {
        for j in (i + 1)..holdings.len() {
            let (a, b) = (&holdings[i].1, &holdings[j].1);
            let common_stocks: Vec<String> = a
                .intersection(b)
                .map(|k| dataset.stock_name(k).unwrap_or_else(|| k.as_str()).to_string())
                .collect();
            pairs.push(OverlapPair {
                scheme_a: schemes[i].clone(),
                scheme_b: schemes[j].clone(),
                common_stock_count: matrix[i][j],
                jaccard: jaccard(a, b),
                common_stocks,
            });
        }
    }

    debug!(
        schemes = schemes.len(),
        pairs = pairs.len(),
        "computed scheme overlap"
    );
    Ok(SchemeOverlap {
        schemes,
        matrix,
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn rows() -> Vec<HoldingRow> {
        vec![
            HoldingRow::new("F2", "BBB"),
            HoldingRow::new("F2", "CCC"),
            HoldingRow::new("F1", "AAA"),
            HoldingRow::new("F1", "BBB"),
            HoldingRow::new("F3", "aaa"),
            HoldingRow::new("F3", "bbb"),
            HoldingRow::new("F3", "CCC"),
        ]
    }

    #[test]
    fn test_jaccard() {
        assert_relative_eq!(jaccard(&set(&["A", "B"]), &set(&["B", "C"])), 1.0 / 3.0);
        assert_relative_eq!(jaccard(&set(&["A"]), &set(&["A"])), 1.0);
        assert_relative_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_relative_eq!(jaccard(&set(&["A"]), &set(&[])), 0.0);
    }

    #[test]
    fn test_enumeration_order_is_by_name() {
        let overlap = compute_scheme_overlap(&rows(), &AggregatorConfig::default()).unwrap();
        assert_eq!(overlap.schemes, vec!["F1", "F2", "F3"]);
        assert_eq!(overlap.pairs.len(), 3);
        assert_eq!(overlap.pairs[0].scheme_a, "F1");
        assert_eq!(overlap.pairs[0].scheme_b, "F2");
    }

    #[test]
    fn test_matrix() {
        let overlap = compute_scheme_overlap(&rows(), &AggregatorConfig::default()).unwrap();
        assert_eq!(
            overlap.matrix,
            vec![vec![2, 1, 2], vec![1, 2, 2], vec![2, 2, 3]]
        );
        assert!(overlap.is_symmetric());
        assert_eq!(overlap.common("f3", "F3"), Some(3));
        assert_eq!(overlap.common("F1", "nope"), None);
    }

    #[test]
    fn test_pair_lookup_either_order() {
        let overlap = compute_scheme_overlap(&rows(), &AggregatorConfig::default()).unwrap();
        let pair = overlap.pair("f3", "F1").unwrap();
        assert_eq!(pair.common_stock_count, 2);
        assert_eq!(pair.common_stocks, vec!["AAA", "BBB"]);
        assert_relative_eq!(pair.jaccard, 2.0 / 3.0);
        assert!(overlap.pair("F1", "F1").is_none());
    }

    #[test]
    fn test_pairs_by_similarity() {
        let overlap = compute_scheme_overlap(&rows(), &AggregatorConfig::default()).unwrap();
        let ranked = overlap.pairs_by_similarity();
        assert_relative_eq!(ranked[0].jaccard, 2.0 / 3.0);
        assert_relative_eq!(ranked[2].jaccard, 1.0 / 3.0);
    }

    #[test]
    fn test_single_scheme_has_no_pairs() {
        let rows = vec![HoldingRow::new("F1", "AAA")];
        let overlap = compute_scheme_overlap(&rows, &AggregatorConfig::default()).unwrap();
        assert_eq!(overlap.matrix, vec![vec![1]]);
        assert!(overlap.pairs.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows: Vec<HoldingRow> = (0..40)
            .flat_map(|s| {
                (0..15).map(move |k| HoldingRow::new(format!("S{s}"), format!("K{}", (s * k) % 23)))
            })
            .collect();
        let sequential =
            compute_scheme_overlap(&rows, &AggregatorConfig::sequential()).unwrap();
        let parallel =
            compute_scheme_overlap(&rows, &AggregatorConfig::new().with_threshold(2)).unwrap();
        assert_eq!(sequential, parallel);
    }
}
