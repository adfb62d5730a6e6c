//! Flat-table column resolution.
//!
//! Spreadsheet exports put one holding per row with a scheme column and a
//! stock column whose headers vary between publishers. Columns are found by
//! header substrings, falling back to the first two columns.

use fundscope_core::{parse_percent, HoldingRow, Sentiment};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HoldingsError, HoldingsResult};

const SCHEME_HINTS: [&str; 2] = ["scheme", "fund"];
const STOCK_HINTS: [&str; 2] = ["stock", "company"];
const PERCENT_HINTS: [&str; 4] = ["aum", "%", "percent", "weight"];
const SENTIMENT_HINTS: [&str; 2] = ["sentiment", "action"];

/// Column positions of a flat holdings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Scheme name column.
    pub scheme: usize,
    /// Stock name column.
    pub stock: usize,
    /// Percent of AUM column, if any.
    pub percent_aum: Option<usize>,
    /// Sentiment column, if any.
    pub sentiment: Option<usize>,
}

impl ColumnMapping {
    /// Resolves column positions from table headers.
    ///
    /// The scheme column is the first header containing "scheme" or "fund";
    /// the stock column is the first other header containing "stock" or
    /// "company". Whichever cannot be detected falls back to the first of the
    /// leading columns not already taken.
    ///
    /// # Errors
    ///
    /// Fails when the table has fewer than two columns.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> HoldingsResult<Self> {
        if headers.len() < 2 {
            return Err(HoldingsError::column_resolution(headers));
        }

        let lowered: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();

        let detected_scheme = find_column(&lowered, &SCHEME_HINTS, &[]);
        let detected_stock = find_column(&lowered, &STOCK_HINTS, &[detected_scheme]);

        let (scheme, stock) = match (detected_scheme, detected_stock) {
            (Some(scheme), Some(stock)) => (scheme, stock),
            (Some(scheme), None) => (scheme, first_other(headers.len(), scheme)),
            (None, Some(stock)) => (first_other(headers.len(), stock), stock),
            (None, None) => {
                debug!(?lowered, "no scheme/stock headers, using the first two columns");
                (0, 1)
            }
        };

        let taken = [Some(scheme), Some(stock)];
        let percent_aum = find_column(&lowered, &PERCENT_HINTS, &taken);
        let sentiment = find_column(
            &lowered,
            &SENTIMENT_HINTS,
            &[Some(scheme), Some(stock), percent_aum],
        );

        Ok(Self {
            scheme,
            stock,
            percent_aum,
            sentiment,
        })
    }

    /// Builds a holding row from one record of the table.
    ///
    /// Missing cells read as blank; blank or unparsable optional cells are
    /// missing data.
    #[must_use]
    pub fn row_from_record<S: AsRef<str>>(&self, record: &[S]) -> HoldingRow {
        let cell = |i: usize| record.get(i).map_or("", |c| c.as_ref());

        HoldingRow {
            scheme: cell(self.scheme).trim().to_string(),
            stock: cell(self.stock).trim().to_string(),
            percent_aum: self.percent_aum.and_then(|i| parse_percent(cell(i))),
            sentiment: self
                .sentiment
                .and_then(|i| Sentiment::parse_lenient(cell(i))),
        }
    }
}

/// Converts a flat table into holding rows.
///
/// Malformed records are kept as rows with blank names; the aggregator skips
/// them.
///
/// # Errors
///
/// Fails when the scheme and stock columns cannot be resolved.
pub fn rows_from_table<H, S>(headers: &[H], records: &[Vec<S>]) -> HoldingsResult<Vec<HoldingRow>>
where
    H: AsRef<str>,
    S: AsRef<str>,
{
    let mapping = ColumnMapping::resolve(headers)?;
    Ok(records
        .iter()
        .map(|record| mapping.row_from_record(record))
        .collect())
}

fn find_column(lowered: &[String], hints: &[&str], taken: &[Option<usize>]) -> Option<usize> {
    lowered.iter().enumerate().find_map(|(i, header)| {
        let free = !taken.contains(&Some(i));
        (free && hints.iter().any(|hint| header.contains(hint))).then_some(i)
    })
}

fn first_other(len: usize, taken: usize) -> usize {
    (0..len).find(|i| *i != taken).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_by_name() {
        let mapping =
            ColumnMapping::resolve(&["Date", "Company Name", "Scheme Name", "% of AUM", "Action"])
                .unwrap();
        assert_eq!(mapping.scheme, 2);
        assert_eq!(mapping.stock, 1);
        assert_eq!(mapping.percent_aum, Some(3));
        assert_eq!(mapping.sentiment, Some(4));
    }

    #[test]
    fn test_fund_header_counts_as_scheme() {
        let mapping = ColumnMapping::resolve(&["Stock", "Fund"]).unwrap();
        assert_eq!(mapping.scheme, 1);
        assert_eq!(mapping.stock, 0);
        assert_eq!(mapping.percent_aum, None);
    }

    #[test]
    fn test_positional_fallback() {
        let mapping = ColumnMapping::resolve(&["A", "B", "C"]).unwrap();
        assert_eq!((mapping.scheme, mapping.stock), (0, 1));
    }

    #[test]
    fn test_partial_fallback_never_reuses_a_column() {
        let mapping = ColumnMapping::resolve(&["Holding", "Scheme"]).unwrap();
        assert_eq!((mapping.scheme, mapping.stock), (1, 0));

        let mapping = ColumnMapping::resolve(&["Stock", "Notes"]).unwrap();
        assert_eq!((mapping.scheme, mapping.stock), (1, 0));
    }

    #[test]
    fn test_too_few_columns() {
        let err = ColumnMapping::resolve(&["Only"]).unwrap_err();
        assert!(matches!(err, HoldingsError::ColumnResolution { .. }));
        assert!(ColumnMapping::resolve::<&str>(&[]).is_err());
    }

    #[test]
    fn test_rows_from_table() {
        let headers = ["Scheme", "Stock", "Percent AUM", "Sentiment"];
        let records = vec![
            vec!["F1", "AAA", "2.5%", "Buy"],
            vec!["F1", " BBB ", "", "sideways"],
            vec!["F2"],
        ];
        let rows = rows_from_table(&headers, &records).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].percent_aum, Some(2.5));
        assert_eq!(rows[0].sentiment, Some(Sentiment::Buy));
        assert_eq!(rows[1].stock, "BBB");
        assert_eq!(rows[1].percent_aum, None);
        assert_eq!(rows[1].sentiment, None);
        assert!(!rows[2].is_well_formed());
    }
}
