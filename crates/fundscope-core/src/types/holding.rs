//! Holding rows and published holding records.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::{NameKey, Sentiment};

/// One flat (scheme, stock) observation.
///
/// This is the unit the aggregator consumes. Rows whose scheme or stock is
/// blank are malformed and get skipped during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    /// Scheme (fund) name as published.
    pub scheme: String,

    /// Stock (company) name as published.
    pub stock: String,

    /// Share of the scheme's assets under management, in percent.
    #[serde(default)]
    pub percent_aum: Option<f64>,

    /// Recent stance of the scheme on this stock.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

impl HoldingRow {
    /// Creates a row with no optional data.
    #[must_use]
    pub fn new(scheme: impl Into<String>, stock: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            stock: stock.into(),
            percent_aum: None,
            sentiment: None,
        }
    }

    /// Sets the percent of AUM.
    #[must_use]
    pub fn with_percent_aum(mut self, percent: f64) -> Self {
        self.percent_aum = Some(percent);
        self
    }

    /// Sets the sentiment.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Normalised scheme identity, `None` when blank.
    #[must_use]
    pub fn scheme_key(&self) -> Option<NameKey> {
        NameKey::new(&self.scheme)
    }

    /// Normalised stock identity, `None` when blank.
    #[must_use]
    pub fn stock_key(&self) -> Option<NameKey> {
        NameKey::new(&self.stock)
    }

    /// True when both the scheme and the stock can be identified.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.scheme.trim().is_empty() && !self.stock.trim().is_empty()
    }

    /// Percent of AUM, ignoring non-finite values.
    #[must_use]
    pub fn percent_value(&self) -> Option<f64> {
        self.percent_aum.filter(|v| v.is_finite())
    }
}

/// One entry of a scheme's published holdings list.
///
/// Field names follow the raw JSON snapshots; the common spreadsheet-style
/// spellings are accepted as aliases. Every field is optional on input so a
/// single incomplete entry never rejects a whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    /// Stock name.
    #[serde(
        default,
        alias = "Stock",
        alias = "company",
        alias = "Company",
        deserialize_with = "deserialize_stock"
    )]
    pub stock: String,

    /// Percent of AUM. Accepts numbers or strings such as `"2.4%"`.
    #[serde(
        default,
        alias = "Percent_AUM",
        alias = "% AUM",
        alias = "percent",
        deserialize_with = "deserialize_percent"
    )]
    pub percent_aum: Option<f64>,

    /// Raw sentiment label.
    #[serde(default, alias = "Sentiment", deserialize_with = "deserialize_label")]
    pub sentiment: Option<String>,
}

impl HoldingRecord {
    /// Creates a record with a stock name only.
    #[must_use]
    pub fn new(stock: impl Into<String>) -> Self {
        Self {
            stock: stock.into(),
            ..Self::default()
        }
    }

    /// Sets the percent of AUM.
    #[must_use]
    pub fn with_percent_aum(mut self, percent: f64) -> Self {
        self.percent_aum = Some(percent);
        self
    }

    /// Sets the raw sentiment label.
    #[must_use]
    pub fn with_sentiment(mut self, label: impl Into<String>) -> Self {
        self.sentiment = Some(label.into());
        self
    }

    /// Parsed sentiment; unknown labels count as missing.
    #[must_use]
    pub fn parsed_sentiment(&self) -> Option<Sentiment> {
        self.sentiment.as_deref().and_then(Sentiment::parse_lenient)
    }

    /// Converts the record into a flat row attributed to `scheme`.
    #[must_use]
    pub fn to_row(&self, scheme: &str) -> HoldingRow {
        HoldingRow {
            scheme: scheme.to_string(),
            stock: self.stock.clone(),
            percent_aum: self.percent_aum,
            sentiment: self.parsed_sentiment(),
        }
    }
}

/// Parses a percent cell such as `"2.4"`, `"2.4%"` or `"1,234.5"`.
///
/// Returns `None` for blank, unparsable or non-finite input.
#[must_use]
pub fn parse_percent(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Any JSON cell; values of an unexpected type are kept as `Other`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CellValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(CellValue::Number(v)) if v.is_finite() => Some(v),
        Some(CellValue::Text(s)) => parse_percent(&s),
        _ => None,
    })
}

/// Null or non-scalar names read as blank, which marks the row malformed.
fn deserialize_stock<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CellValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(CellValue::Text(s)) => s,
        Some(CellValue::Number(v)) if v.is_finite() => v.to_string(),
        _ => String::new(),
    })
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CellValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(CellValue::Text(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_row_builder() {
        let row = HoldingRow::new("F1", "AAA")
            .with_percent_aum(1.25)
            .with_sentiment(Sentiment::Hold);
        assert_eq!(row.percent_aum, Some(1.25));
        assert_eq!(row.sentiment, Some(Sentiment::Hold));
        assert!(row.is_well_formed());
    }

    #[test]
    fn test_row_well_formed() {
        assert!(!HoldingRow::new("F1", "  ").is_well_formed());
        assert!(!HoldingRow::new("", "AAA").is_well_formed());
        assert!(HoldingRow::new(" F1 ", "AAA").is_well_formed());
    }

    #[test]
    fn test_percent_value_ignores_nan() {
        let row = HoldingRow::new("F1", "AAA").with_percent_aum(f64::NAN);
        assert_eq!(row.percent_value(), None);
    }

    #[test]
    fn test_parse_percent() {
        assert_relative_eq!(parse_percent("2.4").unwrap(), 2.4);
        assert_relative_eq!(parse_percent(" 2.4% ").unwrap(), 2.4);
        assert_relative_eq!(parse_percent("1,234.5").unwrap(), 1234.5);
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("n/a"), None);
        assert_eq!(parse_percent("%"), None);
    }

    #[test]
    fn test_record_deserialize_raw_snapshot_entry() {
        let json = r#"{"stock": "Kaynes Technology", "percent_aum": 2.4, "sentiment": "Buy"}"#;
        let record: HoldingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.stock, "Kaynes Technology");
        assert_eq!(record.percent_aum, Some(2.4));
        assert_eq!(record.parsed_sentiment(), Some(Sentiment::Buy));
    }

    #[test]
    fn test_record_deserialize_aliases_and_strings() {
        let json = r#"{"Stock": "Blue Star", "% AUM": "1.9%", "Sentiment": "trimmed"}"#;
        let record: HoldingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.stock, "Blue Star");
        assert_eq!(record.percent_aum, Some(1.9));
        assert_eq!(record.parsed_sentiment(), Some(Sentiment::Trimmed));
    }

    #[test]
    fn test_record_missing_fields_are_tolerated() {
        let record: HoldingRecord = serde_json::from_str(r#"{"percent_aum": null}"#).unwrap();
        assert!(record.stock.is_empty());
        assert_eq!(record.percent_aum, None);
        assert_eq!(record.sentiment, None);
    }

    #[test]
    fn test_record_odd_cell_types_are_tolerated() {
        let record: HoldingRecord =
            serde_json::from_str(r#"{"stock": null, "percent_aum": 2.0}"#).unwrap();
        assert!(record.stock.is_empty());
        assert!(!record.to_row("F1").is_well_formed());

        let record: HoldingRecord =
            serde_json::from_str(r#"{"stock": 500325, "sentiment": 3, "percent_aum": true}"#)
                .unwrap();
        assert_eq!(record.stock, "500325");
        assert_eq!(record.sentiment, None);
        assert_eq!(record.percent_aum, None);

        let record: HoldingRecord =
            serde_json::from_str(r#"{"stock": ["AAA"], "sentiment": {"label": "Buy"}}"#).unwrap();
        assert!(record.stock.is_empty());
        assert_eq!(record.sentiment, None);
    }

    #[test]
    fn test_record_unknown_sentiment_is_missing() {
        let record = HoldingRecord::new("AAA").with_sentiment("Accumulate");
        let row = record.to_row("F1");
        assert_eq!(row.scheme, "F1");
        assert_eq!(row.sentiment, None);
    }
}
