//! Caller-supplied stock universes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category key → ordered list of stock names.
///
/// Typically the top stocks of each market-cap category, e.g.
/// `small_cap` and `mid_cap`. The order of each list is preserved in
/// category summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockUniverse {
    categories: BTreeMap<String, Vec<String>>,
}

impl StockUniverse {
    /// Creates an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a category.
    #[must_use]
    pub fn with_category<I, S>(mut self, key: impl Into<String>, stocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, stocks);
        self
    }

    /// Adds or replaces a category.
    pub fn insert<I, S>(&mut self, key: impl Into<String>, stocks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .insert(key.into(), stocks.into_iter().map(Into::into).collect());
    }

    /// Returns the stocks of a category.
    #[must_use]
    pub fn stocks(&self, key: &str) -> Option<&[String]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// Iterates categories in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
