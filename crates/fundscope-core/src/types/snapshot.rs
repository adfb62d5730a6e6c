//! Scheme → holdings snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{HoldingRecord, HoldingRow};
use crate::error::{CoreError, CoreResult};

/// Mapping of scheme name to its ordered holdings list.
///
/// Serializes as a plain JSON object, which is the layout of the raw
/// holdings snapshots: `{"<scheme>": [{"stock": .., ..}, ..], ..}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingsSnapshot {
    schemes: BTreeMap<String, Vec<HoldingRecord>>,
}

impl HoldingsSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds holdings for a scheme, appending when the scheme already exists.
    pub fn add_scheme(
        &mut self,
        scheme: impl Into<String>,
        records: Vec<HoldingRecord>,
    ) -> CoreResult<()> {
        let scheme = scheme.into();
        let trimmed = scheme.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_name("scheme", scheme));
        }
        self.schemes
            .entry(trimmed.to_string())
            .or_default()
            .extend(records);
        Ok(())
    }

    /// Builder-style variant of [`add_scheme`](Self::add_scheme).
    pub fn with_scheme(
        mut self,
        scheme: impl Into<String>,
        records: Vec<HoldingRecord>,
    ) -> CoreResult<Self> {
        self.add_scheme(scheme, records)?;
        Ok(self)
    }

    /// Merges another snapshot into this one.
    pub fn merge(&mut self, other: HoldingsSnapshot) {
        for (scheme, records) in other.schemes {
            self.schemes.entry(scheme).or_default().extend(records);
        }
    }

    /// Returns the holdings of a scheme by its exact name.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&[HoldingRecord]> {
        self.schemes.get(scheme).map(Vec::as_slice)
    }

    /// Iterates schemes and their holdings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HoldingRecord])> {
        self.schemes
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of schemes.
    #[must_use]
    pub fn scheme_count(&self) -> usize {
        self.schemes.len()
    }

    /// Total number of holding records across all schemes.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.schemes.values().map(Vec::len).sum()
    }

    /// Returns true if the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Flattens the snapshot into holding rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<HoldingRow> {
        self.iter()
            .flat_map(|(scheme, records)| records.iter().map(move |r| r.to_row(scheme)))
            .collect()
    }
}
