//! Normalised scheme and stock names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-insensitive, whitespace-trimmed identity of a scheme or stock name.
///
/// Two names refer to the same entity exactly when their keys are equal.
/// Ordering is the lexicographic order of the normalised text, which gives
/// every aggregation a deterministic enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameKey(String);

impl NameKey {
    /// Normalises `name`, returning `None` when it is blank.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// Returns the normalised text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let a = NameKey::new("  Kaynes Technology").unwrap();
        let b = NameKey::new("KAYNES TECHNOLOGY  ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "kaynes technology");
    }

    #[test]
    fn test_blank_rejected() {
        assert!(NameKey::new("").is_none());
        assert!(NameKey::new(" \t\n").is_none());
    }

    #[test]
    fn test_ordering() {
        let mut keys = vec![
            NameKey::new("beta").unwrap(),
            NameKey::new("Alpha").unwrap(),
            NameKey::new("gamma").unwrap(),
        ];
        keys.sort();
        let names: Vec<_> = keys.iter().map(NameKey::as_str).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }
}
