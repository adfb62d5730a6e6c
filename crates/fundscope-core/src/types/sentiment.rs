//! Fund sentiment labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A fund's recent stance on a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Position added or increased.
    Buy,
    /// Position unchanged.
    Hold,
    /// Position reduced.
    Trimmed,
    /// Position sold out entirely.
    Exited,
}

impl Sentiment {
    /// All sentiment values.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Buy,
        Sentiment::Hold,
        Sentiment::Trimmed,
        Sentiment::Exited,
    ];

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Buy => "Buy",
            Sentiment::Hold => "Hold",
            Sentiment::Trimmed => "Trimmed",
            Sentiment::Exited => "Exited",
        }
    }

    /// Parses a label, treating blank or unrecognised text as missing data.
    #[must_use]
    pub fn parse_lenient(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl FromStr for Sentiment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Sentiment::Buy),
            "hold" => Ok(Sentiment::Hold),
            "trimmed" | "trim" => Ok(Sentiment::Trimmed),
            "exited" | "exit" => Ok(Sentiment::Exited),
            _ => Err(CoreError::unknown_sentiment(s)),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
