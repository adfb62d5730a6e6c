//! Domain types for mutual-fund holdings.
//!
//! - [`NameKey`]: Normalised identity for scheme and stock names
//! - [`Sentiment`]: A fund's recent stance on a holding
//! - [`HoldingRow`]: One flat (scheme, stock) observation
//! - [`HoldingRecord`]: One entry of a scheme's published holdings list
//! - [`HoldingsSnapshot`]: Scheme name → holdings list

mod holding;
mod name;
mod sentiment;
mod snapshot;

pub use holding::{parse_percent, HoldingRecord, HoldingRow};
pub use name::NameKey;
pub use sentiment::Sentiment;
pub use snapshot::HoldingsSnapshot;
