//! # Fundscope Core
//!
//! Core types for the Fundscope mutual-fund holdings analytics library.
//!
//! This crate provides the building blocks shared by every other Fundscope crate:
//!
//! - **Types**: [`HoldingRow`], [`HoldingRecord`], [`HoldingsSnapshot`], [`Sentiment`]
//! - **Names**: [`NameKey`], the case-insensitive, whitespace-trimmed identity used
//!   to compare scheme and stock names
//! - **Errors**: [`CoreError`] and [`CoreResult`]
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: name comparison goes through [`NameKey`], never raw strings
//! - **Permissive Input**: optional fields stay optional; unknown labels are missing data
//! - **Explicit Over Implicit**: datasets are passed around by value, there is no global state
//!
//! ## Example
//!
//! ```rust
//! use fundscope_core::prelude::*;
//!
//! let row = HoldingRow::new("SBI Small Cap Fund", "  Kaynes Technology ")
//!     .with_percent_aum(2.4)
//!     .with_sentiment(Sentiment::Buy);
//!
//! assert_eq!(row.stock_key().unwrap(), NameKey::new("KAYNES TECHNOLOGY").unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{
    parse_percent, HoldingRecord, HoldingRow, HoldingsSnapshot, NameKey, Sentiment,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        parse_percent, HoldingRecord, HoldingRow, HoldingsSnapshot, NameKey, Sentiment,
    };
}
