//! # Fundscope Holdings
//!
//! Conviction and overlap analytics for mutual-fund holdings.
//!
//! This crate aggregates flat holding rows (scheme, stock, optional % AUM,
//! optional sentiment) into the statistics an analyst reads to spot
//! high-conviction stocks and converging schemes.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every call takes the rows and configuration explicitly
//! - **Permissive input**: malformed rows are skipped, missing optional data defaults
//! - **Deterministic output**: counts, scores and orderings do not depend on row
//!   order; display spellings and sentiment ties follow the first row seen
//! - **Config-driven parallelism**: optional rayon support with threshold-based switching
//!
//! ## Features
//!
//! - **Stock summaries**: fund count, average % AUM, dominant sentiment
//! - **Conviction**: percentage of schemes holding a stock, High/Medium/Low
//! - **Scheme overlap**: common stocks, Jaccard similarity, overlap matrix
//! - **Scheme summaries**: holdings per scheme
//! - **Category summaries**: requested stocks per universe category, including unheld ones
//! - **Flat tables**: column auto-detection for spreadsheet exports
//!
//! ## Quick Start
//!
//! ```rust
//! use fundscope_holdings::prelude::*;
//!
//! let rows = vec![
//!     HoldingRow::new("F1", "AAA"),
//!     HoldingRow::new("F1", "BBB"),
//!     HoldingRow::new("F2", "BBB"),
//!     HoldingRow::new("F2", "CCC"),
//! ];
//! let config = AggregatorConfig::default();
//!
//! let conviction = compute_conviction(&rows, &config).unwrap();
//! assert_eq!(conviction[0].stock, "BBB");
//! assert_eq!(conviction[0].category, ConvictionCategory::High);
//!
//! let overlap = compute_scheme_overlap(&rows, &config).unwrap();
//! assert_eq!(overlap.common("F1", "F2"), Some(1));
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Stock, conviction, overlap, scheme and category summaries
//! - [`dataset`] - Validated, normalised view over holding rows
//! - [`records`] - Flat export records with published column names
//! - [`table`] - Flat-table column resolution
//! - [`types`] - Aggregator configuration and stock universe
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based computation of the overlap matrix for many schemes

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod dataset;
pub mod error;
pub mod records;
pub mod table;
pub mod types;

pub use error::{HoldingsError, HoldingsResult};

pub use types::{AggregatorConfig, StockUniverse};

pub use dataset::HoldingsDataset;

pub use analytics::{
    // Conviction
    compute_conviction,
    conviction_score,
    filter_by_category,
    // Overlap
    compute_scheme_overlap,
    jaccard,
    // Parallel utilities
    maybe_parallel_map,
    // Categories
    summarize_categories,
    // Schemes
    summarize_schemes,
    // Stocks
    summarize_stocks,
    CategorySummary,
    ConvictionCategory,
    ConvictionRow,
    OverlapPair,
    SchemeOverlap,
    SchemeSummary,
    SentimentSummary,
    StockSummary,
    CATEGORY_SCORE_DECIMALS,
    HIGH_CONVICTION_THRESHOLD,
    MEDIUM_CONVICTION_THRESHOLD,
    NOT_HELD_LABEL,
    UNKNOWN_SENTIMENT_LABEL,
};

pub use records::{
    category_records, ConvictionRecord, OverlapPairRecord, RecordColumns, StockSummaryRecord,
    JACCARD_DECIMALS,
};

pub use table::{rows_from_table, ColumnMapping};

/// Prelude module for convenient imports.
///
/// ```rust
/// use fundscope_holdings::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{HoldingsError, HoldingsResult};

    pub use crate::types::{AggregatorConfig, StockUniverse};

    pub use crate::analytics::{
        compute_conviction, compute_scheme_overlap, summarize_categories, summarize_schemes,
        summarize_stocks, ConvictionCategory, ConvictionRow, OverlapPair, SchemeOverlap,
        SchemeSummary, SentimentSummary, StockSummary,
    };

    pub use crate::records::{ConvictionRecord, OverlapPairRecord, StockSummaryRecord};
    pub use crate::table::{rows_from_table, ColumnMapping};

    pub use fundscope_core::{HoldingRow, NameKey, Sentiment};
}
