//! Configuration and input types for holdings aggregation.
//!
//! - [`AggregatorConfig`]: Configuration for aggregation (rounding, parallelism)
//! - [`StockUniverse`]: Caller-supplied category → stock list used by category summaries

mod config;
mod universe;

pub use config::AggregatorConfig;
pub use universe::StockUniverse;
