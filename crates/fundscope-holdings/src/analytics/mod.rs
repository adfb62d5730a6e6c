//! Holdings analytics.
//!
//! This module provides the aggregate statistics computed over holding rows:
//! - Stock summaries (fund count, average % AUM, dominant sentiment)
//! - Conviction scores and categories
//! - Pairwise scheme overlap and the overlap matrix
//! - Scheme summaries
//! - Category summaries over a caller-supplied stock universe
//!
//! All functions are pure - they take rows and configuration as input
//! and return computed results. No caching, no I/O, no side effects.

mod category;
mod conviction;
mod overlap;
mod parallel;
mod schemes;
mod stocks;

pub use category::*;
pub use conviction::*;
pub use overlap::*;
pub use parallel::*;
pub use schemes::*;
pub use stocks::*;

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
