//! # Fundscope Ext File
//!
//! File-based holdings sources, project configuration and report exporters.
//!
//! This crate provides the I/O around the pure aggregator:
//! - JSON snapshot source (scheme map, or one scheme's record list)
//! - CSV flat-table source with column auto-detection
//! - TOML/JSON project configuration and stock universe files
//! - CSV and pretty-printed JSON exporters
//!
//! ## Example
//!
//! ```rust,no_run
//! use fundscope_ext_file::{load_rows, InputSpec};
//! use fundscope_holdings::{compute_conviction, AggregatorConfig};
//!
//! let inputs = vec![
//!     InputSpec::parse("data/processed/holdings.json")?,
//!     InputSpec::parse("Axis Midcap=data/raw/axis_midcap.json")?,
//! ];
//! let rows = load_rows(&inputs)?;
//! let conviction = compute_conviction(&rows, &AggregatorConfig::default())?;
//! # Ok::<(), fundscope_ext_file::FileError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod export;
mod snapshot;
mod source;
mod table;

pub use config::*;
pub use error::*;
pub use export::*;
pub use snapshot::*;
pub use source::*;
pub use table::*;
