//! Project configuration files.
//!
//! A project file names the holdings sources to read, the stock universe
//! for category summaries and aggregator settings:
//!
//! ```toml
//! [aggregator]
//! aum_decimals = 2
//!
//! [universe]
//! small_cap = ["Kaynes Technology", "Anant Raj"]
//! mid_cap = ["Persistent Systems"]
//!
//! [[sources]]
//! path = "data/raw/sbi_small_cap.json"
//! scheme = "SBI Small Cap Fund"
//!
//! [[sources]]
//! path = "data/processed/holdings.csv"
//! ```
//!
//! Files ending in `.json` are read as JSON with the same layout; anything
//! else is TOML.

use std::path::{Path, PathBuf};

use fundscope_holdings::{AggregatorConfig, StockUniverse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FileError, FileResult};
use crate::source::InputSpec;

/// One configured holdings source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// File path, relative to the configuration file.
    pub path: PathBuf,

    /// Scheme name for a single-scheme record list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

/// Contents of a project configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Aggregator settings.
    pub aggregator: AggregatorConfig,

    /// Stock universe for category summaries.
    pub universe: StockUniverse,

    /// Holdings sources.
    pub sources: Vec<SourceSpec>,

    /// Directory the file was loaded from; relative source paths resolve
    /// against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl ProjectConfig {
    /// Loads a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let mut config: ProjectConfig = read_document(path)?;
        config.aggregator.validate()?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        info!(
            path = %path.display(),
            sources = config.sources.len(),
            categories = config.universe.len(),
            "loaded project configuration"
        );
        Ok(config)
    }

    /// Parses TOML configuration text. Relative paths resolve against the
    /// current directory.
    pub fn from_toml_str(text: &str) -> FileResult<Self> {
        let config: ProjectConfig =
            toml::from_str(text).map_err(|e| FileError::toml("<inline>", e))?;
        config.aggregator.validate()?;
        Ok(config)
    }

    /// Input specifications of the configured sources.
    pub fn inputs(&self) -> FileResult<Vec<InputSpec>> {
        self.sources
            .iter()
            .map(|source| InputSpec::from_source_spec(source, &self.base_dir))
            .collect()
    }
}

/// Loads a standalone stock universe file (TOML or JSON mapping category to
/// stock list).
pub fn load_universe(path: impl AsRef<Path>) -> FileResult<StockUniverse> {
    let path = path.as_ref();
    let universe: StockUniverse = read_document(path)?;
    info!(
        path = %path.display(),
        categories = universe.len(),
        "loaded stock universe"
    );
    Ok(universe)
}

fn read_document<T: DeserializeOwned>(path: &Path) -> FileResult<T> {
    let text = std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&text).map_err(|e| FileError::json(path, e))
    } else {
        toml::from_str(&text).map_err(|e| FileError::toml(path, e))
    }
}
