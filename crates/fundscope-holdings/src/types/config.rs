//! Configuration for holdings aggregation.

use serde::{Deserialize, Serialize};

use crate::error::{HoldingsError, HoldingsResult};

/// Largest number of decimals accepted for rounded outputs.
const MAX_DECIMALS: u32 = 10;

/// Configuration for holdings aggregation.
///
/// Controls rounding of reported figures and parallelism of the overlap
/// matrix. Conviction category thresholds are fixed and not part of the
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum scheme count to compute the overlap matrix in parallel.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Decimals kept for average % AUM figures.
    pub aum_decimals: u32,

    /// Decimals kept for conviction scores.
    pub score_decimals: u32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
            aum_decimals: 2,
            score_decimals: 1,
        }
    }
}

impl AggregatorConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the decimals kept for average % AUM.
    #[must_use]
    pub fn with_aum_decimals(mut self, decimals: u32) -> Self {
        self.aum_decimals = decimals;
        self
    }

    /// Sets the decimals kept for conviction scores.
    #[must_use]
    pub fn with_score_decimals(mut self, decimals: u32) -> Self {
        self.score_decimals = decimals;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks that the rounding settings are usable.
    pub fn validate(&self) -> HoldingsResult<()> {
        if self.aum_decimals > MAX_DECIMALS {
            return Err(HoldingsError::invalid_config(format!(
                "aum_decimals must be at most {MAX_DECIMALS}, got {}",
                self.aum_decimals
            )));
        }
        if self.score_decimals > MAX_DECIMALS {
            return Err(HoldingsError::invalid_config(format!(
                "score_decimals must be at most {MAX_DECIMALS}, got {}",
                self.score_decimals
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AggregatorConfig::default();
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 64);
        assert_eq!(config.aum_decimals, 2);
        assert_eq!(config.score_decimals, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sequential() {
        let config = AggregatorConfig::sequential();
        assert!(!config.parallel);
        assert!(!config.should_parallelize(10_000));
    }

    #[test]
    fn test_builder_pattern() {
        let config = AggregatorConfig::new()
            .with_parallel(true)
            .with_threshold(8)
            .with_aum_decimals(3)
            .with_score_decimals(2);

        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.aum_decimals, 3);
        assert_eq!(config.score_decimals, 2);
    }

    #[test]
    fn test_should_parallelize() {
        let config = AggregatorConfig::new().with_threshold(16);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(8));
            assert!(config.should_parallelize(16));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(8));
            assert!(!config.should_parallelize(16));
        }
    }

    #[test]
    fn test_validate_rejects_excessive_decimals() {
        let config = AggregatorConfig::new().with_aum_decimals(11);
        assert!(matches!(
            config.validate(),
            Err(HoldingsError::InvalidConfig { .. })
        ));

        let config = AggregatorConfig::new().with_score_decimals(42);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_partial() {
        let parsed: AggregatorConfig =
            serde_json::from_str(r#"{"parallel_threshold": 12}"#).unwrap();
        assert_eq!(parsed.parallel_threshold, 12);
        assert_eq!(parsed.aum_decimals, 2);
        assert!(parsed.parallel);
    }
}
