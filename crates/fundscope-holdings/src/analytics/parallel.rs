//! Parallel processing utilities for holdings analytics.
//!
//! Provides conditional parallel iteration based on configuration
//! and collection size. Uses rayon when the `parallel` feature is enabled.

use crate::types::AggregatorConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
///
/// Output order always matches input order.
///
/// # Example
///
/// ```ignore
/// let sizes = maybe_parallel_map(&scheme_sets, &config, |set| set.len());
/// ```
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AggregatorConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map_sequential() {
        let config = AggregatorConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_map_preserves_order_above_threshold() {
        let config = AggregatorConfig::new().with_threshold(4);
        let items: Vec<usize> = (0..100).collect();
        let results = maybe_parallel_map(&items, &config, |x| x * x);
        let expected: Vec<usize> = (0..100).map(|x| x * x).collect();
        assert_eq!(results, expected);
    }
}
