//! Evaluator configuration.

use crate::kernels::pattern::DEFAULT_PATTERN_CACHE_CAPACITY;

/// Configuration for an [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of compiled LIKE/MATCH patterns kept (0 = no caching).
    pub pattern_cache_capacity: usize,
    /// Promote mixed numeric operands of arithmetic and comparison
    /// operators to a common type instead of failing.
    pub implicit_promotion: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            pattern_cache_capacity: DEFAULT_PATTERN_CACHE_CAPACITY,
            implicit_promotion: true,
        }
    }
}

impl EvalConfig {
    /// Creates a new evaluator configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pattern cache capacity.
    #[must_use]
    pub fn with_pattern_cache_capacity(mut self, capacity: usize) -> Self {
        self.pattern_cache_capacity = capacity;
        self
    }

    /// Enables or disables implicit numeric promotion.
    #[must_use]
    pub fn with_implicit_promotion(mut self, enabled: bool) -> Self {
        self.implicit_promotion = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::new();
        assert_eq!(config.pattern_cache_capacity, 256);
        assert!(config.implicit_promotion);
    }

    #[test]
    fn test_builder() {
        let config = EvalConfig::new()
            .with_pattern_cache_capacity(8)
            .with_implicit_promotion(false);
        assert_eq!(config.pattern_cache_capacity, 8);
        assert!(!config.implicit_promotion);
    }
}
