//! Configuration Module
//!
//! Construction parameters for a cache instance.

use serde::{Deserialize, Serialize};

use crate::cache::{EvictionStrategy, MINUTE};
use crate::error::{CacheError, Result};

/// Cache construction parameters.
///
/// All values have defaults suited to a general-purpose lookup cache. The
/// cache constructors run [`validate`](Self::validate) eagerly, so an
/// invalid configuration never yields a usable cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries stored without an explicit TTL
    pub default_ttl: u64,
    /// Eviction ordering applied when over capacity
    pub strategy: EvictionStrategy,
}

impl CacheConfig {
    /// Creates a config with explicit values.
    pub fn new(max_entries: usize, default_ttl: u64, strategy: EvictionStrategy) -> Self {
        Self {
            max_entries,
            default_ttl,
            strategy,
        }
    }

    /// Sets the capacity bound.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the default TTL in milliseconds.
    pub fn with_default_ttl(mut self, default_ttl: u64) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Sets the eviction strategy.
    pub fn with_strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks construction invariants.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `max_entries` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidCapacity(self.max_entries));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 5 * MINUTE,
            strategy: EvictionStrategy::ByLastAdded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 5 * MINUTE);
        assert_eq!(config.strategy, EvictionStrategy::ByLastAdded);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::default()
            .with_max_entries(10)
            .with_default_ttl(1_000)
            .with_strategy(EvictionStrategy::ByAccessCount);

        assert_eq!(config.max_entries, 10);
        assert_eq!(config.default_ttl, 1_000);
        assert_eq!(config.strategy, EvictionStrategy::ByAccessCount);
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let config = CacheConfig::default().with_max_entries(0);
        assert_eq!(config.validate(), Err(CacheError::InvalidCapacity(0)));
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"max_entries": 25, "strategy": "by_last_access"}"#).unwrap();

        assert_eq!(config.max_entries, 25);
        assert_eq!(config.default_ttl, 5 * MINUTE);
        assert_eq!(config.strategy, EvictionStrategy::ByLastAccess);
    }

    #[test]
    fn test_config_deserialize_rejects_unknown_strategy() {
        let result = serde_json::from_str::<CacheConfig>(r#"{"strategy": "by_magic"}"#);
        assert!(result.is_err());
    }
}
