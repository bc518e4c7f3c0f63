//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction.
///
/// Lookup-style operations never fail: a missing or expired key is reported
/// as `None` or `false`, not as an error. Only misconfiguration at
/// construction time surfaces as a hard failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity bound must be at least one entry
    #[error("invalid capacity: max_entries must be positive, got {0}")]
    InvalidCapacity(usize),

    /// Strategy name outside the closed set of eviction strategies
    #[error("unknown eviction strategy: {0}")]
    UnknownStrategy(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidCapacity(0);
        assert_eq!(
            err.to_string(),
            "invalid capacity: max_entries must be positive, got 0"
        );

        let err = CacheError::UnknownStrategy("by_magic".to_string());
        assert_eq!(err.to_string(), "unknown eviction strategy: by_magic");
    }
}
