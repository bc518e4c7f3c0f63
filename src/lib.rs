//! Managed Cache - An embeddable in-memory cache
//!
//! Provides a bounded, generic key-value cache with TTL expiration,
//! pluggable eviction strategies and hit/miss statistics. The cache is a
//! passive data structure: expiry is lazy and pull-based, enforced by a
//! cleanup pass that runs ahead of reads, writes and size queries instead
//! of by a background timer.
//!
//! # Example
//! ```
//! use managed_cache::{EvictionStrategy, ManagedCache, MINUTE};
//!
//! let cache: ManagedCache<String, String> =
//!     ManagedCache::new(100, 5 * MINUTE, EvictionStrategy::ByLastAccess).unwrap();
//!
//! cache.put("user:42".to_string(), "alice".to_string(), None);
//! assert_eq!(cache.get(&"user:42".to_string()), Some("alice".to_string()));
//! assert_eq!(cache.hit_count(), 1);
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStats, CacheStore, EvictionStrategy, ManagedCache};
pub use cache::{DAY, HOUR, MINUTE, SECOND};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
