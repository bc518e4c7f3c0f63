//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration and
//! strategy-driven capacity eviction.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, EvictionStrategy};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with TTL expiration and strategy-driven eviction.
///
/// `CacheStore` is the single-owner engine: mutating operations take
/// `&mut self` and assume exclusive access. For shared access from several
/// threads, wrap it in [`ManagedCache`], which holds the store behind one
/// lock and keeps each operation a single critical section.
///
/// Expiry is lazy and pull-based. There is no background sweeper; every
/// read, write or size query first runs a cleanup pass, so expired entries
/// disappear the next time anything observes the cache.
///
/// [`ManagedCache`]: crate::ManagedCache
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<K, V>>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries stored without an explicit TTL
    default_ttl: u64,
    /// Ordering used to pick victims when over capacity
    strategy: EvictionStrategy,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_entries` - Capacity bound; must be at least 1
    /// * `default_ttl` - TTL in milliseconds applied when `put` omits one
    /// * `strategy` - Eviction ordering, fixed for the cache's lifetime
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `max_entries` is zero.
    pub fn new(max_entries: usize, default_ttl: u64, strategy: EvictionStrategy) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::InvalidCapacity(max_entries));
        }

        debug!(max_entries, default_ttl, %strategy, "cache store created");

        Ok(Self {
            entries: HashMap::new(),
            max_entries,
            default_ttl,
            strategy,
            stats: CacheStats::new(),
        })
    }

    /// Creates a new CacheStore from a configuration, validating it first.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.max_entries, config.default_ttl, config.strategy)
    }

    /// Creates a CacheStore with the default configuration.
    pub fn with_defaults() -> Self {
        let config = CacheConfig::default();
        Self {
            entries: HashMap::new(),
            max_entries: config.max_entries,
            default_ttl: config.default_ttl,
            strategy: config.strategy,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves an owned copy of the value stored under `key`.
    ///
    /// Runs a cleanup pass first, so a single `get` can also remove expired
    /// entries other than the requested one. A present, valid entry counts
    /// as a hit and is touched; anything else counts as a miss, and an
    /// invalid entry found under the key is removed on the spot.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.cleanup();

        match self.entries.get_mut(key) {
            Some(entry) if entry.is_valid() => {
                self.stats.record_hit();
                Some(entry.touch())
            }
            Some(_) => {
                // crossed its TTL boundary since the sweep
                self.entries.remove(key);
                self.stats.record_expiration();
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains Key ==
    /// Reports whether a valid entry exists under `key`.
    ///
    /// Runs cleanup first and counts toward hit/miss statistics exactly
    /// like [`get`](Self::get), but does not touch the entry or return the
    /// value.
    pub fn contains_key(&mut self, key: &K) -> bool {
        self.cleanup();

        let present = self.entries.contains_key(key);
        if present {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        present
    }

    // == Contains Value ==
    /// Scans currently-valid entries for one whose value equals `value`.
    ///
    /// Read-only: no cleanup pass, no statistics, and no access metadata
    /// updates.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries
            .values()
            .any(|entry| entry.is_valid() && entry.value() == value)
    }

    // == Put ==
    /// Stores `value` under `key`, returning the previously stored value.
    ///
    /// An existing entry is replaced wholesale: the replacement starts with
    /// a fresh creation time and zeroed access bookkeeping. When the store
    /// is at capacity, a cleanup pass reserving one slot runs before the
    /// insert, so the size bound holds once the call returns.
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in milliseconds (uses the default TTL if None)
    pub fn put(&mut self, key: K, value: V, ttl: Option<u64>) -> Option<V> {
        if self.entries.len() >= self.max_entries {
            self.cleanup_excess(self.entries.len() + 1 - self.max_entries);
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(key.clone(), value, effective_ttl);
        self.entries.insert(key, entry).map(CacheEntry::into_value)
    }

    // == Remove ==
    /// Removes and returns the value under `key`, if any.
    ///
    /// Removing an absent key is a no-op returning `None`. No statistics
    /// impact either way.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(CacheEntry::into_value)
    }

    // == Remove All ==
    /// Removes every entry whose key appears in `keys`. No statistics
    /// impact.
    pub fn remove_all<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        for key in keys {
            self.entries.remove(key);
        }
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are left untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Number of valid entries.
    ///
    /// Runs a full cleanup pass first, so the returned cardinality reflects
    /// only valid, within-bound entries.
    pub fn len(&mut self) -> usize {
        self.cleanup();
        self.entries.len()
    }

    // == Is Empty ==
    /// True when no valid entry remains. Runs a full cleanup pass first.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // == Key Set ==
    /// Snapshot of the keys of all valid entries. Runs cleanup first.
    pub fn key_set(&mut self) -> HashSet<K> {
        self.cleanup();
        self.entries.keys().cloned().collect()
    }

    // == Statistics ==
    /// Snapshot of the current statistics counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// Number of lookups that found a valid entry.
    pub fn hit_count(&self) -> u64 {
        self.stats.hits
    }

    /// Number of lookups that found nothing.
    pub fn miss_count(&self) -> u64 {
        self.stats.misses
    }

    /// Total lookups: `hit_count + miss_count`.
    pub fn request_count(&self) -> u64 {
        self.stats.request_count()
    }

    /// Zeroes the statistics counters as a unit.
    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }

    // == Average Remaining TTL ==
    /// Mean of the configured TTLs across surviving entries, in
    /// milliseconds; 0 for an empty cache.
    ///
    /// Runs cleanup first. The averaged figure is each entry's configured
    /// `time_to_live`, not its live remaining life — a fresh ten-minute
    /// entry contributes ten minutes however old it gets. Use
    /// [`remaining_ttl`](Self::remaining_ttl) for the live per-entry
    /// figure.
    pub fn average_remaining_ttl(&mut self) -> u64 {
        self.cleanup();

        if self.entries.is_empty() {
            return 0;
        }

        let total: u128 = self
            .entries
            .values()
            .map(|entry| u128::from(entry.time_to_live()))
            .sum();
        (total / self.entries.len() as u128) as u64
    }

    // == Remaining TTL ==
    /// Signed remaining life in milliseconds of the entry under `key`.
    ///
    /// Read-only: no cleanup, no statistics, no touch. Negative means the
    /// entry has expired but has not been swept yet; `None` means no entry
    /// is stored under the key.
    pub fn remaining_ttl(&self, key: &K) -> Option<i64> {
        self.entries.get(key).map(CacheEntry::remaining_life_ms)
    }

    // == Accessors ==
    /// Capacity bound, fixed at construction.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Default TTL in milliseconds applied when `put` omits one.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Active eviction strategy.
    pub fn strategy(&self) -> EvictionStrategy {
        self.strategy
    }

    // == Cleanup ==
    /// Removes expired entries and enforces the capacity bound.
    ///
    /// Public so hosts can force a pass eagerly; every read, write and
    /// size-observing operation already runs one.
    pub fn cleanup(&mut self) {
        let excess = self.entries.len().saturating_sub(self.max_entries);
        self.cleanup_excess(excess);
    }

    /// Two-phase cleanup: expiry sweep, then capacity eviction of at least
    /// `excess` entries.
    ///
    /// Phase one removes every entry past its TTL, shrinking the
    /// outstanding excess by the number swept. Phase two, if excess
    /// remains, stable-sorts the survivors ascending under the active
    /// strategy against a single clock snapshot and removes from the front
    /// until the excess is gone. Ties on the strategy metric keep map
    /// iteration order for the pass.
    fn cleanup_excess(&mut self, mut excess: usize) {
        // phase 1: sweep everything past its TTL
        let expired: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_valid())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.stats.record_expiration();
        }
        excess = excess.saturating_sub(expired.len());

        if !expired.is_empty() {
            debug!(swept = expired.len(), "expiry sweep removed entries");
        }

        // phase 2: still over budget, evict the least favored survivors
        if excess > 0 {
            let now = current_timestamp_ms();
            let strategy = self.strategy;

            let mut survivors: Vec<&CacheEntry<K, V>> = self.entries.values().collect();
            survivors.sort_by(|a, b| strategy.order(a, b, now));

            let victims: Vec<K> = survivors
                .iter()
                .take(excess)
                .map(|entry| entry.key().clone())
                .collect();

            for key in &victims {
                self.entries.remove(key);
                self.stats.record_eviction();
            }

            debug!(evicted = victims.len(), %strategy, "capacity eviction");
        }
    }
}
