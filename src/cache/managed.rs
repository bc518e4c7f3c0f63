//! Managed Cache Module
//!
//! Thread-safe shared handle over the cache store.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::{CacheStats, CacheStore, EvictionStrategy};
use crate::config::CacheConfig;
use crate::error::Result;

// == Managed Cache ==
/// Thread-safe cache handle shared across threads.
///
/// Wraps a [`CacheStore`] behind a single read-write lock. Cloning the
/// handle is cheap and every clone operates on the same underlying store.
///
/// Locking discipline: operations that mutate the store or trigger a
/// cleanup pass (including `get`, which updates access metadata) hold the
/// write lock for their full duration, so cleanup always observes and
/// mutates the whole store atomically. The read-only, statistics-free
/// paths (`contains_value`, `remaining_ttl`) and the statistics accessors
/// take the read lock.
#[derive(Debug)]
pub struct ManagedCache<K, V> {
    store: Arc<RwLock<CacheStore<K, V>>>,
}

impl<K, V> Clone for ManagedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<K, V> ManagedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new ManagedCache.
    ///
    /// # Arguments
    /// * `max_entries` - Capacity bound; must be at least 1
    /// * `default_ttl` - TTL in milliseconds applied when `put` omits one
    /// * `strategy` - Eviction ordering, fixed for the cache's lifetime
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `max_entries` is zero.
    ///
    /// [`CacheError::InvalidCapacity`]: crate::CacheError::InvalidCapacity
    pub fn new(max_entries: usize, default_ttl: u64, strategy: EvictionStrategy) -> Result<Self> {
        Ok(Self::from_store(CacheStore::new(
            max_entries,
            default_ttl,
            strategy,
        )?))
    }

    /// Creates a new ManagedCache from a configuration, validating it
    /// first.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::from_store(CacheStore::from_config(config)?))
    }

    /// Creates a ManagedCache with the default configuration.
    pub fn with_defaults() -> Self {
        Self::from_store(CacheStore::with_defaults())
    }

    fn from_store(store: CacheStore<K, V>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    // == Get ==
    /// Retrieves an owned copy of the value stored under `key`.
    ///
    /// See [`CacheStore::get`] for the full semantics; the call holds the
    /// write lock because a hit updates access metadata and the leading
    /// cleanup pass may remove entries.
    pub fn get(&self, key: &K) -> Option<V> {
        self.store.write().get(key)
    }

    // == Contains Key ==
    /// Reports whether a valid entry exists under `key`, counting toward
    /// hit/miss statistics like `get`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.write().contains_key(key)
    }

    // == Contains Value ==
    /// Scans currently-valid entries for one whose value equals `value`.
    ///
    /// Takes only the read lock: no cleanup, no statistics, no metadata
    /// updates.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.store.read().contains_value(value)
    }

    // == Put ==
    /// Stores `value` under `key`, returning the previously stored value.
    ///
    /// `ttl` overrides the default TTL for this entry only, in
    /// milliseconds.
    pub fn put(&self, key: K, value: V, ttl: Option<u64>) -> Option<V> {
        self.store.write().put(key, value, ttl)
    }

    // == Remove ==
    /// Removes and returns the value under `key`, if any. Removing an
    /// absent key is a no-op returning `None`.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.store.write().remove(key)
    }

    // == Remove All ==
    /// Removes every entry whose key appears in `keys`.
    pub fn remove_all<'a, I>(&self, keys: I)
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        self.store.write().remove_all(keys)
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        self.store.write().clear()
    }

    // == Length ==
    /// Number of valid entries, after a full cleanup pass.
    pub fn len(&self) -> usize {
        self.store.write().len()
    }

    /// True when no valid entry remains, after a full cleanup pass.
    pub fn is_empty(&self) -> bool {
        self.store.write().is_empty()
    }

    // == Key Set ==
    /// Snapshot of the keys of all valid entries, after a full cleanup
    /// pass.
    pub fn key_set(&self) -> HashSet<K> {
        self.store.write().key_set()
    }

    // == Cleanup ==
    /// Forces a cleanup pass (expiry sweep plus capacity eviction).
    pub fn cleanup(&self) {
        self.store.write().cleanup()
    }

    // == Statistics ==
    /// Snapshot of the current statistics counters, read under one
    /// consistent view.
    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    /// Number of lookups that found a valid entry.
    pub fn hit_count(&self) -> u64 {
        self.store.read().hit_count()
    }

    /// Number of lookups that found nothing.
    pub fn miss_count(&self) -> u64 {
        self.store.read().miss_count()
    }

    /// Total lookups: `hit_count + miss_count`, read under one lock
    /// acquisition so the identity holds even with concurrent writers.
    pub fn request_count(&self) -> u64 {
        self.store.read().request_count()
    }

    /// Zeroes the statistics counters as a unit, atomically with respect
    /// to concurrent readers.
    pub fn reset_statistics(&self) {
        self.store.write().reset_statistics()
    }

    // == Average Remaining TTL ==
    /// Mean of the configured TTLs across surviving entries; see
    /// [`CacheStore::average_remaining_ttl`].
    pub fn average_remaining_ttl(&self) -> u64 {
        self.store.write().average_remaining_ttl()
    }

    // == Remaining TTL ==
    /// Signed remaining life in milliseconds of the entry under `key`,
    /// without cleanup, statistics or touch.
    pub fn remaining_ttl(&self, key: &K) -> Option<i64> {
        self.store.read().remaining_ttl(key)
    }

    // == Accessors ==
    /// Capacity bound, fixed at construction.
    pub fn max_entries(&self) -> usize {
        self.store.read().max_entries()
    }

    /// Default TTL in milliseconds applied when `put` omits one.
    pub fn default_ttl(&self) -> u64 {
        self.store.read().default_ttl()
    }

    /// Active eviction strategy.
    pub fn strategy(&self) -> EvictionStrategy {
        self.store.read().strategy()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn cache(max_entries: usize) -> ManagedCache<String, String> {
        ManagedCache::new(max_entries, 300_000, EvictionStrategy::ByLastAdded).unwrap()
    }

    #[test]
    fn test_managed_basic_round_trip() {
        let cache = cache(100);

        cache.put("key1".to_string(), "value1".to_string(), None);
        assert_eq!(cache.get(&"key1".to_string()), Some("value1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_managed_with_defaults() {
        let cache: ManagedCache<String, String> = ManagedCache::with_defaults();
        assert_eq!(cache.max_entries(), 1000);
        assert_eq!(cache.strategy(), EvictionStrategy::ByLastAdded);
    }

    #[test]
    fn test_managed_clones_share_the_store() {
        let cache = cache(100);
        let other = cache.clone();

        cache.put("key1".to_string(), "value1".to_string(), None);
        assert_eq!(other.get(&"key1".to_string()), Some("value1".to_string()));

        other.remove(&"key1".to_string());
        assert_eq!(cache.get(&"key1".to_string()), None);
    }

    #[test]
    fn test_managed_concurrent_writers_respect_capacity() {
        let cache = cache(50);
        let mut handles = Vec::new();

        for worker in 0..4 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    cache.put(format!("worker{worker}:key{i}"), format!("value{i}"), None);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 50);
    }

    #[test]
    fn test_managed_concurrent_statistics_identity() {
        let cache = cache(100);
        cache.put("shared".to_string(), "value".to_string(), None);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..50 {
                    cache.get(&"shared".to_string());
                    cache.get(&format!("ghost{i}"));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, cache.request_count());
        assert_eq!(stats.hits, 200);
        assert_eq!(stats.misses, 200);
    }
}
