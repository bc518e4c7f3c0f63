//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry: an immutable key/TTL record wrapping a value and
/// its access bookkeeping.
///
/// Entries never leave the cache that owns them; callers only ever receive
/// owned clones of the stored value. Access metadata (`last_accessed_at`,
/// `access_count`) changes through [`touch`](Self::touch) and nowhere else.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// Entry identity, fixed at creation
    key: K,
    /// The stored value
    value: V,
    /// Time to live in milliseconds, fixed at creation
    time_to_live: u64,
    /// Creation timestamp (Unix milliseconds)
    created_at: u64,
    /// Timestamp of the most recent successful read (Unix milliseconds)
    last_accessed_at: u64,
    /// Number of successful reads
    access_count: u64,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry with the given TTL.
    ///
    /// `last_accessed_at` starts equal to `created_at` and the access count
    /// starts at zero.
    ///
    /// # Arguments
    /// * `key` - The entry's identity
    /// * `value` - The value to store
    /// * `ttl_ms` - Time to live in milliseconds
    pub fn new(key: K, value: V, ttl_ms: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            key,
            value,
            time_to_live: ttl_ms,
            created_at: now,
            last_accessed_at: now,
            access_count: 0,
        }
    }

    // == Accessors ==
    /// The entry's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Reads the stored value without counting as an access.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, yielding the stored value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Configured time to live in milliseconds.
    pub fn time_to_live(&self) -> u64 {
        self.time_to_live
    }

    /// Creation timestamp (Unix milliseconds).
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Timestamp of the most recent successful read (Unix milliseconds).
    pub fn last_accessed_at(&self) -> u64 {
        self.last_accessed_at
    }

    /// Number of successful reads since creation.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    // == Is Valid ==
    /// Checks whether the entry's TTL has not yet elapsed.
    ///
    /// Boundary condition: an entry is valid strictly while
    /// `now - created_at < time_to_live`. Once the full TTL duration has
    /// elapsed the entry is invalid, so a zero TTL produces an entry that
    /// is never valid.
    pub fn is_valid(&self) -> bool {
        self.elapsed_ms() < self.time_to_live
    }

    // == Elapsed ==
    /// Milliseconds since the entry was created.
    pub fn elapsed_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }

    // == Remaining Life ==
    /// Returns the remaining lifetime in milliseconds.
    ///
    /// Negative once the entry has expired. The sign is meaningful:
    /// eviction compares raw remaining life, so already-expired entries
    /// still order among themselves by how overdue they are. Callers must
    /// not clamp before comparing.
    pub fn remaining_life_ms(&self) -> i64 {
        self.remaining_life_at(current_timestamp_ms())
    }

    /// Remaining lifetime measured against a caller-supplied clock
    /// snapshot, so one cleanup pass compares every entry at a single
    /// instant.
    pub fn remaining_life_at(&self, now_ms: u64) -> i64 {
        self.time_to_live as i64 - now_ms.saturating_sub(self.created_at) as i64
    }
}

impl<K, V: Clone> CacheEntry<K, V> {
    // == Touch ==
    /// Returns an owned clone of the stored value, recording the access.
    ///
    /// Sets `last_accessed_at` to the current time and increments
    /// `access_count`. This is the only path that mutates access metadata.
    pub fn touch(&mut self) -> V {
        self.last_accessed_at = current_timestamp_ms();
        self.access_count += 1;
        self.value.clone()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
