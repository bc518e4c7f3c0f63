//! Eviction Strategy Module
//!
//! Defines the closed set of orderings used to pick eviction victims when
//! the cache is over capacity.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Eviction Strategy ==
/// Total ordering over entries used by capacity eviction.
///
/// Entries sort ascending under the active strategy and victims are taken
/// from the front of the sorted sequence, so the least-favored entries go
/// first. The set is closed: selecting a strategy outside it is
/// unrepresentable, and parsing an unrecognized name fails eagerly with
/// [`CacheError::UnknownStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionStrategy {
    /// Evict the oldest-created entries first
    ByLastAdded,
    /// Evict the least-recently-read entries first
    ByLastAccess,
    /// Evict the entries closest to expiry first
    ByRemainingTtl,
    /// Evict the least-frequently-read entries first
    ByAccessCount,
}

impl EvictionStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [EvictionStrategy; 4] = [
        EvictionStrategy::ByLastAdded,
        EvictionStrategy::ByLastAccess,
        EvictionStrategy::ByRemainingTtl,
        EvictionStrategy::ByAccessCount,
    ];

    // == Order ==
    /// Compares two entries under this strategy.
    ///
    /// `now_ms` is a single clock snapshot for the whole pass. Remaining
    /// life must be measured against that snapshot rather than re-reading
    /// the clock per comparison, or the ordering stops being total while
    /// the clock advances mid-sort.
    pub fn order<K, V>(
        &self,
        a: &CacheEntry<K, V>,
        b: &CacheEntry<K, V>,
        now_ms: u64,
    ) -> Ordering {
        match self {
            EvictionStrategy::ByLastAdded => a.created_at().cmp(&b.created_at()),
            EvictionStrategy::ByLastAccess => a.last_accessed_at().cmp(&b.last_accessed_at()),
            EvictionStrategy::ByRemainingTtl => {
                a.remaining_life_at(now_ms).cmp(&b.remaining_life_at(now_ms))
            }
            EvictionStrategy::ByAccessCount => a.access_count().cmp(&b.access_count()),
        }
    }

    /// Canonical name, stable across `Display`, `FromStr` and serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::ByLastAdded => "by_last_added",
            EvictionStrategy::ByLastAccess => "by_last_access",
            EvictionStrategy::ByRemainingTtl => "by_remaining_ttl",
            EvictionStrategy::ByAccessCount => "by_access_count",
        }
    }
}

impl Default for EvictionStrategy {
    fn default() -> Self {
        EvictionStrategy::ByLastAdded
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "by_last_added" => Ok(EvictionStrategy::ByLastAdded),
            "by_last_access" => Ok(EvictionStrategy::ByLastAccess),
            "by_remaining_ttl" => Ok(EvictionStrategy::ByRemainingTtl),
            "by_access_count" => Ok(EvictionStrategy::ByAccessCount),
            other => Err(CacheError::UnknownStrategy(other.to_string())),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn entry(ttl_ms: u64) -> CacheEntry<&'static str, &'static str> {
        CacheEntry::new("key", "value", ttl_ms)
    }

    #[test]
    fn test_order_by_last_added() {
        let older = entry(60_000);
        sleep(Duration::from_millis(5));
        let newer = entry(60_000);

        let now = newer.created_at();
        let strategy = EvictionStrategy::ByLastAdded;
        assert_eq!(strategy.order(&older, &newer, now), Ordering::Less);
        assert_eq!(strategy.order(&newer, &older, now), Ordering::Greater);
        assert_eq!(strategy.order(&older, &older, now), Ordering::Equal);
    }

    #[test]
    fn test_order_by_last_access() {
        let mut touched = entry(60_000);
        let untouched = entry(60_000);

        sleep(Duration::from_millis(5));
        touched.touch();

        let now = touched.last_accessed_at();
        let strategy = EvictionStrategy::ByLastAccess;
        assert_eq!(strategy.order(&untouched, &touched, now), Ordering::Less);
    }

    #[test]
    fn test_order_by_remaining_ttl() {
        let short = entry(1_000);
        let long = entry(60_000);

        let now = short.created_at();
        let strategy = EvictionStrategy::ByRemainingTtl;
        assert_eq!(strategy.order(&short, &long, now), Ordering::Less);
    }

    #[test]
    fn test_order_by_remaining_ttl_expired_entries() {
        // Both expired against the snapshot; the more overdue one sorts first
        let very_overdue = entry(100);
        let overdue = entry(500);

        let now = very_overdue.created_at() + 1_000;
        let strategy = EvictionStrategy::ByRemainingTtl;
        assert_eq!(strategy.order(&very_overdue, &overdue, now), Ordering::Less);
    }

    #[test]
    fn test_order_by_access_count() {
        let mut popular = entry(60_000);
        let unpopular = entry(60_000);

        popular.touch();
        popular.touch();

        let now = popular.created_at();
        let strategy = EvictionStrategy::ByAccessCount;
        assert_eq!(strategy.order(&unpopular, &popular, now), Ordering::Less);
    }

    #[test]
    fn test_parse_known_names() {
        for strategy in EvictionStrategy::ALL {
            let parsed: EvictionStrategy = strategy.as_str().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn test_parse_unknown_name_rejected() {
        let result = "by_magic".parse::<EvictionStrategy>();
        assert_eq!(
            result,
            Err(CacheError::UnknownStrategy("by_magic".to_string()))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&EvictionStrategy::ByRemainingTtl).unwrap();
        assert_eq!(json, "\"by_remaining_ttl\"");

        let parsed: EvictionStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EvictionStrategy::ByRemainingTtl);
    }

    #[test]
    fn test_serde_rejects_unknown_variant() {
        let result = serde_json::from_str::<EvictionStrategy>("\"by_magic\"");
        assert!(result.is_err());
    }
}
