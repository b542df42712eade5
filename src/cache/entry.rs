//! Cache Entry Module
//!
//! Defines a single cached value together with its age, TTL and tags.

use std::collections::HashSet;
use std::time::Duration;

use crate::cache::clock::duration_ms;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of insertion or last replacement (ms on the cache clock)
    pub stored_at: u64,
    /// Insertion sequence, breaks `stored_at` ties
    pub seq: u64,
    /// Time-to-live measured from `stored_at`
    pub ttl: Duration,
    /// Labels used for group invalidation
    pub tags: HashSet<String>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stored at `now`.
    pub fn new(value: V, now: u64, seq: u64, ttl: Duration, tags: HashSet<String>) -> Self {
        Self {
            value,
            stored_at: now,
            seq,
            ttl,
            tags,
        }
    }

    /// Position of this entry in the age ordering.
    pub fn age_key(&self) -> (u64, u64) {
        (self.stored_at, self.seq)
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.stored_at)
    }

    pub fn ttl_ms(&self) -> u64 {
        duration_ms(self.ttl)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is stale only once its age is strictly
    /// greater than its TTL, so a read at exactly `stored_at + ttl` still hits.
    pub fn is_expired(&self, now: u64) -> bool {
        self.age_ms(now) > self.ttl_ms()
    }

    /// Exact-string tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> HashSet<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(42, 1000, 0, Duration::from_millis(500), tags(&["x"]));

        assert_eq!(entry.value, 42);
        assert_eq!(entry.stored_at, 1000);
        assert_eq!(entry.ttl_ms(), 500);
        assert!(entry.has_tag("x"));
    }

    #[test]
    fn test_entry_age() {
        let entry = CacheEntry::new("v", 1000, 0, Duration::from_secs(1), HashSet::new());

        assert_eq!(entry.age_ms(1000), 0);
        assert_eq!(entry.age_ms(1750), 750);
        // Clock readings before stored_at never underflow
        assert_eq!(entry.age_ms(10), 0);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("v", 1000, 0, Duration::from_millis(100), HashSet::new());

        assert!(!entry.is_expired(1099));
        assert!(!entry.is_expired(1100), "Entry at exactly its TTL is still live");
        assert!(entry.is_expired(1101));
    }

    #[test]
    fn test_huge_ttl_does_not_wrap() {
        let entry = CacheEntry::new(1, 0, 0, Duration::from_secs(1 << 62), HashSet::new());

        assert_eq!(entry.ttl_ms(), u64::MAX);
        assert!(!entry.is_expired(1));
        assert!(!entry.is_expired(u64::MAX));
    }

    #[test]
    fn test_tag_matching_is_exact() {
        let entry = CacheEntry::new(1, 0, 0, Duration::from_secs(1), tags(&["yield-curve", "US"]));

        assert!(entry.has_tag("US"));
        assert!(!entry.has_tag("us"));
        assert!(!entry.has_tag("yield"));
        assert!(!entry.has_tag("yield-curve*"));
    }

    #[test]
    fn test_age_key_orders_by_time_then_sequence() {
        let a = CacheEntry::new(1, 100, 7, Duration::from_secs(1), HashSet::new());
        let b = CacheEntry::new(2, 100, 8, Duration::from_secs(1), HashSet::new());
        let c = CacheEntry::new(3, 99, 9, Duration::from_secs(1), HashSet::new());

        assert!(a.age_key() < b.age_key());
        assert!(c.age_key() < a.age_key());
    }
}
