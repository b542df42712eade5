//! Cache Statistics Module
//!
//! Counters and the diagnostic snapshot returned by `TaggedCache::stats`.

use serde::Serialize;

// == Cache Counters ==
/// Tracks cache activity since creation (or the last `clear`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed by the capacity bound
    pub evictions: u64,
    /// Expired entries removed, lazily on read or by `prune_expired`
    pub expirations: u64,
    /// Entries removed by tag invalidation
    pub invalidations: u64,
    /// Calls to `set`
    pub sets: u64,
}

impl CacheCounters {
    // == Constructor ==
    /// Creates counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }
}

// == Snapshots ==
/// One entry as seen by `stats()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub key: String,
    /// Milliseconds since the entry was stored
    pub age_ms: u64,
    pub ttl_ms: u64,
    /// Sorted for stable output
    pub tags: Vec<String>,
}

/// Point-in-time view of the cache. Expired entries that were not read yet
/// are still listed: they hold a slot until read or evicted.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    pub size: usize,
    pub max_entries: usize,
    /// Oldest `stored_at` first
    pub entries: Vec<EntrySnapshot>,
    pub counters: CacheCounters,
}

impl CacheSnapshot {
    /// Keys in snapshot order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }
}
