//! Cache Store Module
//!
//! Main cache engine: a bounded map with per-entry TTL, oldest-first
//! eviction and tag-based invalidation.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{
    AgeIndex, CacheCounters, CacheEntry, CacheSnapshot, Clock, EntrySnapshot, Subscribers,
    Subscription, SystemClock, TagIndex,
};

// == Tagged Cache ==
/// Bounded in-memory cache with TTL expiry and tag invalidation.
///
/// The cache is a plain owned value: it is meant to be created once and
/// handed to whatever needs it. It does no locking of its own; share it
/// across threads by wrapping it (the HTTP layer uses `Arc<RwLock<_>>`).
///
/// Expiry is lazy. A stale entry keeps its slot until it is read, pruned
/// with [`TaggedCache::prune_expired`], or evicted.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use market_cache::cache::TaggedCache;
///
/// let mut cache = TaggedCache::new(2);
/// cache.set_tagged("a", 1, Duration::from_secs(1), ["x"]);
/// cache.set_tagged("b", 2, Duration::from_secs(1), ["x"]);
/// cache.set_tagged("c", 3, Duration::from_secs(1), ["y"]);
/// assert_eq!(cache.get("a"), None);
///
/// cache.invalidate_by_tag("x");
/// assert_eq!(cache.stats().keys(), vec!["c"]);
/// ```
#[derive(Debug)]
pub struct TaggedCache<V, C: Clock = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Keys by storage time, oldest first
    ages: AgeIndex,
    /// Keys by tag
    tags: TagIndex,
    /// Invalidation callbacks
    subscribers: Subscribers,
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    next_seq: u64,
    clock: C,
}

impl<V> TaggedCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache holding at most `max_entries` entries (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, SystemClock::new())
    }
}

impl<V, C: Clock> TaggedCache<V, C> {
    /// Creates a cache driven by a custom clock.
    pub fn with_clock(max_entries: usize, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ages: AgeIndex::new(),
            tags: TagIndex::new(),
            subscribers: Subscribers::new(),
            counters: CacheCounters::new(),
            max_entries: max_entries.max(1),
            next_seq: 0,
            clock,
        }
    }

    // == Set ==
    /// Stores `value` under `key` with no tags. See [`TaggedCache::set_tagged`].
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.set_tagged(key, value, ttl, std::iter::empty::<String>());
    }

    /// Stores `value` under `key`, replacing any previous entry and its tags.
    ///
    /// If `key` is new and the cache is full, the entry with the oldest
    /// storage time is evicted first. Never fails.
    ///
    /// Callers must pass a non-empty key and a non-zero TTL.
    pub fn set_tagged<I, T>(&mut self, key: impl Into<String>, value: V, ttl: Duration, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let key = key.into();
        debug_assert!(!key.is_empty(), "cache key must not be empty");
        debug_assert!(!ttl.is_zero(), "cache ttl must be positive");

        let tags: HashSet<String> = tags.into_iter().map(Into::into).collect();
        let now = self.clock.now_ms();

        if self.remove_entry(&key).is_some() {
            trace!(key = %key, "replacing existing entry");
        } else if self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let entry = CacheEntry::new(value, now, seq, ttl, tags);
        self.ages.insert(entry.age_key(), &key);
        self.tags.add(&key, &entry.tags);
        self.entries.insert(key, entry);
        self.counters.record_set();
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// An expired entry found here is removed and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.counters.record_expirations(1);
            self.counters.record_miss();
            trace!(key, "expired on read");
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Live-entry check that leaves counters and entries untouched.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Delete ==
    /// Removes `key`, returning its value if it was stored (expired or not).
    pub fn delete(&mut self, key: &str) -> Option<V> {
        self.remove_entry(key).map(|entry| entry.value)
    }

    // == Invalidate By Tag ==
    /// Removes every entry tagged `tag` and returns how many were removed.
    ///
    /// When at least one entry goes, each subscriber of `tag` is called once.
    pub fn invalidate_by_tag(&mut self, tag: &str) -> usize {
        let keys = self.tags.keys_for(tag);
        for key in &keys {
            let entry = self.remove_entry(key);
            debug_assert!(
                entry.is_some_and(|e| e.has_tag(tag)),
                "tag index out of sync for {key}"
            );
        }

        let removed = keys.len();
        if removed > 0 {
            self.counters.record_invalidations(removed);
            let notified = self.subscribers.notify(tag);
            debug!(tag, removed, notified, "invalidated entries by tag");
        }
        removed
    }

    // == Subscribe ==
    /// Registers `callback` to run after any `invalidate_by_tag(tag)` that
    /// removes at least one entry. Use the returned handle to unsubscribe.
    pub fn subscribe<F>(&self, tag: &str, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribers.subscribe(tag, callback)
    }

    // == Clear ==
    /// Removes all entries and all subscriber registrations, and resets the
    /// counters.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.ages.clear();
        self.tags.clear();
        self.subscribers.clear();
        self.counters = CacheCounters::new();
        debug!(dropped, "cache cleared");
    }

    // == Stats ==
    /// Diagnostic snapshot. Does not prune or touch counters.
    pub fn stats(&self) -> CacheSnapshot {
        let now = self.clock.now_ms();
        let entries = self
            .ages
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key, entry)))
            .map(|(key, entry)| {
                let mut tags: Vec<String> = entry.tags.iter().cloned().collect();
                tags.sort();
                EntrySnapshot {
                    key: key.to_string(),
                    age_ms: entry.age_ms(now),
                    ttl_ms: entry.ttl_ms(),
                    tags,
                }
            })
            .collect();

        CacheSnapshot {
            size: self.entries.len(),
            max_entries: self.max_entries,
            entries,
            counters: self.counters.clone(),
        }
    }

    // == Prune Expired ==
    /// Removes all expired entries now. Returns the number removed.
    pub fn prune_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }

        let count = expired.len();
        self.counters.record_expirations(count);
        if count > 0 {
            debug!(count, "pruned expired entries");
        }
        count
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // == Internals ==
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.ages.remove(entry.age_key());
        self.tags.remove(key, &entry.tags);
        Some(entry)
    }

    fn evict_oldest(&mut self) {
        if let Some(key) = self.ages.pop_oldest() {
            if let Some(entry) = self.entries.remove(&key) {
                self.tags.remove(&key, &entry.tags);
            }
            self.counters.record_eviction();
            debug!(key = %key, "evicted oldest entry");
        }
    }
}
