//! Age Index Module
//!
//! Orders keys by the time they were stored, for oldest-first eviction.

use std::collections::BTreeMap;

// == Age Index ==
/// Tracks keys ordered by `(stored_at, seq)`.
///
/// Reads never reorder the index: only a `set` moves a key (to the newest
/// position). Eviction therefore picks the entry stored longest ago, not the
/// one accessed longest ago.
#[derive(Debug, Default)]
pub struct AgeIndex {
    order: BTreeMap<(u64, u64), String>,
}

impl AgeIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
        }
    }

    // == Insert ==
    /// Records `key` at position `at`.
    pub fn insert(&mut self, at: (u64, u64), key: &str) {
        self.order.insert(at, key.to_string());
    }

    // == Remove ==
    /// Forgets the key stored at position `at`.
    pub fn remove(&mut self, at: (u64, u64)) -> Option<String> {
        self.order.remove(&at)
    }

    // == Pop Oldest ==
    /// Removes and returns the oldest key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}
