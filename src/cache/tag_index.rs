//! Tag Index Module
//!
//! Reverse mapping from tag to the keys carrying it.

use std::collections::{HashMap, HashSet};

/// `tag -> keys` lookup kept in step with the entry map.
#[derive(Debug, Default)]
pub struct TagIndex {
    keys_by_tag: HashMap<String, HashSet<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` under each of `tags`.
    pub fn add<'a>(&mut self, key: &str, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            self.keys_by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    /// Unregisters `key` from each of `tags`, dropping tags left empty.
    pub fn remove<'a>(&mut self, key: &str, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            if let Some(keys) = self.keys_by_tag.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.keys_by_tag.remove(tag);
                }
            }
        }
    }

    /// Keys currently tagged with `tag`.
    pub fn keys_for(&self, tag: &str) -> Vec<String> {
        self.keys_by_tag
            .get(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn tag_count(&self) -> usize {
        self.keys_by_tag.len()
    }

    pub fn clear(&mut self) {
        self.keys_by_tag.clear();
    }
}
