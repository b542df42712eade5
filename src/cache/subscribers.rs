//! Tag Subscriptions
//!
//! Callbacks fired when a tag invalidation removes entries.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::trace;

/// Invalidation callback. Takes no arguments: subscribers refetch by tag.
pub type TagCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    by_tag: HashMap<String, Vec<(u64, TagCallback)>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // A panicking callback runs outside the lock, so poisoning can only come
    // from a panic inside our own bookkeeping; the map is still usable.
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// == Subscriber Registry ==
/// Per-tag callback lists, shared with the `Subscription` handles.
#[derive(Default)]
pub struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("registrations", &self.len())
            .finish()
    }
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    // == Subscribe ==
    /// Registers `callback` for `tag`. The same callback may be registered
    /// more than once; each registration is independent.
    pub fn subscribe<F>(&self, tag: &str, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .by_tag
            .entry(tag.to_string())
            .or_default()
            .push((id, Arc::new(callback)));

        trace!(tag, id, "subscriber registered");

        Subscription {
            registry: Arc::downgrade(&self.registry),
            tag: tag.to_string(),
            id,
        }
    }

    // == Notify ==
    /// Invokes each callback registered for `tag` once.
    ///
    /// The lock is released before callbacks run, so a callback may itself
    /// subscribe or unsubscribe. Returns the number of callbacks invoked.
    pub fn notify(&self, tag: &str) -> usize {
        let callbacks: Vec<TagCallback> = {
            let registry = lock(&self.registry);
            registry
                .by_tag
                .get(tag)
                .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default()
        };

        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Number of live registrations across all tags.
    pub fn len(&self) -> usize {
        lock(&self.registry).by_tag.values().map(Vec::len).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every registration. Outstanding handles become no-ops.
    pub fn clear(&self) {
        lock(&self.registry).by_tag.clear();
    }
}

// == Subscription Handle ==
/// Handle returned by `subscribe`.
///
/// Calling `unsubscribe` deregisters the callback. Dropping the handle
/// without calling it keeps the callback registered.
#[derive(Debug)]
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    tag: String,
    id: u64,
}

impl Subscription {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Deregisters the callback. No-op if the cache was cleared or dropped.
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = lock(&registry);
        let now_empty = match registry.by_tag.get_mut(&self.tag) {
            Some(subs) => {
                subs.retain(|(id, _)| *id != self.id);
                subs.is_empty()
            }
            None => false,
        };
        if now_empty {
            registry.by_tag.remove(&self.tag);
        }
        trace!(tag = %self.tag, id = self.id, "subscriber removed");
    }
}
