//! Cache-Aside Helpers
//!
//! Caller-side "check, fetch on miss, store" built only from `get` and
//! `set_tagged`. The cache itself never fetches.

use std::time::Duration;

use tracing::trace;

use crate::cache::{Clock, TaggedCache};

/// Returns the cached value for `key`, or runs `fetch`, stores its result
/// and returns it.
pub fn get_or_fetch<V, C, I, T, F>(
    cache: &mut TaggedCache<V, C>,
    key: &str,
    ttl: Duration,
    tags: I,
    fetch: F,
) -> V
where
    V: Clone,
    C: Clock,
    I: IntoIterator<Item = T>,
    T: Into<String>,
    F: FnOnce() -> V,
{
    if let Some(value) = cache.get(key) {
        return value.clone();
    }

    trace!(key, "cache miss, fetching");
    let value = fetch();
    cache.set_tagged(key, value.clone(), ttl, tags);
    value
}

/// Like [`get_or_fetch`] for fallible fetchers. A failed fetch leaves the
/// cache untouched and returns the error.
pub fn try_get_or_fetch<V, C, I, T, E, F>(
    cache: &mut TaggedCache<V, C>,
    key: &str,
    ttl: Duration,
    tags: I,
    fetch: F,
) -> Result<V, E>
where
    V: Clone,
    C: Clock,
    I: IntoIterator<Item = T>,
    T: Into<String>,
    F: FnOnce() -> Result<V, E>,
{
    if let Some(value) = cache.get(key) {
        return Ok(value.clone());
    }

    trace!(key, "cache miss, fetching");
    let value = fetch()?;
    cache.set_tagged(key, value.clone(), ttl, tags);
    Ok(value)
}
