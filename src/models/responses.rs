//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::cache::{duration_ms, CacheCounters, CacheSnapshot, EntrySnapshot, TtlPolicy};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// TTL applied, in milliseconds
    pub ttl_ms: u64,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, ttl_ms: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            ttl_ms,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for POST /invalidate/:tag
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub tag: String,
    /// Entries removed
    pub removed: usize,
}

/// Response body for POST /prune
#[derive(Debug, Clone, Serialize)]
pub struct PruneResponse {
    pub pruned: usize,
    pub remaining: usize,
}

/// Response body for POST /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", cleared),
            cleared,
        }
    }
}

/// Default TTL of one configured category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTtl {
    pub category: String,
    pub ttl_ms: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of entries in cache
    pub size: usize,
    pub max_entries: usize,
    pub entries: Vec<EntrySnapshot>,
    #[serde(flatten)]
    pub counters: CacheCounters,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Entries tagged with each configured category
    pub by_category: BTreeMap<String, usize>,
    pub ttl_config: Vec<CategoryTtl>,
}

impl StatsResponse {
    /// Builds the response from a snapshot, counting entries per policy
    /// category.
    pub fn new(snapshot: CacheSnapshot, policy: &TtlPolicy) -> Self {
        let categories = policy.categories();
        let by_category = categories
            .iter()
            .map(|(name, _)| {
                let count = snapshot
                    .entries
                    .iter()
                    .filter(|e| e.tags.iter().any(|t| t == name))
                    .count();
                (name.to_string(), count)
            })
            .collect();
        let ttl_config = categories
            .into_iter()
            .map(|(name, ttl)| CategoryTtl {
                category: name.to_string(),
                ttl_ms: duration_ms(ttl),
            })
            .collect();

        let hit_rate = snapshot.counters.hit_rate();
        Self {
            size: snapshot.size,
            max_entries: snapshot.max_entries,
            entries: snapshot.entries,
            counters: snapshot.counters,
            hit_rate,
            by_category,
            ttl_config,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
