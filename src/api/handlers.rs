//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{duration_ms, Clock, Subscription, SystemClock, TaggedCache, TtlPolicy};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HealthResponse, InvalidateResponse,
    PruneResponse, SetRequest, SetResponse, StatsResponse,
};

/// Cache type served over HTTP: arbitrary JSON documents.
pub type JsonCache<C = SystemClock> = TaggedCache<Value, C>;

/// Application state shared across all handlers.
///
/// The cache does no locking of its own, so it is wrapped in
/// `Arc<RwLock<>>` here.
pub struct AppState<C: Clock = SystemClock> {
    /// Shared cache instance
    pub cache: Arc<RwLock<JsonCache<C>>>,
    /// Default TTLs by category
    pub policy: Arc<TtlPolicy>,
}

// Manual impl: the clock itself need not be Clone
impl<C: Clock> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl AppState<SystemClock> {
    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TaggedCache::new(config.max_entries), config.ttl_policy())
    }
}

impl<C: Clock> AppState<C> {
    /// Creates a new AppState with the given cache and TTL policy.
    pub fn new(cache: JsonCache<C>, policy: TtlPolicy) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            policy: Arc::new(policy),
        }
    }

    /// Logs every invalidation of each tag in `tags`.
    ///
    /// Registrations are dropped by `POST /clear`, like any subscriber.
    pub async fn watch_tags(&self, tags: &[String]) -> Vec<Subscription> {
        let cache = self.cache.read().await;
        tags.iter()
            .map(|tag| {
                let name = tag.clone();
                cache.subscribe(tag, move || {
                    info!(tag = %name, "cached data invalidated");
                })
            })
            .collect()
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value with TTL and tags. A category, if given, is also
/// stored as a tag so `POST /invalidate/<category>` drops the whole group.
pub async fn set_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.effective_ttl(&state.policy);
    let tags = req.effective_tags();

    let mut cache = state.cache.write().await;
    cache.set_tagged(req.key.clone(), req.value, ttl, tags);

    Ok(Json(SetResponse::new(req.key, duration_ms(ttl))))
}

/// Handler for GET /get/:key
pub async fn get_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: reads update counters and may drop an expired entry
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    cache
        .delete(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /invalidate/:tag
pub async fn invalidate_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(tag): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.write().await.invalidate_by_tag(&tag);
    Json(InvalidateResponse { tag, removed })
}

/// Handler for POST /prune
pub async fn prune_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<PruneResponse> {
    let mut cache = state.cache.write().await;
    let pruned = cache.prune_expired();

    Json(PruneResponse {
        pruned,
        remaining: cache.len(),
    })
}

/// Handler for POST /clear
pub async fn clear_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let cleared = cache.len();
    cache.clear();

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
pub async fn stats_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;
    Json(StatsResponse::new(cache.stats(), &state.policy))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
