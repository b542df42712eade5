//! Market Cache - tagged TTL cache for market reference data
//!
//! A bounded in-memory cache with per-entry TTL, oldest-first eviction and
//! tag-based invalidation, plus a small HTTP front for it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::TaggedCache;
pub use config::Config;
