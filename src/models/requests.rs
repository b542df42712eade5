//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{TtlPolicy, MAX_KEY_LENGTH};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON document
/// - `ttl_ms`: Optional TTL in milliseconds
/// - `category`: Optional data category; picks the TTL when `ttl_ms` is
///   absent and is stored as an extra tag
/// - `tags`: Labels for group invalidation
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl_ms == Some(0) {
            return Some("TTL must be greater than zero".to_string());
        }
        if self.tags.iter().any(|t| t.is_empty()) {
            return Some("Tags cannot be empty".to_string());
        }
        if self.category.as_deref() == Some("") {
            return Some("Category cannot be empty".to_string());
        }
        None
    }

    /// Explicit TTL, else the category's TTL, else the policy fallback.
    pub fn effective_ttl(&self, policy: &TtlPolicy) -> Duration {
        match (self.ttl_ms, self.category.as_deref()) {
            (Some(ms), _) => Duration::from_millis(ms),
            (None, Some(category)) => policy.ttl_for(category),
            (None, None) => policy.fallback(),
        }
    }

    /// Request tags plus the category, if any.
    pub fn effective_tags(&self) -> Vec<String> {
        let mut tags = self.tags.clone();
        if let Some(category) = &self.category {
            if !tags.contains(category) {
                tags.push(category.clone());
            }
        }
        tags
    }
}
