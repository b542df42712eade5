//! TTL Policy
//!
//! Default lifetimes per data category, so callers can say "this is a
//! quote" instead of picking a TTL at every call site.

use std::collections::HashMap;
use std::time::Duration;

/// Category used when none is given or the category is unknown.
pub const DEFAULT_CATEGORY: &str = "default";

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;

/// Maps data categories to default TTLs.
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    by_category: HashMap<String, Duration>,
    fallback: Duration,
}

impl TtlPolicy {
    /// A policy with no categories: everything gets `fallback`.
    pub fn new(fallback: Duration) -> Self {
        Self {
            by_category: HashMap::new(),
            fallback,
        }
    }

    /// Adds or replaces a category.
    pub fn with_category(mut self, category: impl Into<String>, ttl: Duration) -> Self {
        self.by_category.insert(category.into(), ttl);
        self
    }

    /// Replaces the fallback TTL, keeping the categories.
    pub fn with_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }

    /// TTL for `category`, or the fallback if it is not configured.
    pub fn ttl_for(&self, category: &str) -> Duration {
        self.by_category
            .get(category)
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Duration {
        self.fallback
    }

    /// Configured categories, sorted by name.
    pub fn categories(&self) -> Vec<(&str, Duration)> {
        let mut list: Vec<(&str, Duration)> = self
            .by_category
            .iter()
            .map(|(name, ttl)| (name.as_str(), *ttl))
            .collect();
        list.sort_by(|a, b| a.0.cmp(b.0));
        list
    }
}

impl Default for TtlPolicy {
    /// Lifetimes used by the dashboard's data fetchers.
    fn default() -> Self {
        Self::new(Duration::from_secs(5 * MINUTE))
            .with_category("quote", Duration::from_secs(MINUTE))
            .with_category("profile", Duration::from_secs(24 * HOUR))
            .with_category("ratios", Duration::from_secs(HOUR))
            .with_category("news", Duration::from_secs(15 * MINUTE))
            .with_category("llm", Duration::from_secs(HOUR))
            .with_category("research", Duration::from_secs(30 * MINUTE))
            .with_category("yield-curve", Duration::from_secs(HOUR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let policy = TtlPolicy::default();

        assert_eq!(policy.ttl_for("quote"), Duration::from_secs(60));
        assert_eq!(policy.ttl_for("profile"), Duration::from_secs(86_400));
        assert_eq!(policy.ttl_for("news"), Duration::from_secs(900));
        assert_eq!(policy.ttl_for("yield-curve"), Duration::from_secs(3600));
    }

    #[test]
    fn test_unknown_category_uses_fallback() {
        let policy = TtlPolicy::default();

        assert_eq!(policy.ttl_for("crypto"), Duration::from_secs(300));
        assert_eq!(policy.ttl_for(DEFAULT_CATEGORY), policy.fallback());
    }

    #[test]
    fn test_overrides() {
        let policy = TtlPolicy::default()
            .with_category("quote", Duration::from_secs(5))
            .with_fallback(Duration::from_secs(10));

        assert_eq!(policy.ttl_for("quote"), Duration::from_secs(5));
        assert_eq!(policy.ttl_for("other"), Duration::from_secs(10));
        // Categories survive a fallback change
        assert_eq!(policy.ttl_for("llm"), Duration::from_secs(3600));
    }

    #[test]
    fn test_categories_sorted() {
        let policy = TtlPolicy::new(Duration::from_secs(1))
            .with_category("b", Duration::from_secs(2))
            .with_category("a", Duration::from_secs(3));

        let names: Vec<&str> = policy.categories().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
