//! Composite cache keys, e.g. `yields:US:2025-01-01`.

/// Separator between key parts.
pub const KEY_SEPARATOR: &str = ":";

/// Builds a key from a data kind and its parameters.
#[derive(Debug, Clone)]
pub struct CacheKey {
    parts: Vec<String>,
}

impl CacheKey {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            parts: vec![kind.into()],
        }
    }

    /// Appends a parameter. Blank parameters are skipped.
    pub fn part(mut self, part: impl AsRef<str>) -> Self {
        let part = part.as_ref().trim();
        if !part.is_empty() {
            self.parts.push(part.to_string());
        }
        self
    }

    pub fn build(&self) -> String {
        self.parts.join(KEY_SEPARATOR)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.build()
    }
}

/// Key for a generated analysis response.
///
/// The ticker is upper-cased, the analysis type and channel lower-cased;
/// missing values fall back to `general` and `web`.
pub fn response_key(ticker: &str, analysis_type: Option<&str>, channel: Option<&str>) -> String {
    let ticker = ticker.trim().to_uppercase();
    let analysis_type = analysis_type
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "general".to_string());
    let channel = channel
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "web".to_string());

    format!("{ticker}{KEY_SEPARATOR}{analysis_type}{KEY_SEPARATOR}{channel}")
}
