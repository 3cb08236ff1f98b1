//! Feed configuration: endpoint, credentials, query defaults and timeouts.
//!
//! Values come from an optional YAML file; fields left out of the file take
//! their defaults. Command-line flags are layered on top in `main`.
//!
//! ```yaml
//! base_url: https://content.guardianapis.com/search
//! api_key: your-key
//! section: film
//! page_size: 20
//! read_timeout_ms: 5000
//! ```

use crate::error::{FeedError, FetchOutcome};
use crate::fetcher::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, HttpFetcher};
use crate::query::{DEFAULT_BASE_URL, FeedQuery};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub api_key: String,
    pub section: Option<String>,
    pub order_by: String,
    pub show_tags: String,
    pub page_size: u32,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: "test".to_string(),
            section: None,
            order_by: "newest".to_string(),
            show_tags: "contributor".to_string(),
            page_size: 10,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
            read_timeout_ms: DEFAULT_READ_TIMEOUT.as_millis() as u64,
        }
    }
}

impl FeedConfig {
    /// Read a YAML config file.
    ///
    /// # Errors
    ///
    /// [`FeedError::Config`] if the file cannot be read or is not valid YAML
    /// for this structure.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> FetchOutcome<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FeedError::Config(format!("reading {}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> FetchOutcome<Self> {
        serde_yaml::from_str(text).map_err(|e| FeedError::Config(e.to_string()))
    }

    /// The page request described by this configuration.
    pub fn query(&self) -> FeedQuery {
        let mut query = FeedQuery::new(&self.base_url, &self.api_key)
            .order_by(&self.order_by)
            .page_size(self.page_size);
        query.show_tags = self.show_tags.clone();
        if let Some(section) = &self.section {
            query = query.section(section);
        }
        query
    }

    /// An [`HttpFetcher`] using the configured timeouts.
    pub fn fetcher(&self) -> FetchOutcome<HttpFetcher> {
        HttpFetcher::with_timeouts(
            Duration::from_millis(self.connect_timeout_ms),
            Duration::from_millis(self.read_timeout_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = FeedConfig::from_yaml("api_key: secret\nsection: film\n").unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.section.as_deref(), Some("film"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.connect_timeout_ms, 15_000);
        assert_eq!(config.read_timeout_ms, 10_000);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = FeedConfig::from_yaml("page_size: many").unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[test]
    fn test_query_from_config() {
        let config = FeedConfig {
            section: Some("music".to_string()),
            page_size: 30,
            ..FeedConfig::default()
        };
        let url = config.query().build().unwrap();
        let s = url.as_str();
        assert!(s.contains("section=music"));
        assert!(s.contains("page-size=30"));
        assert!(s.contains("show-tags=contributor"));
    }

    #[test]
    fn test_fetcher_from_config() {
        let config = FeedConfig {
            read_timeout_ms: 250,
            ..FeedConfig::default()
        };
        let fetcher = config.fetcher().unwrap();
        assert_eq!(fetcher.read_timeout(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "base_url: http://localhost:9999/search").unwrap();
        writeln!(file, "page_size: 5").unwrap();

        let config = FeedConfig::load(&path).await.unwrap();
        assert_eq!(config.base_url, "http://localhost:9999/search");
        assert_eq!(config.page_size, 5);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = FeedConfig::load("/definitely/not/here.yaml").await.unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }
}
