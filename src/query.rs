//! Request URL construction for the Guardian content API search endpoint.

use crate::error::FetchOutcome;
use crate::fetcher::validate_url;
use url::Url;

/// Default search endpoint of the content API.
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com/search";

/// Parameters for a single page request.
///
/// # Examples
///
/// ```
/// use guardian_feed::query::FeedQuery;
///
/// let url = FeedQuery::new("https://content.guardianapis.com/search", "test")
///     .section("film")
///     .build()
///     .unwrap();
/// assert!(url.as_str().contains("section=film"));
/// assert!(url.as_str().contains("show-tags=contributor"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub base_url: String,
    pub api_key: String,
    pub section: Option<String>,
    pub search: Option<String>,
    pub order_by: String,
    pub show_tags: String,
    pub page: u32,
    pub page_size: u32,
}

impl FeedQuery {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            section: None,
            search: None,
            order_by: "newest".to_string(),
            show_tags: "contributor".to_string(),
            page: 1,
            page_size: 10,
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Free-text search terms (`q`).
    pub fn search(mut self, terms: impl Into<String>) -> Self {
        self.search = Some(terms.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Assemble the full request URL, query parameters percent-encoded.
    ///
    /// Parameters already present on `base_url` are kept.
    ///
    /// # Errors
    ///
    /// [`crate::FeedError::InvalidUrl`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn build(&self) -> FetchOutcome<Url> {
        let mut url = validate_url(&self.base_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(section) = self.section.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("section", section);
            }
            if let Some(q) = self.search.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("q", q);
            }
            pairs
                .append_pair("order-by", &self.order_by)
                .append_pair("show-tags", &self.show_tags)
                .append_pair("page", &self.page.to_string())
                .append_pair("page-size", &self.page_size.to_string())
                .append_pair("api-key", &self.api_key);
        }
        Ok(url)
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, "test")
    }
}
