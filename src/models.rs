//! Data models for the article feed.
//!
//! - [`ArticleRecord`]: one normalized article, ready for display
//! - [`ApiResult`]: one raw element of the API's `results` array
//! - [`FeedPage`]: the parsed page, its pagination metadata and skip events
//! - [`FeedSnapshot`]: what the binary writes out in JSON mode
//!
//! The wire types keep the API's camelCase field names, hence the
//! `#[allow(non_snake_case)]` attributes.

use crate::date;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Author shown when the API lists no contributor for an article.
pub const NO_AUTHOR: &str = "No Author Listed";

/// A single normalized article.
///
/// Records are only built from an item whose required fields all parsed, so
/// every field is always populated. Fields are private; a record never
/// changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    section_name: String,
    title: String,
    author: String,
    publication_date: String,
    url: String,
}

impl ArticleRecord {
    pub fn new(
        section_name: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_date: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            section_name: section_name.into(),
            title: title.into(),
            author: author.into(),
            publication_date: publication_date.into(),
            url: url.into(),
        }
    }

    /// The Guardian section the article appears in.
    pub fn section_name(&self) -> &str {
        &self.section_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// First contributor, or [`NO_AUTHOR`].
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Publication date as `YYYY-MM-DD`, without time of day or zone.
    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// One element of `response.results` as sent by the content API.
///
/// Unknown fields are ignored. `tags` is kept loosely typed because only the
/// first tag's `webTitle` is ever read.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct ApiResult {
    pub sectionName: String,
    pub webTitle: String,
    pub webPublicationDate: String,
    pub webUrl: String,
    #[serde(default)]
    pub tags: Option<Vec<Value>>,
}

impl ApiResult {
    /// `webTitle` of the first tag, when there is one and it is a string.
    pub fn first_contributor(&self) -> Option<&str> {
        self.tags
            .as_ref()?
            .first()?
            .get("webTitle")?
            .as_str()
    }
}

impl TryFrom<ApiResult> for ArticleRecord {
    type Error = String;

    fn try_from(item: ApiResult) -> Result<Self, Self::Error> {
        if item.sectionName.trim().is_empty() {
            return Err("empty sectionName".to_string());
        }
        Url::parse(&item.webUrl)
            .map_err(|e| format!("webUrl `{}` is not an absolute url: {}", item.webUrl, e))?;

        let author = item.first_contributor().unwrap_or(NO_AUTHOR).to_string();
        let publication_date = date::normalize(&item.webPublicationDate);

        Ok(ArticleRecord {
            section_name: item.sectionName,
            title: item.webTitle,
            author,
            publication_date,
            url: item.webUrl,
        })
    }
}

/// An element of `results` that was dropped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    /// Position of the element in the `results` array.
    pub index: usize,
    pub reason: String,
}

/// A parsed page of the feed.
///
/// Pagination fields mirror the API's `total`, `currentPage`, `pages` and
/// `pageSize` when they are present and numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedPage {
    pub articles: Vec<ArticleRecord>,
    pub skipped: Vec<SkippedItem>,
    pub total: Option<u64>,
    pub current_page: Option<u64>,
    pub pages: Option<u64>,
    pub page_size: Option<u64>,
}

/// A fetched page stamped with the local time it was retrieved.
#[derive(Debug, Serialize)]
pub struct FeedSnapshot {
    /// The date of retrieval in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The time of retrieval in `HH:MM:SS` format.
    pub local_time: String,
    pub section: Option<String>,
    pub articles: Vec<ArticleRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_result(tags: Option<Vec<Value>>) -> ApiResult {
        ApiResult {
            sectionName: "Film".to_string(),
            webTitle: "A review".to_string(),
            webPublicationDate: "2019-03-03T12:00:00Z".to_string(),
            webUrl: "https://www.theguardian.com/film/2019/mar/03/a-review".to_string(),
            tags,
        }
    }

    #[test]
    fn test_record_from_api_result() {
        let item = api_result(Some(vec![serde_json::json!({"webTitle": "Jane Doe"})]));
        let record = ArticleRecord::try_from(item).unwrap();

        assert_eq!(record.section_name(), "Film");
        assert_eq!(record.title(), "A review");
        assert_eq!(record.author(), "Jane Doe");
        assert_eq!(record.publication_date(), "2019-03-03");
        assert_eq!(
            record.url(),
            "https://www.theguardian.com/film/2019/mar/03/a-review"
        );
    }

    #[test]
    fn test_author_sentinel_when_no_tags() {
        let empty = ArticleRecord::try_from(api_result(Some(vec![]))).unwrap();
        assert_eq!(empty.author(), NO_AUTHOR);

        let missing = ArticleRecord::try_from(api_result(None)).unwrap();
        assert_eq!(missing.author(), NO_AUTHOR);
    }

    #[test]
    fn test_author_sentinel_when_first_tag_has_no_title() {
        let item = api_result(Some(vec![
            serde_json::json!({"id": "profile/someone"}),
            serde_json::json!({"webTitle": "Second Tag"}),
        ]));
        let record = ArticleRecord::try_from(item).unwrap();
        assert_eq!(record.author(), NO_AUTHOR);
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let mut item = api_result(None);
        item.webUrl = "/film/2019/mar/03/a-review".to_string();
        let err = ArticleRecord::try_from(item).unwrap_err();
        assert!(err.contains("webUrl"));
    }

    #[test]
    fn test_empty_section_is_rejected() {
        let mut item = api_result(None);
        item.sectionName = "  ".to_string();
        assert!(ArticleRecord::try_from(item).is_err());
    }

    #[test]
    fn test_api_result_ignores_extra_fields() {
        let json = r#"{
            "id": "film/2019/mar/03/a-review",
            "type": "article",
            "sectionId": "film",
            "sectionName": "Film",
            "webTitle": "A review",
            "webPublicationDate": "2019-03-03T12:00:00Z",
            "webUrl": "https://www.theguardian.com/film/2019/mar/03/a-review",
            "apiUrl": "https://content.guardianapis.com/film/2019/mar/03/a-review",
            "isHosted": false,
            "tags": [{"id": "profile/jane-doe", "webTitle": "Jane Doe"}]
        }"#;
        let item: ApiResult = serde_json::from_str(json).unwrap();
        assert_eq!(item.first_contributor(), Some("Jane Doe"));
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = FeedSnapshot {
            local_date: "2025-05-06".to_string(),
            local_time: "20:30:00".to_string(),
            section: Some("film".to_string()),
            articles: vec![ArticleRecord::new(
                "Film",
                "A review",
                NO_AUTHOR,
                "2019-03-03",
                "https://www.theguardian.com/a",
            )],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("2025-05-06"));
        assert!(json.contains("\"author\":\"No Author Listed\""));
    }
}
