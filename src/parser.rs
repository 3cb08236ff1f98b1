//! Decoding of the content API's JSON payload into [`ArticleRecord`]s.
//!
//! The payload must be an object holding a `response` object, which in
//! turn holds a `results` array. Anything else is a structural failure and
//! the whole page is discarded. Inside `results`, each element is decoded on
//! its own: an element with a missing or mistyped required field is skipped
//! and recorded, and its siblings are still returned.

use crate::error::{FeedError, FetchOutcome};
use crate::models::{ApiResult, ArticleRecord, FeedPage, SkippedItem};
use crate::utils::{looks_truncated, truncate_for_log};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};

/// Parse a response body into a [`FeedPage`].
///
/// An empty or whitespace-only body yields an empty page without attempting
/// to decode anything.
///
/// # Errors
///
/// [`FeedError::MalformedResponse`] when the body is not JSON, when
/// `response` or `response.results` is missing or of the wrong type, or when
/// the API reports `"status": "error"`.
#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn parse_response(body: &str) -> FetchOutcome<FeedPage> {
    if body.trim().is_empty() {
        debug!("Empty response body; nothing to parse");
        return Ok(FeedPage::default());
    }

    let mut root: Value = serde_json::from_str(body).map_err(|e| {
        if looks_truncated(&e) {
            FeedError::MalformedResponse(format!("truncated json: {e}"))
        } else {
            FeedError::from(e)
        }
    })?;

    let response = root
        .get_mut("response")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| FeedError::MalformedResponse("missing `response` object".to_string()))?;

    if response.get("status").and_then(Value::as_str) == Some("error") {
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown api error");
        return Err(FeedError::MalformedResponse(format!(
            "api reported error: {message}"
        )));
    }

    let mut page = FeedPage {
        total: read_u64(response, "total"),
        current_page: read_u64(response, "currentPage"),
        pages: read_u64(response, "pages"),
        page_size: read_u64(response, "pageSize"),
        ..FeedPage::default()
    };

    let results = match response.remove("results") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(FeedError::MalformedResponse(
                "`response.results` is not an array".to_string(),
            ));
        }
        None => {
            return Err(FeedError::MalformedResponse(
                "missing `response.results` array".to_string(),
            ));
        }
    };

    page.articles.reserve(results.len());
    for (index, item) in results.into_iter().enumerate() {
        match parse_item(item) {
            Ok(record) => page.articles.push(record),
            Err(reason) => {
                warn!(index, %reason, "Skipping malformed result item");
                page.skipped.push(SkippedItem { index, reason });
            }
        }
    }

    debug!(
        parsed = page.articles.len(),
        skipped = page.skipped.len(),
        "Parsed response body"
    );
    Ok(page)
}

/// Parse a response body, returning only the records.
///
/// A missing or empty body gives an empty list. A structural failure is
/// logged and also gives an empty list; this function never fails.
pub fn parse(body: Option<&str>) -> Vec<ArticleRecord> {
    let Some(body) = body else {
        return Vec::new();
    };

    match parse_response(body) {
        Ok(page) => page.articles,
        Err(e) => {
            error!(
                kind = e.kind(),
                error = %e,
                body_preview = %truncate_for_log(body, 200),
                "Could not parse feed response"
            );
            Vec::new()
        }
    }
}

fn parse_item(item: Value) -> Result<ArticleRecord, String> {
    let raw: ApiResult = serde_json::from_value(item).map_err(|e| e.to_string())?;
    ArticleRecord::try_from(raw)
}

fn read_u64(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    obj.get(key).and_then(Value::as_u64)
}
