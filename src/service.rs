//! Orchestration of a fetch cycle: URL → HTTP body → parsed records.
//!
//! [`FeedService`] is the only entry point the consuming application needs.
//! It keeps no state between calls apart from the shared HTTP connection
//! pool. Every failure is logged here and turned into an empty list, so the
//! caller only ever has to decide how to present "no articles".
//!
//! [`FeedService::spawn_feed`] runs a cycle on a Tokio worker task and
//! hands back a [`FeedHandle`]. Dropping or cancelling the handle aborts
//! the task, which drops the in-flight response and closes its connection.

use crate::error::{FeedError, FetchOutcome};
use crate::fetcher::HttpFetcher;
use crate::models::{ArticleRecord, FeedPage};
use crate::parser::parse_response;
use crate::query::FeedQuery;
use crate::utils::truncate_for_log;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Stateless front door of the pipeline.
#[derive(Debug, Clone)]
pub struct FeedService {
    fetcher: HttpFetcher,
}

impl FeedService {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }

    /// Build a service whose fetcher uses the default timeouts.
    pub fn with_defaults() -> FetchOutcome<Self> {
        Ok(Self::new(HttpFetcher::new()?))
    }

    pub fn fetcher(&self) -> &HttpFetcher {
        &self.fetcher
    }

    /// Run one fetch cycle and return the typed outcome.
    ///
    /// # Errors
    ///
    /// Any of [`FeedError::InvalidUrl`], [`FeedError::Network`],
    /// [`FeedError::HttpStatus`] or [`FeedError::MalformedResponse`].
    #[instrument(level = "info", skip_all, fields(url = %request_url))]
    pub async fn try_fetch_feed(&self, request_url: &str) -> FetchOutcome<FeedPage> {
        let t0 = Instant::now();
        let body = self.fetcher.fetch(request_url).await?;
        let page = parse_response(&body).inspect_err(|_| {
            debug!(body_preview = %truncate_for_log(&body, 300), "Unparseable body");
        })?;

        for skipped in &page.skipped {
            warn!(index = skipped.index, reason = %skipped.reason, "Result item skipped");
        }
        info!(
            count = page.articles.len(),
            skipped = page.skipped.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetch cycle complete"
        );
        Ok(page)
    }

    /// Run one fetch cycle, returning an empty list on any failure.
    ///
    /// The failure itself is reported through `tracing` with its kind as a
    /// structured field.
    pub async fn fetch_feed(&self, request_url: &str) -> Vec<ArticleRecord> {
        match self.try_fetch_feed(request_url).await {
            Ok(page) => page.articles,
            Err(e) => {
                report_failure(request_url, &e);
                Vec::new()
            }
        }
    }

    /// Build the URL for `query` and run one fetch cycle.
    pub async fn fetch_query(&self, query: &FeedQuery) -> Vec<ArticleRecord> {
        match query.build() {
            Ok(url) => self.fetch_feed(url.as_str()).await,
            Err(e) => {
                report_failure(&query.base_url, &e);
                Vec::new()
            }
        }
    }

    /// Run one fetch cycle on a worker task.
    ///
    /// The caller is not blocked; it awaits [`FeedHandle::join`] when it
    /// wants the records. Overlapping handles are independent and may
    /// complete in any order.
    pub fn spawn_feed(&self, request_url: impl Into<String>) -> FeedHandle {
        let service = self.clone();
        let request_url = request_url.into();
        let task = tokio::spawn(async move { service.fetch_feed(&request_url).await });
        FeedHandle { task: Some(task) }
    }
}

/// A fetch cycle running in the background.
///
/// Dropping the handle without joining cancels the cycle.
#[derive(Debug)]
pub struct FeedHandle {
    task: Option<JoinHandle<Vec<ArticleRecord>>>,
}

impl FeedHandle {
    /// Wait for the cycle to finish.
    ///
    /// Returns an empty list if the task panicked or was cancelled.
    pub async fn join(mut self) -> Vec<ArticleRecord> {
        let Some(task) = self.task.take() else {
            return Vec::new();
        };
        match task.await {
            Ok(records) => records,
            Err(e) if e.is_cancelled() => {
                debug!("Fetch cycle was cancelled");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "Fetch task failed");
                Vec::new()
            }
        }
    }

    /// Abandon the cycle. No result is delivered.
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Fetch cycle cancelled by caller");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn report_failure(url: &str, e: &FeedError) {
    match e {
        FeedError::HttpStatus(status) => {
            error!(%url, kind = e.kind(), status, "Feed request rejected by server");
        }
        _ => error!(%url, kind = e.kind(), error = %e, "Feed request failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_feed_invalid_url_is_empty() {
        let service = FeedService::with_defaults().unwrap();
        assert!(service.fetch_feed("not a url").await.is_empty());
    }

    #[tokio::test]
    async fn test_try_fetch_feed_invalid_url_is_typed() {
        let service = FeedService::with_defaults().unwrap();
        let err = service.try_fetch_feed("mailto:desk@example.com").await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_query_with_bad_base_is_empty() {
        let service = FeedService::with_defaults().unwrap();
        let query = FeedQuery::new("nowhere", "k");
        assert!(service.fetch_query(&query).await.is_empty());
    }

    #[tokio::test]
    async fn test_spawned_invalid_url_joins_empty() {
        let service = FeedService::with_defaults().unwrap();
        let handle = service.spawn_feed("::");
        assert!(handle.join().await.is_empty());
    }
}
