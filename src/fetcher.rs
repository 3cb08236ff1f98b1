//! HTTP retrieval of the raw response body.
//!
//! One GET per call, no retries. The connect phase is bounded by
//! [`DEFAULT_CONNECT_TIMEOUT`] and every read by [`DEFAULT_READ_TIMEOUT`], so
//! a call cannot hang indefinitely. The connection is owned by the
//! [`reqwest::Response`] and released when it is dropped, on every exit path
//! including cancellation of the future.

use crate::error::{FeedError, FetchOutcome};
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Time allowed to establish the connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Time allowed for each read on an established connection.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Performs the single network request of a fetch cycle.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher with the default 15 s connect / 10 s read timeouts.
    pub fn new() -> FetchOutcome<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    /// Build a fetcher with explicit timeouts.
    ///
    /// # Errors
    ///
    /// [`FeedError::Network`] if the TLS backend cannot be initialised.
    pub fn with_timeouts(connect_timeout: Duration, read_timeout: Duration) -> FetchOutcome<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            connect_timeout,
            read_timeout,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// GET `url` and return the whole body decoded as UTF-8.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] if `url` is not an absolute http(s) URL;
    ///   no request is sent in that case
    /// - [`FeedError::HttpStatus`] for any status other than 200; the body
    ///   is not read
    /// - [`FeedError::Network`] for DNS, connect, timeout or read failures
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch(&self, url: &str) -> FetchOutcome<String> {
        let parsed = validate_url(url)?;
        let t0 = Instant::now();

        let resp = self.client.get(parsed).send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Error response code"
            );
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let mut body = Vec::new();
        let mut chunks = resp.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            debug!(chunk_bytes = chunk.len(), "Read body chunk");
            body.extend_from_slice(&chunk);
        }

        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched response body"
        );
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Parse `url` and require an http or https scheme.
pub fn validate_url(url: &str) -> FetchOutcome<Url> {
    let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FeedError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}
