//! Failure taxonomy for a fetch cycle.
//!
//! Every failure that can stop a whole batch maps to one [`FeedError`]
//! variant. Per-item problems inside an otherwise well-formed response are
//! not errors; they are recorded as [`crate::models::SkippedItem`] values.

use thiserror::Error;

/// Result of one step of the pipeline.
pub type FetchOutcome<T> = Result<T, FeedError>;

/// Batch-level failures of the fetch-parse pipeline.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request URL could not be parsed or is not http(s). No request was sent.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connect, DNS, timeout or read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with anything other than 200.
    #[error("unexpected http status {0}")]
    HttpStatus(u16),

    /// The body is not JSON, or lacks the `response.results` array.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The config file could not be read or decoded.
    #[error("config error: {0}")]
    Config(String),
}

impl FeedError {
    /// Short, stable name of the variant, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::InvalidUrl { .. } => "invalid_url",
            FeedError::Network(_) => "network_error",
            FeedError::HttpStatus(_) => "http_status",
            FeedError::MalformedResponse(_) => "malformed_response",
            FeedError::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::MalformedResponse(e.to_string())
    }
}
