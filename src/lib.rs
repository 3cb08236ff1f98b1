//! # Guardian Feed
//!
//! Fetches one page of articles from the Guardian content API and turns it
//! into display-ready [`ArticleRecord`]s, surviving network failures, error
//! statuses and malformed JSON without ever failing the caller.
//!
//! ## Pipeline
//!
//! 1. **Query**: [`FeedQuery`] builds the request URL (section, ordering,
//!    contributor tags, API key)
//! 2. **Fetch**: [`HttpFetcher`] performs one bounded GET and reads the body
//! 3. **Parse**: [`parser`] decodes the `response.results` array, skipping
//!    items it cannot decode
//! 4. **Normalize**: [`date::normalize`] trims timestamps to their date
//!
//! [`FeedService`] ties the steps together and is the only type a consuming
//! application needs:
//!
//! ```no_run
//! use guardian_feed::{FeedQuery, FeedService};
//!
//! # async fn run() -> Result<(), guardian_feed::FeedError> {
//! let service = FeedService::with_defaults()?;
//! let url = FeedQuery::default().section("film").build()?;
//! for article in service.fetch_feed(url.as_str()).await {
//!     println!("{} | {}", article.publication_date(), article.title());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod date;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod query;
pub mod service;
pub mod utils;

pub use config::FeedConfig;
pub use error::{FeedError, FetchOutcome};
pub use fetcher::HttpFetcher;
pub use models::{ArticleRecord, FeedPage, FeedSnapshot, NO_AUTHOR, SkippedItem};
pub use query::FeedQuery;
pub use service::{FeedHandle, FeedService};
