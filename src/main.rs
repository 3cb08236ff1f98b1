//! Command-line reader for the Guardian article feed.
//!
//! Runs a single fetch cycle and prints one row per article, or a JSON
//! snapshot of the page.
//!
//! ```sh
//! guardian_feed --section film --format json
//! ```

use chrono::Local;
use clap::Parser;
use guardian_feed::{ArticleRecord, FeedConfig, FeedService, FeedSnapshot};
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, OutputFormat};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.config, ?args.section, ?args.format, "Parsed CLI arguments");

    let config = apply_overrides(
        match &args.config {
            Some(path) => FeedConfig::load(path).await?,
            None => FeedConfig::default(),
        },
        &args,
    );

    let mut query = config.query();
    if let Some(terms) = &args.query {
        query = query.search(terms);
    }
    let url = query.build()?;
    info!(section = ?config.section, page_size = config.page_size, "Requesting feed");

    let service = FeedService::new(config.fetcher()?);
    let articles = service.spawn_feed(url.as_str()).join().await;

    match args.format {
        OutputFormat::Text => print_rows(&articles),
        OutputFormat::Json => {
            let now = Local::now();
            let snapshot = FeedSnapshot {
                local_date: now.date_naive().to_string(),
                local_time: now.time().format("%H:%M:%S").to_string(),
                section: config.section.clone(),
                articles,
            };
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Layer command-line values over the file configuration.
fn apply_overrides(mut config: FeedConfig, args: &Cli) -> FeedConfig {
    if let Some(key) = &args.api_key {
        config.api_key = key.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(section) = &args.section {
        config.section = Some(section.clone());
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    config
}

fn print_rows(articles: &[ArticleRecord]) {
    if articles.is_empty() {
        println!("No news articles found.");
        return;
    }
    for article in articles {
        println!(
            "{}  [{}]  {}\n    by {}\n    {}",
            article.publication_date(),
            article.section_name(),
            article.title(),
            article.author(),
            article.url()
        );
    }
}
