//! Command-line interface definitions for the feed reader.
//!
//! Every option overrides the matching value from the config file. The API
//! key can also come from the environment.

use clap::{Parser, ValueEnum};

/// How fetched records are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per article.
    Text,
    /// A JSON snapshot of the page.
    Json,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Latest film articles with the developer key
/// guardian_feed --section film
///
/// # Search with your own key and a config file
/// GUARDIAN_API_KEY=... guardian_feed -c feed.yaml -q "arizona" --format json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Guardian content API key
    #[arg(long, env = "GUARDIAN_API_KEY")]
    pub api_key: Option<String>,

    /// Search endpoint to query
    #[arg(long)]
    pub base_url: Option<String>,

    /// Section filter, e.g. `film` or `culture`
    #[arg(short, long)]
    pub section: Option<String>,

    /// Free-text search terms
    #[arg(short, long)]
    pub query: Option<String>,

    /// Number of articles to request
    #[arg(short = 'n', long)]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["guardian_feed"]);
        assert!(cli.config.is_none());
        assert!(cli.section.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "guardian_feed",
            "-c",
            "/tmp/feed.yaml",
            "-s",
            "film",
            "-q",
            "arizona",
            "-n",
            "25",
            "-f",
            "json",
        ]);

        assert_eq!(cli.config.as_deref(), Some("/tmp/feed.yaml"));
        assert_eq!(cli.section.as_deref(), Some("film"));
        assert_eq!(cli.query.as_deref(), Some("arizona"));
        assert_eq!(cli.page_size, Some(25));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
