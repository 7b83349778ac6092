//! Subcommand implementations

pub mod config;
pub mod rank;
pub mod tags;

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;
use verse_rank_adapters::feed::{FsFeedSource, InMemoryFeedSource, parse_snapshot};
use verse_rank_domain::FeedSource;

use crate::config::AppConfig;

/// Open the feed snapshot named on the command line, or the configured one
///
/// `-` reads the snapshot from stdin.
pub(crate) fn open_feed_source(
    input: Option<&Path>,
    config: &AppConfig,
) -> Result<Box<dyn FeedSource>> {
    let path = input.unwrap_or(&config.general.feed_path);

    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read feed from stdin")?;
        let items = parse_snapshot(&buffer, "stdin").context("Failed to parse feed from stdin")?;
        return Ok(Box::new(InMemoryFeedSource::new("stdin", items)));
    }

    let source = FsFeedSource::new(path)
        .with_context(|| format!("Failed to open feed snapshot: {}", path.display()))?;
    Ok(Box::new(source))
}
