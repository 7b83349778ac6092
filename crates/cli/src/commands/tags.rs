//! Tags command - canonicalize, edit, slug and count tags

use anyhow::{Context, Result};
use std::path::PathBuf;
use verse_rank_domain::tags::{
    add_tag, normalize_tag, parse_tags, remove_tag, slug_to_tag, tag_to_slug,
};
use verse_rank_domain::usecases::build_tag_index;

use crate::args::{TagsArgs, TagsCommands};
use crate::commands::open_feed_source;
use crate::config::AppConfig;

pub async fn execute(args: TagsArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        TagsCommands::Normalize { tags } => {
            for raw in &tags {
                let canonical = normalize_tag(raw);
                if canonical.is_empty() {
                    tracing::warn!(tag = %raw, "Tag has no canonical form");
                }
                println!("{}", canonical);
            }
            Ok(())
        }
        TagsCommands::Parse { input, json } => {
            let tags = parse_tags(&input);
            if json {
                println!("{}", serde_json::to_string(&tags)?);
            } else {
                for tag in &tags {
                    println!("{}", tag);
                }
            }
            Ok(())
        }
        TagsCommands::Slug { tag } => {
            println!("{}", tag_to_slug(&normalize_tag(&tag)));
            Ok(())
        }
        TagsCommands::Unslug { slug } => {
            println!("{}", slug_to_tag(&slug));
            Ok(())
        }
        TagsCommands::Add { tags, tag } => {
            println!("{}", add_tag(&tags, &tag).join(","));
            Ok(())
        }
        TagsCommands::Remove { tags, tag } => {
            println!("{}", remove_tag(&tags, &tag).join(","));
            Ok(())
        }
        TagsCommands::Popular { input, limit, json } => {
            popular_tags(input, limit, json, config_path).await
        }
    }
}

async fn popular_tags(
    input: Option<PathBuf>,
    limit: Option<usize>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let source = open_feed_source(input.as_deref(), &config)?;

    let items = source.load().await.context("Failed to load feed")?;
    let mut index = build_tag_index(&items);
    if let Some(limit) = limit {
        index.truncate(limit);
    }

    tracing::info!(items = items.len(), tags = index.len(), "Built tag index");

    if json {
        let output = serde_json::json!({
            "count": index.len(),
            "tags": index,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Popular Tags ({} found)", index.len());
        println!("==================");
        println!();
        for entry in &index {
            println!("{:>5}  {}  ({})", entry.count, entry.tag, entry.path);
        }
    }

    Ok(())
}
