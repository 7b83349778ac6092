//! Rank command - order a feed snapshot for display

use anyhow::{Context, Result};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use verse_rank_domain::usecases::{FeedQuery, FeedUseCase, RankedItem};
use verse_rank_domain::{FixedClock, Ranker, SortStrategy};

use crate::args::RankArgs;
use crate::commands::open_feed_source;
use crate::config::AppConfig;

pub async fn execute(args: RankArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let strategy_tag = args
        .strategy
        .as_deref()
        .unwrap_or(&config.general.default_strategy);
    if SortStrategy::parse(strategy_tag).is_none() {
        tracing::warn!(strategy = %strategy_tag, "Unknown strategy, ranking as hot");
    }

    let query = FeedQuery {
        strategy: SortStrategy::from_tag(strategy_tag),
        tag: args.tag.clone(),
        limit: args.limit.or(config.general.default_limit),
    };

    let source = open_feed_source(args.input.as_deref(), &config)?;

    let ranked = match args.now.as_deref() {
        Some(now) => {
            let now = OffsetDateTime::parse(now, &Rfc3339)
                .with_context(|| format!("Invalid --now timestamp: {}", now))?;
            let ranker = Ranker::with_clock(FixedClock(now)).with_weights(config.ranking);
            FeedUseCase::new(&*source, ranker).ranked(&query).await
        }
        None => {
            let ranker = Ranker::new().with_weights(config.ranking);
            FeedUseCase::new(&*source, ranker).ranked(&query).await
        }
    }
    .context("Failed to rank feed")?;

    if args.json {
        print_json(&query, &ranked, args.explain)
    } else {
        print_text(&query, &ranked, args.explain);
        Ok(())
    }
}

fn print_json(query: &FeedQuery, ranked: &[RankedItem], explain: bool) -> Result<()> {
    let items = if explain {
        serde_json::to_value(ranked)?
    } else {
        serde_json::to_value(ranked.iter().map(|r| &r.item).collect::<Vec<_>>())?
    };

    let output = serde_json::json!({
        "strategy": query.strategy,
        "tag": query.tag,
        "count": ranked.len(),
        "items": items,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(query: &FeedQuery, ranked: &[RankedItem], explain: bool) {
    let heading = match &query.tag {
        Some(tag) => format!("Feed: {} #{} ({} items)", query.strategy, tag, ranked.len()),
        None => format!("Feed: {} ({} items)", query.strategy, ranked.len()),
    };
    println!("{}", heading);
    println!("{}", "=".repeat(heading.chars().count()));
    println!();

    if ranked.is_empty() {
        println!("No items to show.");
        return;
    }

    for entry in ranked {
        let item = &entry.item;
        let title = item.title.as_deref().unwrap_or(&item.id);
        match &item.author {
            Some(author) => println!("{:>3}. {} by {}", entry.rank, title, author),
            None => println!("{:>3}. {}", entry.rank, title),
        }
        println!(
            "     upvotes: {}  comments: {}  saves: {}  created: {}",
            item.upvotes,
            item.comments,
            item.saves,
            item.created_at.format(&Rfc3339).unwrap_or_default()
        );
        if !item.tags.is_empty() {
            println!("     tags: {}", item.tags.join(", "));
        }
        if explain {
            let b = &entry.breakdown;
            let velocity = b
                .velocity
                .map(|v| format!("{:.2}/h", v))
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "     hot: {:.2}  top: {:.1}  velocity: {}  age: {:.1}h  boost: x{:.2}",
                b.hot_score, b.top_score, velocity, b.age_hours, b.boost
            );
        }
    }
}
