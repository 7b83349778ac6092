//! Feed use case - load content, narrow it by tag, and rank it for display

use serde::Serialize;

use crate::{
    model::ContentItem,
    ports::{Clock, FeedError, FeedSource, SystemClock},
    ranking::{Ranker, ScoreBreakdown, SortStrategy},
    tags::normalize_tag,
};

/// What slice of the feed to show and in which order
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Ordering strategy
    pub strategy: SortStrategy,
    /// Only include items carrying this tag (matched canonically)
    pub tag: Option<String>,
    /// Maximum number of items to return (None = all)
    pub limit: Option<usize>,
}

/// A ranked feed entry
#[derive(Debug, Clone, Serialize)]
pub struct RankedItem {
    /// 1-based position in the feed
    pub rank: usize,
    pub item: ContentItem,
    pub breakdown: ScoreBreakdown,
}

/// Use case for building a ranked feed
pub struct FeedUseCase<S, C = SystemClock> {
    source: S,
    ranker: Ranker<C>,
}

impl<S: FeedSource, C: Clock> FeedUseCase<S, C> {
    pub fn new(source: S, ranker: Ranker<C>) -> Self {
        Self { source, ranker }
    }

    /// Load the feed and rank it according to the query
    pub async fn ranked(&self, query: &FeedQuery) -> Result<Vec<RankedItem>, FeedError> {
        let items = self.source.load().await?;
        let loaded = items.len();

        let items = match canonical_filter(query) {
            Some(tag) => items.into_iter().filter(|i| i.has_tag(&tag)).collect(),
            None => items,
        };

        let now = self.ranker.now();
        let ranked: Vec<RankedItem> = self
            .ranker
            .sort_at(&items, query.strategy, now)
            .into_iter()
            .take(query.limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(index, item)| RankedItem {
                rank: index + 1,
                breakdown: self.ranker.breakdown_at(item, now),
                item: item.clone(),
            })
            .collect();

        tracing::info!(
            source = %self.source.name(),
            strategy = %query.strategy,
            loaded,
            matched = items.len(),
            returned = ranked.len(),
            "Ranked feed"
        );

        Ok(ranked)
    }
}

fn canonical_filter(query: &FeedQuery) -> Option<String> {
    let raw = query.tag.as_deref()?;
    let tag = normalize_tag(raw);
    if tag.is_empty() {
        tracing::debug!(tag = %raw, "Tag filter has no canonical form, ignoring");
        return None;
    }
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BadgeKind;
    use crate::ports::FixedClock;
    use async_trait::async_trait;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    const NOW: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

    struct FakeFeedSource {
        items: Vec<ContentItem>,
    }

    #[async_trait]
    impl FeedSource for FakeFeedSource {
        async fn load(&self) -> Result<Vec<ContentItem>, FeedError> {
            Ok(self.items.clone())
        }

        fn name(&self) -> String {
            "fake".to_string()
        }
    }

    struct FailingFeedSource;

    #[async_trait]
    impl FeedSource for FailingFeedSource {
        async fn load(&self) -> Result<Vec<ContentItem>, FeedError> {
            Err(FeedError::NotFound("nowhere".to_string()))
        }

        fn name(&self) -> String {
            "failing".to_string()
        }
    }

    fn sample_items() -> Vec<ContentItem> {
        vec![
            ContentItem::new("sonnet", NOW - Duration::hours(30))
                .with_engagement(40, 5, 2)
                .with_tags(["Love & Loss", "sonnet"]),
            ContentItem::new("haiku", NOW - Duration::hours(2))
                .with_engagement(6, 1, 0)
                .with_badges([BadgeKind::New])
                .with_tags(["nature", "haiku"]),
            ContentItem::new("elegy", NOW - Duration::days(10))
                .with_engagement(90, 20, 10)
                .with_tags(["love-loss"]),
        ]
    }

    fn usecase(items: Vec<ContentItem>) -> FeedUseCase<FakeFeedSource, FixedClock> {
        FeedUseCase::new(FakeFeedSource { items }, Ranker::with_clock(FixedClock(NOW)))
    }

    fn ids(ranked: &[RankedItem]) -> Vec<&str> {
        ranked.iter().map(|r| r.item.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_ranks_by_strategy() {
        let usecase = usecase(sample_items());

        let top = usecase
            .ranked(&FeedQuery {
                strategy: SortStrategy::Top,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&top), vec!["elegy", "sonnet", "haiku"]);
        assert_eq!(top.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

        let new = usecase
            .ranked(&FeedQuery {
                strategy: SortStrategy::New,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&new), vec!["haiku", "sonnet", "elegy"]);
    }

    #[tokio::test]
    async fn test_rising_drops_old_items() {
        let ranked = usecase(sample_items())
            .ranked(&FeedQuery {
                strategy: SortStrategy::Rising,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!ids(&ranked).contains(&"elegy"));
        assert_eq!(ranked.len(), 2);
    }

    #[tokio::test]
    async fn test_filters_by_canonical_tag() {
        let ranked = usecase(sample_items())
            .ranked(&FeedQuery {
                strategy: SortStrategy::Top,
                tag: Some("LOVE & loss".to_string()),
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(ids(&ranked), vec!["elegy", "sonnet"]);
    }

    #[tokio::test]
    async fn test_empty_tag_filter_is_ignored() {
        let ranked = usecase(sample_items())
            .ranked(&FeedQuery {
                tag: Some("!!".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(ranked.len(), 3);
    }

    #[tokio::test]
    async fn test_limit_truncates_after_ranking() {
        let ranked = usecase(sample_items())
            .ranked(&FeedQuery {
                strategy: SortStrategy::New,
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(ids(&ranked), vec!["haiku"]);
        assert_eq!(ranked[0].breakdown.id, "haiku");
        assert!((ranked[0].breakdown.age_hours - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let usecase = FeedUseCase::new(FailingFeedSource, Ranker::with_clock(FixedClock(NOW)));
        let result = usecase.ranked(&FeedQuery::default()).await;

        assert!(matches!(result, Err(FeedError::NotFound(_))));
    }
}
