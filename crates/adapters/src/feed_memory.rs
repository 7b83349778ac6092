//! In-memory feed source for piped input and testing

use async_trait::async_trait;
use verse_rank_domain::{ContentItem, FeedError, FeedSource};

/// In-memory feed source implementation
pub struct InMemoryFeedSource {
    name: String,
    items: Vec<ContentItem>,
}

impl InMemoryFeedSource {
    pub fn new(name: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

impl Default for InMemoryFeedSource {
    fn default() -> Self {
        Self::new("memory", Vec::new())
    }
}

#[async_trait]
impl FeedSource for InMemoryFeedSource {
    async fn load(&self) -> Result<Vec<ContentItem>, FeedError> {
        Ok(self.items.clone())
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[tokio::test]
    async fn test_load_returns_items_in_order() {
        let now = OffsetDateTime::now_utc();
        let source = InMemoryFeedSource::new(
            "test",
            vec![ContentItem::new("a", now), ContentItem::new("b", now)],
        );

        let ids: Vec<String> = source.load().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(source.name(), "test");
    }

    #[tokio::test]
    async fn test_default_is_empty() {
        let source = InMemoryFeedSource::default();

        assert!(source.load().await.unwrap().is_empty());
        assert_eq!(source.name(), "memory");
    }
}
