//! Domain models and value objects

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::tags::tags_match;

/// Author badge from the platform's fixed vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Author recently joined ("new voice")
    New,
    /// Author whose work is gaining traction
    Rising,
    Featured,
    Verified,
    /// Any label the ranking layer does not know about
    #[serde(other)]
    Other,
}

impl BadgeKind {
    /// Every badge kind, in declaration order
    pub const ALL: [BadgeKind; 5] = [
        BadgeKind::New,
        BadgeKind::Rising,
        BadgeKind::Featured,
        BadgeKind::Verified,
        BadgeKind::Other,
    ];
}

/// What kind of record a feed entry was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    #[default]
    Poem,
    Journal,
    Event,
    Trail,
    Chapbook,
}

/// A content record as fetched from the content store, ready for ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Opaque identifier, unique within a feed
    pub id: String,
    /// When the record was created
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub saves: u64,
    /// Badges held by the author
    #[serde(default)]
    pub author_badges: Vec<BadgeKind>,
    #[serde(default)]
    pub kind: ContentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Tags as stored on the record (not necessarily canonical)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentItem {
    /// Create an item with zero engagement and no badges or tags
    pub fn new(id: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            created_at,
            upvotes: 0,
            comments: 0,
            saves: 0,
            author_badges: Vec::new(),
            kind: ContentKind::default(),
            title: None,
            author: None,
            tags: Vec::new(),
        }
    }

    pub fn with_engagement(mut self, upvotes: u64, comments: u64, saves: u64) -> Self {
        self.upvotes = upvotes;
        self.comments = comments;
        self.saves = saves;
        self
    }

    pub fn with_badges(mut self, badges: impl IntoIterator<Item = BadgeKind>) -> Self {
        self.author_badges = badges.into_iter().collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the author holds the given badge
    pub fn has_badge(&self, badge: BadgeKind) -> bool {
        self.author_badges.contains(&badge)
    }

    /// Whether any of the item's tags canonically matches `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| tags_match(t, tag))
    }

    /// Time elapsed since creation (negative for items dated in the future)
    pub fn age(&self, now: OffsetDateTime) -> Duration {
        now - self.created_at
    }

    /// Age in fractional hours, without any floor applied
    pub fn age_hours(&self, now: OffsetDateTime) -> f64 {
        self.age(now).as_seconds_f64() / 3600.0
    }
}
