//! Feed ranking: hot, new, top and rising orderings over content items
//!
//! Every ordering is a stable sort over borrowed items: the input slice is never
//! reordered or mutated, and items with equal keys keep their input order.
//! "Now" is read from the [`Clock`] exactly once per top-level call so that all
//! items in a call are aged against the same instant.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::model::{BadgeKind, ContentItem};
use crate::ports::{Clock, SystemClock};

/// Minimum age used by the hot score, in hours
pub const HOT_MIN_AGE_HOURS: f64 = 0.1;

/// Minimum age used by the rising velocity, in hours
pub const RISING_MIN_AGE_HOURS: f64 = 1.0;

/// Items at least this old never appear in the rising ordering
pub const RISING_WINDOW: Duration = Duration::days(7);

const SCORE_SCALE: f64 = 10_000.0;
const DECAY_OFFSET_HOURS: f64 = 2.0;

// Top ordering uses its own fixed weights, independent of `RankingWeights`.
const TOP_UPVOTE_WEIGHT: f64 = 1.0;
const TOP_COMMENT_WEIGHT: f64 = 2.0;
const TOP_SAVE_WEIGHT: f64 = 1.5;

/// Weights for the hot score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Points per upvote
    pub upvotes: f64,
    /// Points per comment
    pub comments: f64,
    /// Points per save
    pub saves: f64,
    /// Multiplier for authors holding the `new` badge
    pub new_voice_boost: f64,
    /// Multiplier for authors holding the `rising` badge
    pub rising_boost: f64,
    /// Exponent applied to `age_hours + 2`
    pub decay_factor: f64,
}

impl RankingWeights {
    pub const DEFAULT: RankingWeights = RankingWeights {
        upvotes: 1.0,
        comments: 2.0,
        saves: 1.5,
        new_voice_boost: 1.5,
        rising_boost: 1.3,
        decay_factor: 1.8,
    };

    /// Score multiplier for a badge, or `None` if the badge does not boost
    pub fn badge_boost(&self, badge: BadgeKind) -> Option<f64> {
        match badge {
            BadgeKind::New => Some(self.new_voice_boost),
            BadgeKind::Rising => Some(self.rising_boost),
            BadgeKind::Featured | BadgeKind::Verified | BadgeKind::Other => None,
        }
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Named ordering strategy for a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 4] = [
        SortStrategy::Hot,
        SortStrategy::New,
        SortStrategy::Top,
        SortStrategy::Rising,
    ];

    /// Parse a strategy tag, returning `None` for unrecognised tags
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "hot" => Some(Self::Hot),
            "new" => Some(Self::New),
            "top" => Some(Self::Top),
            "rising" => Some(Self::Rising),
            _ => None,
        }
    }

    /// Parse a strategy tag, falling back to `Hot` for anything unrecognised
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortStrategy {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

/// Weighted engagement before boost and decay
pub fn engagement(item: &ContentItem, weights: &RankingWeights) -> f64 {
    item.upvotes as f64 * weights.upvotes
        + item.comments as f64 * weights.comments
        + item.saves as f64 * weights.saves
}

/// Product of the boosts for every boosting badge the author holds
///
/// Each badge kind counts once, however many times it appears on the item.
pub fn badge_boost(item: &ContentItem, weights: &RankingWeights) -> f64 {
    BadgeKind::ALL
        .iter()
        .filter(|badge| item.has_badge(**badge))
        .filter_map(|badge| weights.badge_boost(*badge))
        .product()
}

/// Time-decayed, badge-boosted hot score
pub fn score(item: &ContentItem, weights: &RankingWeights, now: OffsetDateTime) -> f64 {
    let age_hours = item.age_hours(now).max(HOT_MIN_AGE_HOURS);
    let decay = (age_hours + DECAY_OFFSET_HOURS).powf(weights.decay_factor);

    (engagement(item, weights) * badge_boost(item, weights) * SCORE_SCALE) / decay
}

/// All-time score used by the top ordering
pub fn top_score(item: &ContentItem) -> f64 {
    item.upvotes as f64 * TOP_UPVOTE_WEIGHT
        + item.comments as f64 * TOP_COMMENT_WEIGHT
        + item.saves as f64 * TOP_SAVE_WEIGHT
}

/// Engagement per hour, or `None` once the item has left the rising window
pub fn velocity(item: &ContentItem, now: OffsetDateTime) -> Option<f64> {
    if item.age(now) >= RISING_WINDOW {
        return None;
    }

    let age_hours = item.age_hours(now).max(RISING_MIN_AGE_HOURS);
    let total = item.upvotes as f64 + item.comments as f64 + item.saves as f64;
    Some(total / age_hours)
}

/// Stable descending sort by a precomputed key
fn sort_descending_by<'a>(mut keyed: Vec<(f64, &'a ContentItem)>) -> Vec<&'a ContentItem> {
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Explanation of how an item scores under every strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub id: String,
    pub engagement: f64,
    pub boost: f64,
    /// Raw age in hours, before either floor is applied
    pub age_hours: f64,
    pub decay: f64,
    pub hot_score: f64,
    pub top_score: f64,
    /// `None` when the item is outside the rising window
    pub velocity: Option<f64>,
}

/// Ranks content items against a clock and a set of hot-score weights
#[derive(Debug, Clone)]
pub struct Ranker<C = SystemClock> {
    clock: C,
    weights: RankingWeights,
}

impl Ranker<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Ranker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Ranker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            weights: RankingWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Read the clock once
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Order items by the given strategy
    pub fn sort<'a>(
        &self,
        items: &'a [ContentItem],
        strategy: SortStrategy,
    ) -> Vec<&'a ContentItem> {
        self.sort_at(items, strategy, self.now())
    }

    /// Order items by a strategy tag; unrecognised tags rank as `hot`
    pub fn sort_by_tag<'a>(
        &self,
        items: &'a [ContentItem],
        strategy: &str,
    ) -> Vec<&'a ContentItem> {
        self.sort(items, SortStrategy::from_tag(strategy))
    }

    /// Order items by a strategy at an explicit instant
    pub fn sort_at<'a>(
        &self,
        items: &'a [ContentItem],
        strategy: SortStrategy,
        now: OffsetDateTime,
    ) -> Vec<&'a ContentItem> {
        match strategy {
            SortStrategy::Hot => self.hot_at(items, now),
            SortStrategy::New => self.sort_by_new(items),
            SortStrategy::Top => self.sort_by_top(items),
            SortStrategy::Rising => self.rising_at(items, now),
        }
    }

    pub fn sort_by_hot<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        self.hot_at(items, self.now())
    }

    pub fn sort_by_new<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        let mut sorted: Vec<&ContentItem> = items.iter().collect();
        sorted.sort_by(|a, b| newest_first(a, b));
        sorted
    }

    pub fn sort_by_top<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        sort_descending_by(items.iter().map(|item| (top_score(item), item)).collect())
    }

    pub fn sort_by_rising<'a>(&self, items: &'a [ContentItem]) -> Vec<&'a ContentItem> {
        self.rising_at(items, self.now())
    }

    /// Explain an item's scores at an explicit instant
    pub fn breakdown_at(&self, item: &ContentItem, now: OffsetDateTime) -> ScoreBreakdown {
        let age_hours = item.age_hours(now);
        ScoreBreakdown {
            id: item.id.clone(),
            engagement: engagement(item, &self.weights),
            boost: badge_boost(item, &self.weights),
            age_hours,
            decay: (age_hours.max(HOT_MIN_AGE_HOURS) + DECAY_OFFSET_HOURS)
                .powf(self.weights.decay_factor),
            hot_score: score(item, &self.weights, now),
            top_score: top_score(item),
            velocity: velocity(item, now),
        }
    }

    fn hot_at<'a>(&self, items: &'a [ContentItem], now: OffsetDateTime) -> Vec<&'a ContentItem> {
        sort_descending_by(
            items
                .iter()
                .map(|item| (score(item, &self.weights, now), item))
                .collect(),
        )
    }

    fn rising_at<'a>(
        &self,
        items: &'a [ContentItem],
        now: OffsetDateTime,
    ) -> Vec<&'a ContentItem> {
        sort_descending_by(
            items
                .iter()
                .filter_map(|item| velocity(item, now).map(|v| (v, item)))
                .collect(),
        )
    }
}

/// Hot ordering with default weights and the system clock
pub fn sort_by_hot(items: &[ContentItem]) -> Vec<&ContentItem> {
    Ranker::new().sort_by_hot(items)
}

/// Newest first
pub fn sort_by_new(items: &[ContentItem]) -> Vec<&ContentItem> {
    Ranker::new().sort_by_new(items)
}

/// Highest all-time engagement first
pub fn sort_by_top(items: &[ContentItem]) -> Vec<&ContentItem> {
    Ranker::new().sort_by_top(items)
}

/// Fastest-growing items from the last week first
pub fn sort_by_rising(items: &[ContentItem]) -> Vec<&ContentItem> {
    Ranker::new().sort_by_rising(items)
}

/// Dispatch on a strategy tag (`hot`, `new`, `top`, `rising`); anything else ranks as `hot`
pub fn sort_poems<'a>(items: &'a [ContentItem], strategy: &str) -> Vec<&'a ContentItem> {
    Ranker::new().sort_by_tag(items, strategy)
}

/// Compare two items by creation time, newest first
pub fn newest_first(a: &ContentItem, b: &ContentItem) -> Ordering {
    b.created_at.cmp(&a.created_at)
}
