//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and the content store.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::ContentItem;

/// Error type for feed source operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Feed not found: {0}")]
    NotFound(String),
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    #[error("Duplicate item ID '{id}' in {source_name}")]
    DuplicateId { id: String, source_name: String },
}

/// Port for loading already-fetched content records
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Load every item currently in the feed
    async fn load(&self) -> Result<Vec<ContentItem>, FeedError>;

    /// Human-readable name of the source, for logs
    fn name(&self) -> String;
}

#[async_trait]
impl<S: FeedSource + ?Sized> FeedSource for &S {
    async fn load(&self) -> Result<Vec<ContentItem>, FeedError> {
        (*self).load().await
    }

    fn name(&self) -> String {
        (*self).name()
    }
}

/// Port for time/clock operations (enables deterministic ranking)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
