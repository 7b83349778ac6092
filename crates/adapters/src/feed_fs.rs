//! Filesystem-based feed source reading JSON snapshots of fetched records

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use verse_rank_domain::{ContentItem, FeedError, FeedSource};

/// Snapshot wrapped in an object: `{ "items": [...] }`
#[derive(Deserialize)]
struct WrappedSnapshot {
    items: Vec<ContentItem>,
}

/// Parse snapshot JSON (a bare array of items or `{ "items": [...] }`),
/// rejecting duplicate item IDs
pub fn parse_snapshot(json: &str, source_name: &str) -> Result<Vec<ContentItem>, FeedError> {
    let parsed = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<ContentItem>>(json)
    } else {
        serde_json::from_str::<WrappedSnapshot>(json).map(|snapshot| snapshot.items)
    };
    let items = parsed.map_err(|e| FeedError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;

    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(FeedError::DuplicateId {
                id: item.id.clone(),
                source_name: source_name.to_string(),
            });
        }
    }

    Ok(items)
}

/// Feed source backed by a JSON snapshot file
pub struct FsFeedSource {
    path: PathBuf,
}

impl FsFeedSource {
    /// Create a new filesystem feed source
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(FeedError::NotFound(path.display().to_string()));
        }

        Ok(Self { path })
    }
}

#[async_trait]
impl FeedSource for FsFeedSource {
    async fn load(&self) -> Result<Vec<ContentItem>, FeedError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let items = parse_snapshot(&content, &self.name())?;

        tracing::debug!(path = %self.path.display(), items = items.len(), "Loaded feed snapshot");

        Ok(items)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
