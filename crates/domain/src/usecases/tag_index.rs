//! Tag index - count canonical tags across a feed

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    model::ContentItem,
    tags::{normalize_tag, tag_path},
};

/// Number of items carrying a canonical tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
    /// Browse path for the tag
    pub path: String,
}

/// Count how many items carry each canonical tag
///
/// Each item counts at most once per tag, however its raw tags are spelled.
/// Results are ordered by count (highest first), then by tag.
pub fn build_tag_index(items: &[ContentItem]) -> Vec<TagCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for item in items {
        let canonical: HashSet<String> = item
            .tags
            .iter()
            .map(|t| normalize_tag(t))
            .filter(|t| !t.is_empty())
            .collect();
        for tag in canonical {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut index: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            path: tag_path(&tag),
            tag,
            count,
        })
        .collect();
    index.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    index
}
