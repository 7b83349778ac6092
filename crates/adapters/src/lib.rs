//! verse-rank adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `feed`: JSON snapshot and in-memory feed sources

mod feed_fs;
mod feed_memory;

/// Re-exports for feed adapters
pub mod feed {
    pub use crate::feed_fs::{FsFeedSource, parse_snapshot};
    pub use crate::feed_memory::InMemoryFeedSource;
}
