//! Application use cases

pub mod feed;
pub mod tag_index;

pub use feed::{FeedQuery, FeedUseCase, RankedItem};
pub use tag_index::{TagCount, build_tag_index};
