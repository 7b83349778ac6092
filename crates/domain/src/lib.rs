//! verse-rank domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Content items and badges
//! - `ranking`: Hot, new, top and rising feed orderings
//! - `tags`: Tag canonicalization, matching and URL slugs
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Feed assembly and tag indexing

pub mod model;
pub mod ports;
pub mod ranking;
pub mod tags;
pub mod usecases;

pub use model::*;
pub use ports::*;
pub use ranking::{Ranker, RankingWeights, ScoreBreakdown, SortStrategy};
