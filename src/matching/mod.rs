// File: src/matching/mod.rs
pub mod matcher;
pub mod tiers;

pub use matcher::{TierMatch, TieredMatcher};
pub use tiers::{Candidate, Query, Tier, TierKind};
