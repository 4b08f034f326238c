//! placelens-layout
//!
//! Buckets a pool of matched/unmatched candidate places into the final
//! size-constrained presentation layout, flat or per-category.

pub mod limiter;

pub use limiter::{MatchLimiter, MatchLimits};
