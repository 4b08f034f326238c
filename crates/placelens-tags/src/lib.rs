//! placelens-tags
//!
//! The AI tag rule engine and the display-tag composer. `generator`
//! turns structured attributes into at most two ranked tags;
//! `compose` merges them with a category label into the bounded
//! user-facing list.

pub mod compose;
pub mod generator;

pub use compose::{compose, compose_bilingual, MAX_DISPLAY_TAGS};
pub use generator::{TagGenerator, ENTITY_TAG_PRIORITY, MAX_AI_TAGS};
