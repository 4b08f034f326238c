//! placelens-facets
//!
//! Read-only facet dictionary: the builtin production table plus a TOML
//! file loader. Built once at process start; safe for unsynchronized
//! concurrent reads.

pub mod builtin;
pub mod dictionary;

pub use dictionary::FacetDictionary;
