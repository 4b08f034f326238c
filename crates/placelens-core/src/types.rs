//! Domain types shared by the facet dictionary, tag generator, and
//! layout engines. Everything here is transient: values are built from
//! caller-supplied inputs on every request and nothing persists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Output language for user-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

/// Which rule family a facet belongs to. The generator enumerates
/// `Style` and `Cuisine` facets for fuzzy matching; `Award` and `Meal`
/// facets are referenced by well-known id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetClass {
    Award,
    Style,
    Meal,
    Cuisine,
}

/// A dictionary-backed semantic tag definition.
///
/// - `id`: globally unique key, lower-case letters only
/// - `priority`: higher is more salient; ties resolve to insertion order
/// - `allowed_categories`: `None` (or an empty set) means unrestricted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetDefinition {
    pub id: String,
    pub label_en: String,
    pub label_zh: String,
    pub priority: i32,
    pub class: FacetClass,
    #[serde(default)]
    pub allowed_categories: Option<BTreeSet<String>>,
}

impl FacetDefinition {
    /// True when this facet may be shown for the given category slug.
    pub fn allows_category(&self, category_slug: &str) -> bool {
        match &self.allowed_categories {
            None => true,
            Some(slugs) if slugs.is_empty() => true,
            Some(slugs) => slugs.contains(category_slug),
        }
    }

    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::En => &self.label_en,
            Language::Zh => &self.label_zh,
        }
    }
}

/// Loosely-structured extraction attributes for one place, as produced
/// upstream. All fields are optional; an absent field and an empty list
/// carry the same meaning (no signal).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredTags {
    #[serde(default)]
    pub style: Vec<String>,
    #[serde(default)]
    pub theme: Vec<String>,
    #[serde(default)]
    pub award: Vec<String>,
    #[serde(default)]
    pub meal: Vec<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub architect_refs: Vec<String>,
    #[serde(default)]
    pub person_refs: Vec<String>,
    #[serde(default)]
    pub alt_category: Vec<String>,
}

impl StructuredTags {
    pub fn is_empty(&self) -> bool {
        self.style.is_empty()
            && self.theme.is_empty()
            && self.award.is_empty()
            && self.meal.is_empty()
            && self.cuisine.is_empty()
            && self.architect_refs.is_empty()
            && self.person_refs.is_empty()
            && self.alt_category.is_empty()
    }
}

/// Category of the place being enriched, supplied by the caller per
/// request. `slug` is the canonical machine key used for gating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryContext {
    pub slug: String,
    pub label_en: String,
    pub label_zh: String,
}

impl CategoryContext {
    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::En => &self.label_en,
            Language::Zh => &self.label_zh,
        }
    }
}

/// Origin of an AI tag element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiTagKind {
    Facet,
    Person,
    Architect,
}

/// One ranked output unit of the tag generator.
///
/// For `kind == Facet`, `id` is a dictionary facet id and `priority` is
/// copied from the definition. For person/architect tags, `id` is the
/// external entity reference and `priority` is a fixed constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTagElement {
    pub kind: AiTagKind,
    pub id: String,
    pub label_en: String,
    pub label_zh: String,
    pub priority: i32,
}

impl AiTagElement {
    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::En => &self.label_en,
            Language::Zh => &self.label_zh,
        }
    }
}

/// Kind of named entity handed to the external resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Architect,
}

/// Result of one external entity lookup. Not owned or cached here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub entity_ref: String,
    pub label_en: String,
    pub label_zh: String,
}

/// Provenance of a candidate place match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchProvenance {
    Verified,
    Matched,
    Unmatched,
}

impl MatchProvenance {
    pub fn is_matched(self) -> bool {
        !matches!(self, MatchProvenance::Unmatched)
    }
}

/// One candidate place in the layout pool. `score` is engine-specific
/// but higher is always better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedCandidate {
    pub name: String,
    pub provenance: MatchProvenance,
    pub score: f32,
}

/// A category title plus the place names belonging to it, produced by
/// an external grouping stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub title: String,
    #[serde(default)]
    pub place_names: Vec<String>,
}

/// A resolved category bucket in the grouped layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub title: String,
    pub places: Vec<MatchedCandidate>,
}

/// Final bounded presentation layout: either one flat ordered list or a
/// list of per-category buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLayout {
    Flat(Vec<MatchedCandidate>),
    Grouped(Vec<CategoryBucket>),
}

impl DisplayLayout {
    pub fn place_count(&self) -> usize {
        match self {
            DisplayLayout::Flat(places) => places.len(),
            DisplayLayout::Grouped(buckets) => buckets.iter().map(|b| b.places.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.place_count() == 0
    }
}

/// Bilingual display-tag lists, each bounded independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayTags {
    pub en: Vec<String>,
    pub zh: Vec<String>,
}

/// Case-insensitive label equality after trimming. Used for category
/// duplication suppression and display deduplication.
pub fn labels_equal_fold(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
