//! Rule engine turning a place's structured attributes into at most
//! two ranked AI tags.
//!
//! Candidates are collected rule by rule (award, style, brunch,
//! cuisine, then at most one resolved entity), each suppressed when its
//! label duplicates the category label, then globally ranked by
//! priority and truncated. The only suspension points are the two
//! sequential resolver calls; everything else is pure.

use placelens_core::traits::EntityResolver;
use placelens_core::types::{
    labels_equal_fold, AiTagElement, AiTagKind, CategoryContext, EntityKind, FacetClass,
    FacetDefinition, StructuredTags,
};
use placelens_facets::FacetDictionary;
use std::collections::HashSet;
use tracing::debug;

/// Hard cap on generated tags per place.
pub const MAX_AI_TAGS: usize = 2;

/// Fixed priority for resolved person/architect tags.
pub const ENTITY_TAG_PRIORITY: i32 = 50;

/// Well-known dictionary ids referenced by the rules.
pub const PRITZKER_FACET_ID: &str = "pritzker";
pub const BRUNCH_FACET_ID: &str = "brunch";

pub struct TagGenerator<'d> {
    dict: &'d FacetDictionary,
}

impl<'d> TagGenerator<'d> {
    pub fn new(dict: &'d FacetDictionary) -> Self {
        Self { dict }
    }

    /// Generate at most [`MAX_AI_TAGS`] ranked tags for one place.
    ///
    /// Absent or empty `tags` yield an empty list. Without a resolver
    /// the person/architect rules are skipped entirely. Resolver
    /// failures (including cancellation) are swallowed: the affected
    /// candidate is dropped and the entity slot stays free for the
    /// next rule.
    pub async fn generate(
        &self,
        tags: Option<&StructuredTags>,
        category: &CategoryContext,
        resolver: Option<&dyn EntityResolver>,
    ) -> Vec<AiTagElement> {
        let Some(tags) = tags else {
            return Vec::new();
        };

        let mut candidates: Vec<AiTagElement> = Vec::new();
        if let Some(tag) = self.award_candidate(tags, category) {
            candidates.push(tag);
        }
        if let Some(tag) = self.style_candidate(tags, category) {
            candidates.push(tag);
        }
        if let Some(tag) = self.brunch_candidate(tags, category) {
            candidates.push(tag);
        }
        if let Some(tag) = self.cuisine_candidate(tags, category) {
            candidates.push(tag);
        }

        if let Some(resolver) = resolver {
            // One shared slot for both entity kinds; architect first.
            // Sequential on purpose: the second lookup must see whether
            // the first consumed the slot.
            let mut slot_free = true;
            if let Some(tag) = entity_candidate(
                &tags.architect_refs,
                EntityKind::Architect,
                category,
                resolver,
                &mut slot_free,
            )
            .await
            {
                candidates.push(tag);
            }
            if let Some(tag) = entity_candidate(
                &tags.person_refs,
                EntityKind::Person,
                category,
                resolver,
                &mut slot_free,
            )
            .await
            {
                candidates.push(tag);
            }
        }

        select_top(candidates)
    }

    fn award_candidate(
        &self,
        tags: &StructuredTags,
        category: &CategoryContext,
    ) -> Option<AiTagElement> {
        let mentioned = tags
            .award
            .iter()
            .any(|award| award.to_lowercase().contains(PRITZKER_FACET_ID));
        if !mentioned {
            return None;
        }
        let def = self.dict.lookup(PRITZKER_FACET_ID)?;
        if duplicates_category(def, category) {
            return None;
        }
        Some(facet_tag(def))
    }

    /// At most one style tag: every raw style string is normalized and
    /// fuzzy-matched against every style facet id; the highest-priority
    /// allowed, non-duplicate match wins, first one on ties.
    fn style_candidate(
        &self,
        tags: &StructuredTags,
        category: &CategoryContext,
    ) -> Option<AiTagElement> {
        let mut best: Option<&FacetDefinition> = None;
        for raw in &tags.style {
            let normalized: String = raw
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphabetic())
                .collect();
            if normalized.is_empty() {
                continue;
            }
            for def in self.dict.facets_of_class(FacetClass::Style) {
                if !fuzzy_match(&normalized, &def.id.to_lowercase()) {
                    continue;
                }
                if !def.allows_category(&category.slug) {
                    continue;
                }
                if duplicates_category(def, category) {
                    continue;
                }
                match best {
                    Some(current) if current.priority >= def.priority => {}
                    _ => best = Some(def),
                }
            }
        }
        best.map(facet_tag)
    }

    fn brunch_candidate(
        &self,
        tags: &StructuredTags,
        category: &CategoryContext,
    ) -> Option<AiTagElement> {
        let mentioned = tags
            .meal
            .iter()
            .any(|meal| meal.trim().eq_ignore_ascii_case(BRUNCH_FACET_ID));
        if !mentioned {
            return None;
        }
        if !self
            .dict
            .is_allowed_for_category(BRUNCH_FACET_ID, &category.slug)
        {
            return None;
        }
        let def = self.dict.lookup(BRUNCH_FACET_ID)?;
        if duplicates_category(def, category) {
            return None;
        }
        Some(facet_tag(def))
    }

    /// At most one cuisine tag, and only for categories the cuisine
    /// facets allow. Raw strings are lower-cased but otherwise left
    /// intact before the fuzzy match.
    fn cuisine_candidate(
        &self,
        tags: &StructuredTags,
        category: &CategoryContext,
    ) -> Option<AiTagElement> {
        let mut best: Option<&FacetDefinition> = None;
        for raw in &tags.cuisine {
            let lowered = raw.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            for def in self.dict.facets_of_class(FacetClass::Cuisine) {
                if !fuzzy_match(&lowered, &def.id.to_lowercase()) {
                    continue;
                }
                if !def.allows_category(&category.slug) {
                    continue;
                }
                if duplicates_category(def, category) {
                    continue;
                }
                match best {
                    Some(current) if current.priority >= def.priority => {}
                    _ => best = Some(def),
                }
            }
        }
        best.map(facet_tag)
    }
}

/// Resolve the first reference of one entity kind, if the shared slot
/// is still free. Consumes the slot only when a tag is actually added.
async fn entity_candidate(
    refs: &[String],
    kind: EntityKind,
    category: &CategoryContext,
    resolver: &dyn EntityResolver,
    slot_free: &mut bool,
) -> Option<AiTagElement> {
    if !*slot_free {
        return None;
    }
    let entity_ref = refs.first()?;
    match resolver.resolve(entity_ref, kind).await {
        Ok(entity) => {
            if labels_equal_fold(&entity.label_en, &category.label_en)
                || labels_equal_fold(&entity.label_zh, &category.label_zh)
            {
                debug!(entity_ref = %entity.entity_ref, "entity label duplicates category, skipping");
                return None;
            }
            *slot_free = false;
            Some(AiTagElement {
                kind: match kind {
                    EntityKind::Person => AiTagKind::Person,
                    EntityKind::Architect => AiTagKind::Architect,
                },
                id: entity.entity_ref,
                label_en: entity.label_en,
                label_zh: entity.label_zh,
                priority: ENTITY_TAG_PRIORITY,
            })
        }
        Err(e) => {
            debug!(entity_ref = %entity_ref, ?kind, error = %e, "entity resolution failed, skipping");
            None
        }
    }
}

/// Bidirectional substring containment on already-normalized strings.
/// Deliberately loose: short ids can match inside unrelated words.
fn fuzzy_match(normalized: &str, facet_id: &str) -> bool {
    normalized.contains(facet_id) || facet_id.contains(normalized)
}

fn duplicates_category(def: &FacetDefinition, category: &CategoryContext) -> bool {
    labels_equal_fold(&def.label_en, &category.label_en)
        || labels_equal_fold(&def.label_zh, &category.label_zh)
}

fn facet_tag(def: &FacetDefinition) -> AiTagElement {
    AiTagElement {
        kind: AiTagKind::Facet,
        id: def.id.clone(),
        label_en: def.label_en.clone(),
        label_zh: def.label_zh.clone(),
        priority: def.priority,
    }
}

/// Stable priority-descending sort, dedup by `(kind, id)` keeping the
/// first occurrence, truncate to [`MAX_AI_TAGS`].
fn select_top(mut candidates: Vec<AiTagElement>) -> Vec<AiTagElement> {
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));
    let mut seen: HashSet<(AiTagKind, String)> = HashSet::new();
    let mut selected = Vec::with_capacity(MAX_AI_TAGS);
    for tag in candidates {
        if !seen.insert((tag.kind, tag.id.clone())) {
            continue;
        }
        selected.push(tag);
        if selected.len() == MAX_AI_TAGS {
            break;
        }
    }
    selected
}
