use futures::future::BoxFuture;
use placelens_core::traits::EntityResolver;
use placelens_core::types::{
    AiTagKind, CategoryContext, EntityKind, ResolvedEntity, StructuredTags,
};
use placelens_facets::FacetDictionary;
use placelens_tags::{TagGenerator, ENTITY_TAG_PRIORITY, MAX_AI_TAGS};
use std::sync::atomic::{AtomicUsize, Ordering};

fn category(slug: &str, en: &str, zh: &str) -> CategoryContext {
    CategoryContext {
        slug: slug.to_string(),
        label_en: en.to_string(),
        label_zh: zh.to_string(),
    }
}

fn museum() -> CategoryContext {
    category("museum", "Museum", "博物馆")
}

fn restaurant() -> CategoryContext {
    category("restaurant", "Restaurant", "餐厅")
}

/// Resolver that answers every reference with a fixed label and counts
/// how often it was asked.
struct StaticResolver {
    label_en: String,
    label_zh: String,
    calls: AtomicUsize,
}

impl StaticResolver {
    fn new(label_en: &str, label_zh: &str) -> Self {
        Self {
            label_en: label_en.to_string(),
            label_zh: label_zh.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl EntityResolver for StaticResolver {
    fn resolve<'a>(
        &'a self,
        entity_ref: &'a str,
        _kind: EntityKind,
    ) -> BoxFuture<'a, anyhow::Result<ResolvedEntity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let entity = ResolvedEntity {
            entity_ref: entity_ref.to_string(),
            label_en: self.label_en.clone(),
            label_zh: self.label_zh.clone(),
        };
        Box::pin(async move { Ok(entity) })
    }
}

/// Resolver that fails for one entity kind and succeeds for the other.
struct KindSelectiveResolver {
    failing_kind: EntityKind,
}

impl EntityResolver for KindSelectiveResolver {
    fn resolve<'a>(
        &'a self,
        entity_ref: &'a str,
        kind: EntityKind,
    ) -> BoxFuture<'a, anyhow::Result<ResolvedEntity>> {
        let failing = self.failing_kind;
        let entity_ref = entity_ref.to_string();
        Box::pin(async move {
            if kind == failing {
                anyhow::bail!("lookup unavailable");
            }
            Ok(ResolvedEntity {
                entity_ref,
                label_en: "Jane Doe".to_string(),
                label_zh: "简·多伊".to_string(),
            })
        })
    }
}

struct FailingResolver;

impl EntityResolver for FailingResolver {
    fn resolve<'a>(
        &'a self,
        _entity_ref: &'a str,
        _kind: EntityKind,
    ) -> BoxFuture<'a, anyhow::Result<ResolvedEntity>> {
        Box::pin(async { anyhow::bail!("resolver offline") })
    }
}

#[tokio::test]
async fn absent_and_empty_inputs_yield_no_tags() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    assert!(generator.generate(None, &museum(), None).await.is_empty());

    let empty = StructuredTags::default();
    assert!(generator
        .generate(Some(&empty), &museum(), None)
        .await
        .is_empty());
}

#[tokio::test]
async fn pritzker_award_is_tagged() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        award: vec!["Pritzker Architecture Prize".to_string()],
        ..Default::default()
    };
    let result = generator.generate(Some(&tags), &museum(), None).await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].kind, AiTagKind::Facet);
    assert_eq!(result[0].id, "pritzker");
    assert_eq!(result[0].label_en, "Pritzker Prize");
}

#[tokio::test]
async fn pritzker_suppressed_when_category_label_matches() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        award: vec!["pritzker".to_string()],
        ..Default::default()
    };
    let ctx = category("award", "pritzker prize", "奖项");
    let result = generator.generate(Some(&tags), &ctx, None).await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn at_most_one_style_tag_highest_priority_wins() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        style: vec![
            "Baroque revival".to_string(),
            "Neo-Gothic".to_string(),
            "Rococo interior".to_string(),
        ],
        ..Default::default()
    };
    let result = generator.generate(Some(&tags), &museum(), None).await;
    let styles: Vec<&str> = result
        .iter()
        .filter(|t| t.kind == AiTagKind::Facet)
        .map(|t| t.id.as_str())
        .collect();
    // "Neo-Gothic" normalizes to "neogothic" which contains "gothic",
    // the highest-priority style in the table.
    assert_eq!(styles, vec!["gothic"]);
}

#[tokio::test]
async fn style_duplicate_of_category_label_falls_back() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        style: vec!["Gothic".to_string(), "Baroque".to_string()],
        ..Default::default()
    };
    let ctx = category("landmark", "Gothic", "哥特式");
    let result = generator.generate(Some(&tags), &ctx, None).await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "baroque");
}

#[tokio::test]
async fn brunch_requires_an_allowed_category() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        meal: vec!["Brunch".to_string()],
        ..Default::default()
    };
    assert!(generator
        .generate(Some(&tags), &museum(), None)
        .await
        .is_empty());

    let cafe = category("cafe", "Cafe", "咖啡馆");
    let result = generator.generate(Some(&tags), &cafe, None).await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "brunch");
}

#[tokio::test]
async fn cuisine_only_for_restaurants() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        cuisine: vec!["Italian".to_string()],
        ..Default::default()
    };
    assert!(generator
        .generate(Some(&tags), &museum(), None)
        .await
        .is_empty());

    let result = generator.generate(Some(&tags), &restaurant(), None).await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "italian");
}

#[tokio::test]
async fn cuisine_fuzzy_match_keeps_highest_priority() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        cuisine: vec!["thai".to_string(), "northern italian".to_string()],
        ..Default::default()
    };
    let result = generator.generate(Some(&tags), &restaurant(), None).await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "italian");
}

#[tokio::test]
async fn entity_slot_is_shared_architect_first() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let resolver = StaticResolver::new("Zaha Hadid", "扎哈·哈迪德");
    let tags = StructuredTags {
        architect_refs: vec!["Q48419".to_string()],
        person_refs: vec!["Q1339".to_string()],
        ..Default::default()
    };
    let result = generator
        .generate(Some(&tags), &museum(), Some(&resolver))
        .await;
    let entity_tags: Vec<_> = result
        .iter()
        .filter(|t| matches!(t.kind, AiTagKind::Person | AiTagKind::Architect))
        .collect();
    assert_eq!(entity_tags.len(), 1);
    assert_eq!(entity_tags[0].kind, AiTagKind::Architect);
    assert_eq!(entity_tags[0].id, "Q48419");
    assert_eq!(entity_tags[0].priority, ENTITY_TAG_PRIORITY);
    // Person lookup must not even be attempted once the slot is gone.
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_architect_lookup_leaves_slot_for_person() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let resolver = KindSelectiveResolver {
        failing_kind: EntityKind::Architect,
    };
    let tags = StructuredTags {
        architect_refs: vec!["Q48419".to_string()],
        person_refs: vec!["Q1339".to_string()],
        ..Default::default()
    };
    let result = generator
        .generate(Some(&tags), &museum(), Some(&resolver))
        .await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].kind, AiTagKind::Person);
    assert_eq!(result[0].id, "Q1339");
}

#[tokio::test]
async fn resolver_failure_never_disturbs_facet_tags() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        style: vec!["Bauhaus".to_string()],
        architect_refs: vec!["Q48419".to_string()],
        ..Default::default()
    };
    let result = generator
        .generate(Some(&tags), &museum(), Some(&FailingResolver))
        .await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "bauhaus");
}

#[tokio::test]
async fn missing_resolver_skips_entity_rules() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        architect_refs: vec!["Q48419".to_string()],
        person_refs: vec!["Q1339".to_string()],
        ..Default::default()
    };
    let result = generator.generate(Some(&tags), &museum(), None).await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn output_is_ranked_and_capped() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let resolver = StaticResolver::new("Renzo Piano", "伦佐·皮亚诺");
    let tags = StructuredTags {
        award: vec!["Pritzker Prize 1998".to_string()],
        style: vec!["modernist".to_string()],
        cuisine: vec!["french".to_string()],
        meal: vec!["brunch".to_string()],
        architect_refs: vec!["Q134165".to_string()],
        ..Default::default()
    };
    let result = generator
        .generate(Some(&tags), &restaurant(), Some(&resolver))
        .await;
    assert_eq!(result.len(), MAX_AI_TAGS);
    // pritzker (100) then modernist (72) outrank brunch, french, and
    // the entity tag.
    assert_eq!(result[0].id, "pritzker");
    assert_eq!(result[1].id, "modernist");
    assert!(result[0].priority >= result[1].priority);
}

#[tokio::test]
async fn facet_outputs_always_exist_in_dictionary_and_pass_gating() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        award: vec!["PRITZKER".to_string()],
        style: vec!["romanesque".to_string()],
        cuisine: vec!["seafood".to_string()],
        meal: vec!["brunch".to_string()],
        ..Default::default()
    };
    for ctx in [museum(), restaurant(), category("bakery", "Bakery", "面包店")] {
        let result = generator.generate(Some(&tags), &ctx, None).await;
        assert!(result.len() <= MAX_AI_TAGS);
        for tag in &result {
            if tag.kind == AiTagKind::Facet {
                assert!(dict.lookup(&tag.id).is_some());
                assert!(dict.is_allowed_for_category(&tag.id, &ctx.slug));
            }
        }
    }
}

#[tokio::test]
async fn identical_inputs_yield_identical_output() {
    let dict = FacetDictionary::builtin();
    let generator = TagGenerator::new(&dict);
    let tags = StructuredTags {
        style: vec!["baroque".to_string(), "rococo".to_string()],
        award: vec!["pritzker".to_string()],
        ..Default::default()
    };
    let first = generator.generate(Some(&tags), &museum(), None).await;
    let second = generator.generate(Some(&tags), &museum(), None).await;
    let ids = |tags: &[placelens_core::types::AiTagElement]| {
        tags.iter().map(|t| t.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}
