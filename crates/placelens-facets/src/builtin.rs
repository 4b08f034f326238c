//! The builtin production facet table.
//!
//! Ids are lower-case letters only so the normalized substring matcher
//! in the tag generator can compare them directly against normalized
//! raw attribute strings.

use placelens_core::types::{FacetClass, FacetDefinition};
use std::collections::BTreeSet;

/// Category slugs where the brunch facet may be shown.
pub const BRUNCH_CATEGORIES: [&str; 3] = ["restaurant", "cafe", "bakery"];

/// Category slugs where cuisine facets may be shown.
pub const CUISINE_CATEGORIES: [&str; 1] = ["restaurant"];

fn open(id: &str, en: &str, zh: &str, priority: i32, class: FacetClass) -> FacetDefinition {
    FacetDefinition {
        id: id.to_string(),
        label_en: en.to_string(),
        label_zh: zh.to_string(),
        priority,
        class,
        allowed_categories: None,
    }
}

fn gated(
    id: &str,
    en: &str,
    zh: &str,
    priority: i32,
    class: FacetClass,
    categories: &[&str],
) -> FacetDefinition {
    let allowed: BTreeSet<String> = categories.iter().map(|s| s.to_string()).collect();
    FacetDefinition {
        allowed_categories: Some(allowed),
        ..open(id, en, zh, priority, class)
    }
}

pub fn builtin_defs() -> Vec<FacetDefinition> {
    use FacetClass::{Award, Cuisine, Meal, Style};
    vec![
        open("pritzker", "Pritzker Prize", "普利兹克奖", 100, Award),
        open("gothic", "Gothic", "哥特式", 80, Style),
        open("baroque", "Baroque", "巴洛克", 78, Style),
        open("renaissance", "Renaissance", "文艺复兴", 76, Style),
        open("neoclassical", "Neoclassical", "新古典主义", 74, Style),
        open("modernist", "Modernist", "现代主义", 72, Style),
        open("artdeco", "Art Deco", "装饰艺术", 70, Style),
        open("brutalist", "Brutalist", "粗野主义", 68, Style),
        open("bauhaus", "Bauhaus", "包豪斯", 66, Style),
        open("romanesque", "Romanesque", "罗马式", 64, Style),
        open("rococo", "Rococo", "洛可可", 62, Style),
        gated("brunch", "Brunch", "早午餐", 60, Meal, &BRUNCH_CATEGORIES),
        gated("italian", "Italian", "意大利菜", 56, Cuisine, &CUISINE_CATEGORIES),
        gated("french", "French", "法国菜", 55, Cuisine, &CUISINE_CATEGORIES),
        gated("japanese", "Japanese", "日本料理", 54, Cuisine, &CUISINE_CATEGORIES),
        gated("cantonese", "Cantonese", "粤菜", 53, Cuisine, &CUISINE_CATEGORIES),
        gated("sichuan", "Sichuan", "川菜", 52, Cuisine, &CUISINE_CATEGORIES),
        gated("thai", "Thai", "泰国菜", 51, Cuisine, &CUISINE_CATEGORIES),
        gated("mexican", "Mexican", "墨西哥菜", 49, Cuisine, &CUISINE_CATEGORIES),
        gated("indian", "Indian", "印度菜", 48, Cuisine, &CUISINE_CATEGORIES),
        gated("seafood", "Seafood", "海鲜", 47, Cuisine, &CUISINE_CATEGORIES),
        gated("vegetarian", "Vegetarian", "素食", 46, Cuisine, &CUISINE_CATEGORIES),
    ]
}
