//! Merge a category label with ranked AI tags into the bounded,
//! deduplicated display-tag list shown to end users.

use placelens_core::types::{labels_equal_fold, AiTagElement, DisplayTags, Language};

/// Hard cap on display tags per language.
pub const MAX_DISPLAY_TAGS: usize = 3;

/// Compose the display-tag list for one language.
///
/// The category label (if non-blank after trimming) is always element
/// zero. AI tags follow in stable priority-descending order; blank
/// labels and case-insensitive duplicates of anything already placed
/// (the category included) are skipped. Pure: identical inputs yield
/// identical output.
pub fn compose(
    category_label_en: &str,
    category_label_zh: &str,
    ai_tags: &[AiTagElement],
    language: Language,
) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(MAX_DISPLAY_TAGS);

    let category = match language {
        Language::En => category_label_en,
        Language::Zh => category_label_zh,
    }
    .trim();
    if !category.is_empty() {
        result.push(category.to_string());
    }

    let mut sorted: Vec<&AiTagElement> = ai_tags.iter().collect();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

    for tag in sorted {
        if result.len() >= MAX_DISPLAY_TAGS {
            break;
        }
        let label = tag.label(language).trim();
        if label.is_empty() {
            continue;
        }
        if result.iter().any(|placed| labels_equal_fold(placed, label)) {
            continue;
        }
        result.push(label.to_string());
    }
    result
}

/// Both language lists, computed independently from the same sorted
/// tag order.
pub fn compose_bilingual(
    category_label_en: &str,
    category_label_zh: &str,
    ai_tags: &[AiTagElement],
) -> DisplayTags {
    DisplayTags {
        en: compose(category_label_en, category_label_zh, ai_tags, Language::En),
        zh: compose(category_label_en, category_label_zh, ai_tags, Language::Zh),
    }
}
