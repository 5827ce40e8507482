use tracing::debug;

use super::models::SearchIntent;
use super::patterns::{
    ALL_DIGITS_PATTERN, EXACT_CODE_PATTERN, LEVEL_AND_NUMBER_PATTERN, TYPE_AND_NUMBER_PATTERN,
    TYPE_ONLY_PATTERN,
};
use crate::utils::{normalize_text, truncate_for_log};


/// One step of the classification chain. `apply` sees the trimmed input and
/// returns `None` to pass it on to the next rule.
pub struct ClassificationRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<SearchIntent>,
}


/// Evaluated top-down, first match wins. Order matters: "secundaria 8" is
/// claimed by the level rule before the type-abbreviation rule sees it.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule { name: "exact_code", apply: exact_code },
    ClassificationRule { name: "all_digits", apply: all_digits },
    ClassificationRule { name: "level_and_number", apply: level_and_number },
    ClassificationRule { name: "type_and_number", apply: type_and_number },
    ClassificationRule { name: "type_only", apply: type_only },
];


/// Maps a raw search string to exactly one [`SearchIntent`].
///
/// Pure and total: anything no rule claims becomes `FreeText` with the
/// trimmed original text. Callers should reject blank input beforehand; if
/// they don't, it comes back as empty `FreeText`.
pub fn classify(raw_input: &str) -> SearchIntent {
    let trimmed = raw_input.trim();

    for rule in CLASSIFICATION_RULES {
        if let Some(intent) = (rule.apply)(trimmed) {
            debug!("Query '{}' classified by rule {}", truncate_for_log(trimmed, 80), rule.name);
            return intent;
        }
    }

    debug!("Query '{}' classified as free text", truncate_for_log(trimmed, 80));
    SearchIntent::FreeText {
        value: trimmed.to_string(),
    }
}


fn exact_code(input: &str) -> Option<SearchIntent> {
    EXACT_CODE_PATTERN.is_match(input).then(|| SearchIntent::ExactCode {
        value: input.to_lowercase(),
    })
}

// Lengths 5, 7 and 9+ have no identifier meaning and fall through.
fn all_digits(input: &str) -> Option<SearchIntent> {
    if !ALL_DIGITS_PATTERN.is_match(input) {
        return None;
    }

    match input.len() {
        8 => Some(SearchIntent::NumericId8 {
            value: input.to_string(),
        }),
        6 => Some(SearchIntent::NumericId6 {
            value: input.to_string(),
        }),
        1..=4 => Some(SearchIntent::TypeAndNumber {
            school_type: String::new(),
            number: input.to_string(),
        }),
        _ => None,
    }
}

fn level_and_number(input: &str) -> Option<SearchIntent> {
    let caps = LEVEL_AND_NUMBER_PATTERN.captures(input)?;
    Some(SearchIntent::LevelAndNumber {
        level: normalize_text(&caps[1]).into_string(),
        number: caps[2].to_string(),
    })
}

fn type_and_number(input: &str) -> Option<SearchIntent> {
    let caps = TYPE_AND_NUMBER_PATTERN.captures(input)?;
    Some(SearchIntent::TypeAndNumber {
        school_type: normalize_text(&caps[1]).into_string(),
        number: caps[2].to_string(),
    })
}

fn type_only(input: &str) -> Option<SearchIntent> {
    let caps = TYPE_ONLY_PATTERN.captures(input)?;
    Some(SearchIntent::TypeOnly {
        school_type: normalize_text(&caps[1]).into_string(),
    })
}
