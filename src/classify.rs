//! Classification: record → category, and record + category → subcategory.
//!
//! Both functions are total — every record, including one with empty fields,
//! gets an answer. All matching is case-insensitive substring matching
//! against the lower-cased file name and path.
//!
//! Keyword matching is deliberately naive: a filename containing `baski` as
//! part of an unrelated word still matches. The production catalog depends
//! on this looseness, so it is a compatibility contract, not a bug. Stricter
//! token matching would reclassify existing files.

use crate::rules::RuleSet;
use crate::types::{CategoryId, GENERIC_LABEL, ImageRecord};

/// Marker for carousel imagery: a dedicated slide folder in the path.
/// Matches a `slide/` segment anywhere, including at the start of a
/// root-relative path. `path` must already be lower-cased.
fn in_slide_folder(path: &str) -> bool {
    path.contains("/slide/") || path.starts_with("slide/")
}

/// Resolve the top-level category for a record.
///
/// Precedence, in strict order:
/// 1. slide-folder marker or `hero` anywhere in the name/path → `Slide`
/// 2. first keyword-table row (declared order, slide row skipped) with any
///    keyword contained in the name or path
/// 3. legacy numeric fallback: first digit run in the name tested against
///    the declared ranges
/// 4. `Other`
pub fn classify(record: &ImageRecord, rules: &RuleSet) -> CategoryId {
    let name = record.name.to_lowercase();
    let path = record.path.to_lowercase();

    if in_slide_folder(&path) || path.contains("hero") || name.contains("hero") {
        return CategoryId::Slide;
    }

    for (category, keywords) in rules.keyword_rows() {
        // Slide detection happened above; the slide row only documents its
        // keywords and never matches here.
        if *category == CategoryId::Slide {
            continue;
        }
        for keyword in keywords {
            if name.contains(keyword.as_str()) || path.contains(keyword.as_str()) {
                return *category;
            }
        }
    }

    if let Some(num) = leading_number(&name) {
        for (range, category) in rules.numeric_ranges() {
            if range.contains(&num) {
                return *category;
            }
        }
    }

    CategoryId::Other
}

/// Resolve the subcategory label for a record already filed under `category`.
///
/// Slide/hero content is always `genel` regardless of category. Otherwise
/// the first of the category's subcategory keywords contained in the file
/// name wins; no match (or no keywords declared) falls back to `genel`.
/// Subcategory keywords match the name only — paths carry folder names that
/// would false-positive across the whole directory.
pub fn resolve_subcategory(record: &ImageRecord, category: CategoryId, rules: &RuleSet) -> String {
    let name = record.name.to_lowercase();
    let path = record.path.to_lowercase();

    if in_slide_folder(&path) || name.contains("hero") {
        return GENERIC_LABEL.to_string();
    }

    for keyword in rules.subcategory_keywords(category) {
        if name.contains(keyword.as_str()) {
            return keyword.clone();
        }
    }
    GENERIC_LABEL.to_string()
}

/// First run of ASCII digits in `s`, parsed as an integer.
///
/// Runs too long for `u64` yield `None` — nothing that large is a legacy
/// upload timestamp.
fn leading_number(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
