//! CLI report formatting.
//!
//! Output is information-centric, not file-centric: the primary line for
//! every entity is its semantic identity (category, subcategory, file name),
//! with filesystem paths as indented `Source:` context lines.
//!
//! ```text
//! Tabela (4 images)
//!     isikli (2)
//!         tabela-isikli-1.jpg
//!             Source: img/Urunler/tabela-isikli-1.jpg
//! ```
//!
//! Each report has a `format_*` function returning `Vec<String>` (pure, no
//! I/O, testable) and a `print_*` wrapper that writes to stdout.

use crate::index::CategoryIndex;
use crate::rules::{self, RuleSet};
use crate::types::CategoryId;

/// Indentation: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Category header line: display name plus count.
fn category_header(category: CategoryId, count: usize) -> String {
    format!(
        "{} ({} {})",
        rules::display_name(category),
        count,
        if count == 1 { "image" } else { "images" }
    )
}

/// Full classification report: category → subcategory → files, in bucket
/// and discovery order. Empty categories are omitted.
pub fn format_classify_report(index: &CategoryIndex, rule_set: &RuleSet) -> Vec<String> {
    let mut lines = Vec::new();

    let report_order: Vec<CategoryId> = rule_set
        .primary_categories()
        .iter()
        .copied()
        .chain([CategoryId::Slide, CategoryId::Other])
        .collect();

    for category in report_order {
        let images = index.images(category);
        if images.is_empty() {
            continue;
        }
        lines.push(category_header(category, images.len()));
        for label in index.subcategories_of(category) {
            let tagged = index.filtered(category, label);
            lines.push(format!("{}{} ({})", indent(1), label, tagged.len()));
            for image in tagged {
                lines.push(format!("{}{}", indent(2), image.record.name));
                lines.push(format!("{}Source: {}", indent(3), image.record.path));
            }
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Total: {} {} across {} categories",
        index.len(),
        if index.len() == 1 { "image" } else { "images" },
        index.stats().iter().filter(|(_, n)| *n > 0).count()
    ));
    lines
}

/// Per-category counts, bucket order, including empty buckets.
pub fn format_stats(index: &CategoryIndex) -> Vec<String> {
    let width = CategoryId::ALL
        .iter()
        .map(|c| c.as_str().len())
        .max()
        .unwrap_or(0);
    index
        .stats()
        .iter()
        .map(|(category, count)| format!("{:width$}  {}", category.as_str(), count))
        .collect()
}

/// Validation report: records nothing claimed (the `other` bucket). An
/// empty report means every record matched a rule.
pub fn format_check_report(index: &CategoryIndex) -> Vec<String> {
    let unclaimed = index.images(CategoryId::Other);
    if unclaimed.is_empty() {
        return vec!["All records matched a category rule".to_string()];
    }
    let mut lines = vec![format!(
        "{} record(s) fell through to 'other':",
        unclaimed.len()
    )];
    for image in unclaimed {
        lines.push(format!("{}{}", indent(1), image.record.name));
        lines.push(format!("{}Source: {}", indent(2), image.record.path));
    }
    lines
}

pub fn print_classify_report(index: &CategoryIndex, rule_set: &RuleSet) {
    for line in format_classify_report(index, rule_set) {
        println!("{line}");
    }
}

pub fn print_stats(index: &CategoryIndex) {
    for line in format_stats(index) {
        println!("{line}");
    }
}

pub fn print_check_report(index: &CategoryIndex) {
    for line in format_check_report(index) {
        println!("{line}");
    }
}
