//! Classification rule tables: category keywords, subcategory keywords,
//! legacy numeric ranges, and display names.
//!
//! Rule order is a contract, not an accident. The classifier picks the
//! *first* matching row, so both tables are explicit ordered lists of
//! `(category, keywords)` pairs rather than maps — TOML arrays-of-tables
//! preserve declared order, which makes first-match precedence something a
//! user can see and a test can pin down.
//!
//! ## Overriding rules
//!
//! The stock tables ship in code and match the production catalog. A
//! `[rules]` section in `config.toml` replaces any table wholesale (rows are
//! not merged — a partial override of an ordered list would make precedence
//! ambiguous):
//!
//! ```toml
//! [rules]
//! primary = ["tabela", "baski"]
//!
//! [[rules.category]]
//! id = "tabela"
//! keywords = ["tabela", "sign"]
//!
//! [[rules.subcategory]]
//! category = "tabela"
//! keywords = ["isikli", "totem"]
//!
//! [[rules.numeric_fallback]]
//! range = [1486480000, 1486490000]
//! category = "tabela"
//! ```
//!
//! Setting `numeric_fallback = []` disables the legacy numeric scheme
//! entirely — useful once a catalog has been renamed to descriptive
//! filenames.

use crate::types::CategoryId;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("unknown category id '{0}' in rules")]
    UnknownCategory(String),
    #[error("duplicate {kind} row for category '{id}' in rules")]
    DuplicateRow { kind: &'static str, id: String },
    #[error("'slide' cannot appear in the primary navigation order")]
    SlideInPrimary,
    #[error("empty keyword in rules for category '{0}'")]
    EmptyKeyword(String),
}

/// Sparse serde model for the `[rules]` section of `config.toml`.
///
/// Every field is optional; an absent field keeps the stock table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Gallery navigation order (category ids, `slide` excluded).
    pub primary: Option<Vec<String>>,
    /// Classification keyword table, in match-precedence order.
    pub category: Option<Vec<KeywordRow>>,
    /// Per-category subcategory keyword lists, each in match order.
    pub subcategory: Option<Vec<SubcategoryRow>>,
    /// Legacy numeric filename ranges, in match order.
    pub numeric_fallback: Option<Vec<NumericRow>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordRow {
    pub id: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubcategoryRow {
    pub category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericRow {
    /// Half-open `[start, end)`.
    pub range: [u64; 2],
    pub category: String,
}

/// Validated, ordered rule tables the classifier and renderers read.
#[derive(Debug, Clone)]
pub struct RuleSet {
    keywords: Vec<(CategoryId, Vec<String>)>,
    subcategories: Vec<(CategoryId, Vec<String>)>,
    numeric_ranges: Vec<(Range<u64>, CategoryId)>,
    primary: Vec<CategoryId>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::stock()
    }
}

impl RuleSet {
    /// The stock tables, matching the production catalog's conventions.
    ///
    /// The `slide` row carries its keywords for table completeness even
    /// though the classifier handles slide detection before the keyword
    /// loop and skips this row — `banner.jpg` outside a slide folder files
    /// under `other`, as the catalog has always behaved.
    pub fn stock() -> Self {
        let kw = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        RuleSet {
            keywords: vec![
                (CategoryId::Tabela, kw(&["tabela"])),
                (CategoryId::Plaket, kw(&["plaket"])),
                (CategoryId::Hediye, kw(&["hediye"])),
                (CategoryId::Promosyon, kw(&["promosyon"])),
                (CategoryId::Baski, kw(&["baski"])),
                (CategoryId::Arac, kw(&["arac"])),
                (
                    CategoryId::Slide,
                    kw(&["slide", "hero", "main", "banner", "carousel"]),
                ),
            ],
            subcategories: vec![
                (
                    CategoryId::Tabela,
                    kw(&["isikli", "kutu-harf", "yonlendirme", "totem", "cephe"]),
                ),
                (
                    CategoryId::Baski,
                    kw(&["vinil", "poster", "afis", "folyo", "sticker"]),
                ),
                (CategoryId::Arac, kw(&["tam", "kismi", "cam-filmi", "koruma"])),
                (CategoryId::Promosyon, kw(&["ajanda", "kalem", "kupa", "usb"])),
                (CategoryId::Plaket, kw(&["ahsap", "kristal", "metal"])),
                (CategoryId::Hediye, kw(&["kisiye-ozel", "magnet", "fotograf"])),
            ],
            // Legacy upload-timestamp filenames. Dead weight once the
            // catalog is fully renamed; override with [] to drop.
            numeric_ranges: vec![
                (1_400_000_000..1_401_000_000, CategoryId::Arac),
                (1_486_480_000..1_486_490_000, CategoryId::Tabela),
                (1_486_530_000..1_486_540_000, CategoryId::Baski),
            ],
            primary: vec![
                CategoryId::Tabela,
                CategoryId::Baski,
                CategoryId::Arac,
                CategoryId::Hediye,
                CategoryId::Plaket,
                CategoryId::Promosyon,
            ],
        }
    }

    /// Build a rule set from a sparse config section, starting from stock.
    pub fn from_config(config: &RulesConfig) -> Result<RuleSet, RulesError> {
        let mut rules = RuleSet::stock();

        if let Some(rows) = &config.category {
            rules.keywords = parse_rows(rows.iter().map(|r| (&r.id, &r.keywords)), "category")?;
        }
        if let Some(rows) = &config.subcategory {
            rules.subcategories =
                parse_rows(rows.iter().map(|r| (&r.category, &r.keywords)), "subcategory")?;
        }
        if let Some(rows) = &config.numeric_fallback {
            let mut ranges = Vec::with_capacity(rows.len());
            for row in rows {
                let id = CategoryId::parse(&row.category)
                    .ok_or_else(|| RulesError::UnknownCategory(row.category.clone()))?;
                ranges.push((row.range[0]..row.range[1], id));
            }
            rules.numeric_ranges = ranges;
        }
        if let Some(ids) = &config.primary {
            let mut primary = Vec::with_capacity(ids.len());
            for id in ids {
                let cat =
                    CategoryId::parse(id).ok_or_else(|| RulesError::UnknownCategory(id.clone()))?;
                if cat == CategoryId::Slide {
                    return Err(RulesError::SlideInPrimary);
                }
                if primary.contains(&cat) {
                    return Err(RulesError::DuplicateRow {
                        kind: "primary",
                        id: id.clone(),
                    });
                }
                primary.push(cat);
            }
            rules.primary = primary;
        }

        Ok(rules)
    }

    /// Classification keyword rows, in match-precedence order.
    pub fn keyword_rows(&self) -> &[(CategoryId, Vec<String>)] {
        &self.keywords
    }

    /// Subcategory keywords declared for a category, in match order.
    /// Categories with no row (slide, other) get an empty list.
    pub fn subcategory_keywords(&self, category: CategoryId) -> &[String] {
        self.subcategories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, kws)| kws.as_slice())
            .unwrap_or(&[])
    }

    /// Legacy numeric fallback ranges, in match order.
    pub fn numeric_ranges(&self) -> &[(Range<u64>, CategoryId)] {
        &self.numeric_ranges
    }

    /// Categories shown in the gallery navigation, in display order.
    pub fn primary_categories(&self) -> &[CategoryId] {
        &self.primary
    }

    /// First category of the navigation — the default selection.
    pub fn default_category(&self) -> CategoryId {
        self.primary.first().copied().unwrap_or(CategoryId::Other)
    }
}

fn parse_rows<'a>(
    rows: impl Iterator<Item = (&'a String, &'a Vec<String>)>,
    kind: &'static str,
) -> Result<Vec<(CategoryId, Vec<String>)>, RulesError> {
    let mut out: Vec<(CategoryId, Vec<String>)> = Vec::new();
    for (id, keywords) in rows {
        let cat =
            CategoryId::parse(id).ok_or_else(|| RulesError::UnknownCategory(id.clone()))?;
        if out.iter().any(|(c, _)| *c == cat) {
            return Err(RulesError::DuplicateRow {
                kind,
                id: id.clone(),
            });
        }
        let mut lowered = Vec::with_capacity(keywords.len());
        for kw in keywords {
            if kw.trim().is_empty() {
                return Err(RulesError::EmptyKeyword(id.clone()));
            }
            lowered.push(kw.to_lowercase());
        }
        out.push((cat, lowered));
    }
    Ok(out)
}

/// Human-readable category name for navigation controls.
pub fn display_name(category: CategoryId) -> &'static str {
    match category {
        CategoryId::Tabela => "Tabela",
        CategoryId::Baski => "Baskı",
        CategoryId::Arac => "Araç Giydirme",
        CategoryId::Hediye => "Hediye",
        CategoryId::Plaket => "Plaket",
        CategoryId::Promosyon => "Promosyon",
        CategoryId::Slide => "Slide",
        CategoryId::Other => "Diğer",
    }
}

/// Humanize a keyword label for button text: dashes become spaces.
/// `kutu-harf` → `kutu harf`. Casing is left to the stylesheet.
pub fn humanize(label: &str) -> String {
    label.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_keyword_order_puts_plaket_before_baski() {
        let rules = RuleSet::stock();
        let order: Vec<CategoryId> = rules.keyword_rows().iter().map(|(c, _)| *c).collect();
        let plaket = order.iter().position(|c| *c == CategoryId::Plaket).unwrap();
        let baski = order.iter().position(|c| *c == CategoryId::Baski).unwrap();
        assert!(plaket < baski);
    }

    #[test]
    fn stock_primary_starts_with_tabela_and_excludes_slide() {
        let rules = RuleSet::stock();
        assert_eq!(rules.default_category(), CategoryId::Tabela);
        assert!(!rules.primary_categories().contains(&CategoryId::Slide));
        assert!(!rules.primary_categories().contains(&CategoryId::Other));
    }

    #[test]
    fn toml_override_preserves_declared_order() {
        let config: RulesConfig = toml::from_str(
            r#"
            [[category]]
            id = "baski"
            keywords = ["print"]

            [[category]]
            id = "tabela"
            keywords = ["sign"]
            "#,
        )
        .unwrap();
        let rules = RuleSet::from_config(&config).unwrap();
        let order: Vec<CategoryId> = rules.keyword_rows().iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec![CategoryId::Baski, CategoryId::Tabela]);
    }

    #[test]
    fn keywords_are_lowercased_on_load() {
        let config: RulesConfig = toml::from_str(
            r#"
            [[category]]
            id = "tabela"
            keywords = ["TaBeLa"]
            "#,
        )
        .unwrap();
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.keyword_rows()[0].1, vec!["tabela"]);
    }

    #[test]
    fn empty_numeric_fallback_disables_legacy_ranges() {
        let config = RulesConfig {
            numeric_fallback: Some(vec![]),
            ..Default::default()
        };
        let rules = RuleSet::from_config(&config).unwrap();
        assert!(rules.numeric_ranges().is_empty());
    }

    #[test]
    fn unknown_category_id_rejected() {
        let config = RulesConfig {
            primary: Some(vec!["mugs".into()]),
            ..Default::default()
        };
        assert!(matches!(
            RuleSet::from_config(&config),
            Err(RulesError::UnknownCategory(id)) if id == "mugs"
        ));
    }

    #[test]
    fn slide_rejected_in_primary() {
        let config = RulesConfig {
            primary: Some(vec!["tabela".into(), "slide".into()]),
            ..Default::default()
        };
        assert!(matches!(
            RuleSet::from_config(&config),
            Err(RulesError::SlideInPrimary)
        ));
    }

    #[test]
    fn duplicate_row_rejected() {
        let config: RulesConfig = toml::from_str(
            r#"
            [[subcategory]]
            category = "arac"
            keywords = ["tam"]

            [[subcategory]]
            category = "arac"
            keywords = ["kismi"]
            "#,
        )
        .unwrap();
        assert!(matches!(
            RuleSet::from_config(&config),
            Err(RulesError::DuplicateRow { kind: "subcategory", .. })
        ));
    }

    #[test]
    fn humanize_replaces_dashes() {
        assert_eq!(humanize("kutu-harf"), "kutu harf");
        assert_eq!(humanize("kisiye-ozel"), "kisiye ozel");
        assert_eq!(humanize("genel"), "genel");
    }

    #[test]
    fn unlisted_category_has_no_subcategory_keywords() {
        let rules = RuleSet::stock();
        assert!(rules.subcategory_keywords(CategoryId::Other).is_empty());
        assert!(rules.subcategory_keywords(CategoryId::Slide).is_empty());
    }
}
