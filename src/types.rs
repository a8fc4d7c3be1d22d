//! Shared types used across the catalog → classify → index → render pipeline.
//!
//! These types cross module boundaries and (for records and reports) are
//! serialized to JSON, so they live here rather than in the stage that
//! produces them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single catalog entry: one image file known to the gallery.
///
/// Identity is the `path`; records are never mutated after the catalog is
/// loaded. Both fields default to empty strings so a sparse or hand-edited
/// manifest entry still deserializes — classification treats empty strings
/// as "matches nothing" and files the record under the catch-all category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// File name, e.g. `tabela-isikli-1.jpg`.
    #[serde(default)]
    pub name: String,
    /// Path relative to the site root, e.g. `img/Urunler/tabela-isikli-1.jpg`.
    #[serde(default)]
    pub path: String,
}

impl ImageRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Top-level product category. A closed set: every record lands in exactly
/// one of these.
///
/// `Slide` is reserved for carousel/hero imagery and is excluded from the
/// gallery navigation; `Other` is the catch-all for records no rule claims.
/// The string ids (`as_str`) are what appear in URL fragments and the rules
/// TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Tabela,
    Baski,
    Arac,
    Hediye,
    Plaket,
    Promosyon,
    Slide,
    Other,
}

impl CategoryId {
    /// All categories, in bucket order (the order report output uses).
    pub const ALL: [CategoryId; 8] = [
        CategoryId::Tabela,
        CategoryId::Baski,
        CategoryId::Arac,
        CategoryId::Hediye,
        CategoryId::Plaket,
        CategoryId::Promosyon,
        CategoryId::Slide,
        CategoryId::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::Tabela => "tabela",
            CategoryId::Baski => "baski",
            CategoryId::Arac => "arac",
            CategoryId::Hediye => "hediye",
            CategoryId::Plaket => "plaket",
            CategoryId::Promosyon => "promosyon",
            CategoryId::Slide => "slide",
            CategoryId::Other => "other",
        }
    }

    /// Parse a category id as it appears in fragments and TOML.
    /// Unrecognized ids yield `None` — callers fall back to defaults rather
    /// than erroring (a stale deep link must not break the page).
    pub fn parse(s: &str) -> Option<CategoryId> {
        CategoryId::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The generic/fallback subcategory label.
///
/// Always implicitly available: it is both the label of slide/hero content
/// and the default when no subcategory keyword matches. Callers distinguish
/// intent via the category, not the label text.
pub const GENERIC_LABEL: &str = "genel";

/// An [`ImageRecord`] after classification. Created once per record during
/// index build and owned exclusively by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorizedImage {
    #[serde(flatten)]
    pub record: ImageRecord,
    pub category: CategoryId,
    /// Non-empty; `genel` when nothing more specific applies.
    pub subcategory: String,
}
