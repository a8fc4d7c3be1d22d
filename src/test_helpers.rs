//! Shared test fixtures for the vitrin test suite.
//!
//! `sample_catalog` is the one fixture most tests read; its shape is load-
//! bearing — several assertions depend on it:
//!
//! - tabela's first-appearing subcategory is `isikli`, with exactly one image
//! - `genel` images exist in both tabela and baski (preservation tests)
//! - arac lists `tam` before `kismi` (default-subcategory tests)
//! - promosyon is empty; nothing falls into `other`

use crate::index::CategoryIndex;
use crate::rules::RuleSet;
use crate::types::{CategorizedImage, ImageRecord};

/// An in-memory catalog mirroring the production naming conventions.
pub fn sample_catalog() -> Vec<ImageRecord> {
    let product = |name: &str| ImageRecord::new(name, format!("img/Urunler/{name}"));
    vec![
        product("tabela-isikli-1.jpg"),
        product("tabela-totem-1.jpg"),
        product("tabela-ozel.jpg"),
        product("baski-vinil-1.jpg"),
        product("baski-ozel.jpg"),
        product("arac-tam-1.jpg"),
        product("arac-kismi-1.jpg"),
        product("plaket-kristal-1.jpg"),
        product("hediye-magnet-1.jpg"),
        ImageRecord::new("1.jpg", "img/Slide/1.jpg"),
        ImageRecord::new("hero.jpg", "img/hero.jpg"),
    ]
}

/// Stock-rule index over [`sample_catalog`].
pub fn sample_index() -> (CategoryIndex, RuleSet) {
    let rules = RuleSet::stock();
    let index = CategoryIndex::build(&sample_catalog(), &rules);
    (index, rules)
}

/// Find a classified image by file name anywhere in the index.
/// Panics with the available names on a miss.
pub fn find_image<'a>(index: &'a CategoryIndex, name: &str) -> &'a CategorizedImage {
    index
        .all_images()
        .find(|i| i.record.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = index.all_images().map(|i| i.record.name.as_str()).collect();
            panic!("image '{name}' not found. Available: {names:?}")
        })
}
