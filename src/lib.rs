//! # Vitrin
//!
//! A tabbed product-gallery engine for signage/print shop catalogs. Your
//! filenames are the data source: records are classified into product
//! categories and subcategories by ordered keyword rules, grouped into an
//! in-memory index, and rendered as a two-tier gallery (desktop tab strip +
//! mobile nested accordion) driven by one explicit navigation state.
//!
//! # Architecture: Classify → Index → Render
//!
//! ```text
//! 1. Catalog   manifest/dir  →  Vec<ImageRecord>     (ordered, immutable)
//! 2. Classify  record        →  category, subcategory (pure, total)
//! 3. Index     catalog       →  CategoryIndex         (one pass, atomic swap)
//! 4. Gallery   state + index →  RenderFrame / pages   (two synced surfaces)
//! ```
//!
//! Each stage is a pure function of the previous one, so unit tests exercise
//! classification and navigation logic without touching a filesystem or a
//! browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Catalog sources — JSON manifest loader and directory scan |
//! | [`classify`] | Pure classifier and subcategory resolver |
//! | [`rules`] | Ordered keyword tables, legacy numeric ranges, display names |
//! | [`index`] | `CategoryIndex` build/refresh and the shared `IndexCell` handle |
//! | [`gallery`] | `NavigationState` + `GalleryController` state machine |
//! | [`render`] | Stateless Maud renderers and the static page exporter |
//! | [`config`] | `config.toml` loading and CSS variable generation |
//! | [`output`] | CLI report formatting — classification tree, stats, checks |
//! | [`types`] | Shared types: `ImageRecord`, `CategoryId`, `CategorizedImage` |
//!
//! # Design Decisions
//!
//! ## Rule Order Is a Contract
//!
//! Classification is first-match-wins over *explicitly ordered* tables —
//! `Vec<(CategoryId, Vec<String>)>`, never a map whose iteration order is
//! incidental. The declared order is visible in [`rules::RuleSet::stock`],
//! overridable as TOML arrays-of-tables (which preserve order), and pinned
//! by tests.
//!
//! ## One State, Two Surfaces
//!
//! The desktop tab strip and the mobile accordion both render from the same
//! [`gallery::NavigationState`]. There is no per-surface state to get out of
//! sync: every transition re-renders both from scratch.
//!
//! ## Atomic Index Swaps
//!
//! The index is shared through [`index::IndexCell`], which only ever swaps
//! in a *fully built* index. Readers holding a snapshot keep a consistent
//! view across a refresh; transitions arriving mid-rebuild are queued, not
//! rendered against half-updated buckets.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, type-safe, XSS-safe by default, and no template files to ship.
//! The exported site is plain HTML + CSS — the mobile accordion is
//! `details`/`summary`, so no script is required to browse it.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod gallery;
pub mod index;
pub mod output;
pub mod render;
pub mod rules;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
