//! Stateless HTML renderers for the gallery surfaces.
//!
//! Every function here is a pure map from `(rules, index, navigation state)`
//! to [Maud](https://maud.lambda.xyz/) markup. The two navigation surfaces —
//! desktop tab strip and mobile nested accordion — render from the *same*
//! [`NavigationState`], so they cannot drift apart: whatever owns the state
//! re-renders both on every transition.
//!
//! Link targets are supplied by the caller as closures. The interactive
//! controller hands out URL fragments (`#hizmetler#tabela`); the static
//! exporter hands out page filenames (`tabela-isikli.html`). The markup is
//! identical either way.
//!
//! The mobile accordion uses nested `details`/`summary`, so it collapses
//! and expands without any script.

use crate::config::{self, GalleryConfig};
use crate::gallery::NavigationState;
use crate::index::CategoryIndex;
use crate::rules::{self, RuleSet};
use crate::types::{CategorizedImage, CategoryId};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Base stylesheet, embedded at compile time. Color custom properties are
/// prepended from config at render time.
pub const CSS_STATIC: &str = include_str!("../static/style.css");

/// Desktop primary navigation: one tab per gallery category.
pub fn tab_strip(
    rules: &RuleSet,
    state: &NavigationState,
    href: impl Fn(CategoryId) -> String,
) -> Markup {
    html! {
        nav.category-tabs {
            @for &category in rules.primary_categories() {
                @let active = category == state.category;
                a.tab.active[active]
                    href=(href(category))
                    data-category=(category.as_str()) {
                    (rules::display_name(category))
                }
            }
        }
    }
}

/// Desktop secondary navigation: one button per subcategory present in the
/// active category. An empty label set renders no controls at all.
pub fn secondary_nav(
    labels: &[&str],
    state: &NavigationState,
    href: impl Fn(&str) -> String,
) -> Markup {
    html! {
        nav.subcategory-nav {
            @for &label in labels {
                @let active = state.subcategory.as_deref() == Some(label);
                a.subtab.active[active]
                    href=(href(label))
                    data-subcategory=(label) {
                    (rules::humanize(label))
                }
            }
        }
    }
}

/// Mobile nested accordion: a `details` per category, the active one open,
/// with that category's subcategory links nested inside.
pub fn mobile_accordion(
    rules: &RuleSet,
    index: &CategoryIndex,
    state: &NavigationState,
    category_href: impl Fn(CategoryId) -> String,
    subcategory_href: impl Fn(CategoryId, &str) -> String,
) -> Markup {
    html! {
        nav.mobile-accordion {
            @for &category in rules.primary_categories() {
                @let active = category == state.category;
                details class=[active.then_some("active")] open[active] {
                    summary data-category=(category.as_str()) {
                        (rules::display_name(category))
                    }
                    @let labels = index.subcategories_of(category);
                    @if labels.is_empty() {
                        a.accordion-link href=(category_href(category)) { "Tümü" }
                    } @else {
                        ul {
                            @for label in labels {
                                @let current = active
                                    && state.subcategory.as_deref() == Some(label);
                                li class=[current.then_some("active")] {
                                    a href=(subcategory_href(category, label)) {
                                        (rules::humanize(label))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The image grid: one tile per filtered image. Alt text is the humanized
/// file stem, so `tabela-isikli-1.jpg` reads as "tabela isikli 1".
pub fn gallery_grid(images: &[&CategorizedImage]) -> Markup {
    html! {
        div.gallery-grid {
            @for image in images {
                figure.gallery-tile {
                    img src=(image.record.path)
                        alt=(alt_label(&image.record.name))
                        loading="lazy";
                }
            }
        }
    }
}

/// Grid content for a navigation state: the active category filtered by the
/// active subcategory, or the whole category when none applies.
pub fn grid_for_state(index: &CategoryIndex, state: &NavigationState) -> Markup {
    match &state.subcategory {
        Some(label) => gallery_grid(&index.filtered(state.category, label)),
        None => gallery_grid(&index.images(state.category).iter().collect::<Vec<_>>()),
    }
}

/// Alt label for an image: file stem, dashes to spaces.
fn alt_label(name: &str) -> String {
    let stem = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name);
    rules::humanize(stem)
}

/// A complete gallery document for one navigation state — what the static
/// exporter writes to disk, one page per reachable state.
pub fn gallery_page(
    config: &GalleryConfig,
    rules: &RuleSet,
    index: &CategoryIndex,
    state: &NavigationState,
    css: &str,
) -> Markup {
    let category_page = |category: CategoryId| format!("{}.html", category.as_str());
    let subcategory_page =
        |category: CategoryId, label: &str| format!("{}-{}.html", category.as_str(), label);

    let labels = index.subcategories_of(state.category);
    let title = format!(
        "{} — {}",
        config.title,
        rules::display_name(state.category)
    );

    let content = html! {
        header.site-header {
            h1 { (config.title) }
        }
        (tab_strip(rules, state, category_page))
        (secondary_nav(&labels, state, |label| subcategory_page(state.category, label)))
        (mobile_accordion(rules, index, state, category_page, subcategory_page))
        main.gallery {
            (grid_for_state(index, state))
        }
    };

    base_document(&title, css, content)
}

/// Export the gallery as static pages: one per reachable navigation state.
///
/// For every gallery category this writes `<cat>.html` (whole category,
/// no filter) and `<cat>-<label>.html` for each subcategory present.
/// `index.html` is the default category's page. Returns the written file
/// names, in write order, for report output.
pub fn export_site(
    config: &GalleryConfig,
    rules: &RuleSet,
    index: &CategoryIndex,
    output_dir: &Path,
) -> Result<Vec<String>, ExportError> {
    fs::create_dir_all(output_dir)?;
    let css = format!(
        "{}\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    let mut written = Vec::new();
    let mut write_page = |filename: String, state: &NavigationState| -> Result<(), ExportError> {
        let html = gallery_page(config, rules, index, state, &css);
        fs::write(output_dir.join(&filename), html.into_string())?;
        written.push(filename);
        Ok(())
    };

    for &category in rules.primary_categories() {
        let state = NavigationState {
            category,
            subcategory: None,
        };
        write_page(format!("{}.html", category.as_str()), &state)?;

        for label in index.subcategories_of(category) {
            let state = NavigationState {
                category,
                subcategory: Some(label.to_string()),
            };
            write_page(format!("{}-{}.html", category.as_str(), label), &state)?;
        }
    }

    // The landing page is the default category, unfiltered.
    let default_state = NavigationState {
        category: rules.default_category(),
        subcategory: None,
    };
    write_page("index.html".to_string(), &default_state)?;

    Ok(written)
}

/// Base HTML document shell shared by all exported pages.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="tr" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}
