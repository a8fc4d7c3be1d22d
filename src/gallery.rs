//! The gallery view controller: an explicit state machine over
//! [`NavigationState`], reading the shared [`IndexCell`] and producing
//! [`RenderFrame`]s for the host to apply.
//!
//! The controller owns the *only* copy of the navigation state. Both UI
//! surfaces (desktop tab strip + secondary nav, mobile accordion) are
//! rendered from it on every transition, which is what keeps them in sync —
//! there is no per-surface state to drift.
//!
//! ## Readiness
//!
//! The index is built after the controller attaches, so there is a one-time
//! race: [`render_shell`](GalleryController::render_shell) gives the host
//! navigation markup immediately (layout doesn't jump), and
//! [`on_index_ready`](GalleryController::on_index_ready) performs the full
//! initial render exactly once when the cell's ready signal fires. A click
//! on the shell before that point queues like any other transition and
//! applies as the initial render.
//!
//! ## Rebuilds
//!
//! While the cell reports a rebuild in flight, transitions are queued (last
//! one wins) instead of rendering against an index about to be replaced.
//! [`on_index_published`](GalleryController::on_index_published) applies the
//! queued transition — or re-renders the current state, revalidating the
//! active subcategory — once the new index lands.

use crate::index::IndexCell;
use crate::render;
use crate::rules::RuleSet;
use crate::types::CategoryId;
use maud::Markup;
use std::rc::Rc;

/// Pure navigation state shared by every gallery surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub category: CategoryId,
    /// `None` renders the whole category unfiltered.
    pub subcategory: Option<String>,
}

/// Everything the host needs to apply one transition to the page.
pub struct RenderFrame {
    pub state: NavigationState,
    pub tab_strip: Markup,
    pub secondary_nav: Markup,
    pub accordion: Markup,
    pub grid: Markup,
    /// New URL fragment to publish; `None` when the URL already reflects the
    /// state (subcategory changes stay at category granularity).
    pub fragment: Option<String>,
    /// Smooth-scroll the gallery container into view.
    pub scroll_into_view: bool,
}

enum Pending {
    Category(CategoryId),
    Subcategory(String),
}

pub struct GalleryController {
    index: Rc<IndexCell>,
    rules: RuleSet,
    page_slug: String,
    state: NavigationState,
    initial_rendered: bool,
    pending: Option<Pending>,
    seen_epoch: u64,
}

impl GalleryController {
    /// Attach a controller to the shared index cell.
    ///
    /// `deep_link` is the page's URL fragment, if any; a fragment naming a
    /// known gallery category pre-selects it, anything else falls back to
    /// the first declared category. The initial subcategory is unset — the
    /// first render shows the whole category.
    pub fn new(
        index: Rc<IndexCell>,
        rules: RuleSet,
        page_slug: impl Into<String>,
        deep_link: Option<&str>,
    ) -> GalleryController {
        let page_slug = page_slug.into();
        let category = deep_link
            .and_then(|fragment| parse_fragment(fragment, &page_slug, &rules))
            .unwrap_or_else(|| rules.default_category());
        GalleryController {
            index,
            rules,
            page_slug,
            state: NavigationState {
                category,
                subcategory: None,
            },
            initial_rendered: false,
            pending: None,
            seen_epoch: 0,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Navigation shells for immediate layout, before the index is ready.
    /// The grid stays empty until [`on_index_ready`](Self::on_index_ready).
    pub fn render_shell(&self) -> RenderFrame {
        self.frame(None, false)
    }

    /// The one-time initial render, to run when the cell's ready signal
    /// fires. A transition queued against the shell applies here instead of
    /// lingering until some future refresh. Returns `None` if the initial
    /// render already happened.
    pub fn on_index_ready(&mut self) -> Option<RenderFrame> {
        if self.initial_rendered {
            return None;
        }
        self.initial_rendered = true;
        self.mark_seen();
        match self.pending.take() {
            Some(Pending::Category(category)) => self.select_category(category),
            Some(Pending::Subcategory(label)) => self.select_subcategory(&label),
            None => Some(self.frame(None, false)),
        }
    }

    /// Transition: select a primary category.
    ///
    /// Preserves the active subcategory when the new category also carries
    /// it, otherwise defaults to the first available label (or none for an
    /// empty category). Queued instead when the index is unavailable.
    pub fn select_category(&mut self, category: CategoryId) -> Option<RenderFrame> {
        if !self.can_transition() {
            self.pending = Some(Pending::Category(category));
            return None;
        }
        self.apply_category(category);
        self.mark_seen();
        Some(self.frame(Some(self.fragment_for(category)), true))
    }

    /// Transition: select a subcategory within the current category.
    /// A label not present in the category simply renders an empty grid.
    pub fn select_subcategory(&mut self, label: &str) -> Option<RenderFrame> {
        if !self.can_transition() {
            self.pending = Some(Pending::Subcategory(label.to_string()));
            return None;
        }
        self.state.subcategory = Some(label.to_string());
        self.mark_seen();
        Some(self.frame(None, true))
    }

    /// React to a published index (first build or refresh): apply the queued
    /// transition if one exists, otherwise re-render the current state so no
    /// stale grid survives the swap. Returns `None` when nothing changed.
    pub fn on_index_published(&mut self) -> Option<RenderFrame> {
        if !self.initial_rendered {
            return self.on_index_ready();
        }
        match self.pending.take() {
            Some(Pending::Category(category)) => self.select_category(category),
            Some(Pending::Subcategory(label)) => self.select_subcategory(&label),
            None => {
                if self.index.epoch() == self.seen_epoch {
                    return None;
                }
                self.revalidate_subcategory();
                self.mark_seen();
                Some(self.frame(None, false))
            }
        }
    }

    fn can_transition(&self) -> bool {
        self.index.is_ready() && !self.index.is_rebuilding()
    }

    fn mark_seen(&mut self) {
        self.seen_epoch = self.index.epoch();
    }

    /// Set the category and resolve the subcategory against the current
    /// index: keep it if still present, else first available, else none.
    fn apply_category(&mut self, category: CategoryId) {
        self.state.category = category;
        let labels: Vec<String> = self
            .index
            .snapshot()
            .map(|index| {
                index
                    .subcategories_of(category)
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        self.state.subcategory = match self.state.subcategory.take() {
            Some(current) if labels.iter().any(|l| *l == current) => Some(current),
            _ => labels.first().cloned(),
        };
    }

    /// After a refresh, an active subcategory the new index no longer
    /// carries falls back like a category switch; an unfiltered view
    /// (`None`) stays unfiltered — a rebuild must not narrow the grid.
    fn revalidate_subcategory(&mut self) {
        let Some(current) = self.state.subcategory.take() else {
            return;
        };
        let labels: Vec<String> = self
            .index
            .snapshot()
            .map(|index| {
                index
                    .subcategories_of(self.state.category)
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        self.state.subcategory = if labels.iter().any(|l| *l == current) {
            Some(current)
        } else {
            labels.first().cloned()
        };
    }

    fn fragment_for(&self, category: CategoryId) -> String {
        format!("#{}#{}", self.page_slug, category.as_str())
    }

    fn frame(&self, fragment: Option<String>, scroll_into_view: bool) -> RenderFrame {
        let snapshot = self.index.snapshot();
        let empty;
        let index = match snapshot.as_deref() {
            Some(index) => index,
            None => {
                empty = crate::index::CategoryIndex::empty();
                &empty
            }
        };

        // Interactive surfaces: category controls navigate by fragment,
        // subcategory controls are click-intercepted via data attributes.
        let category_href = |c: CategoryId| format!("#{}#{}", self.page_slug, c.as_str());
        let labels = if self.initial_rendered {
            index.subcategories_of(self.state.category)
        } else {
            Vec::new()
        };

        RenderFrame {
            state: self.state.clone(),
            tab_strip: render::tab_strip(&self.rules, &self.state, category_href),
            secondary_nav: render::secondary_nav(&labels, &self.state, |_| "#".to_string()),
            accordion: render::mobile_accordion(
                &self.rules,
                index,
                &self.state,
                category_href,
                |_, _| "#".to_string(),
            ),
            grid: if self.initial_rendered {
                render::grid_for_state(index, &self.state)
            } else {
                render::gallery_grid(&[])
            },
            fragment,
            scroll_into_view,
        }
    }
}

/// Parse a `#<page>#<category>` fragment against the gallery's page slug.
///
/// A single-segment fragment (`#tabela`) is accepted for convenience; a
/// two-segment fragment must name this page. Only categories present in the
/// gallery navigation match — `slide`, `other`, and unknown ids are ignored
/// so a stale link degrades to the default state.
pub fn parse_fragment(fragment: &str, page_slug: &str, rules: &RuleSet) -> Option<CategoryId> {
    let segments: Vec<&str> = fragment
        .trim_start_matches('#')
        .split('#')
        .filter(|s| !s.is_empty())
        .collect();
    let candidate = match segments.as_slice() {
        [category] => *category,
        [page, category] if *page == page_slug => *category,
        _ => return None,
    };
    CategoryId::parse(candidate).filter(|c| rules.primary_categories().contains(c))
}
