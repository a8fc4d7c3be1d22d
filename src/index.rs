//! The category index: classified catalog records grouped by category, plus
//! the shared cell that owns the published index and its readiness signal.
//!
//! The index is built in one ordered pass and never patched incrementally —
//! a refresh discards it and rebuilds. Views hold an [`IndexCell`] handle
//! and only ever see a fully built index: [`IndexCell::publish`] swaps the
//! `Rc` in one step, so a render either reads the old complete index or the
//! new complete one, never a half-filled bucket.

use crate::classify::{classify, resolve_subcategory};
use crate::rules::RuleSet;
use crate::types::{CategorizedImage, CategoryId, ImageRecord};
use std::cell::RefCell;
use std::rc::Rc;

/// Classified catalog records grouped by category, insertion order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryIndex {
    buckets: Vec<(CategoryId, Vec<CategorizedImage>)>,
    total: usize,
}

impl CategoryIndex {
    /// Build an index from a catalog in one pass.
    ///
    /// Every record lands in exactly one bucket; bucket contents keep the
    /// catalog's order. Same catalog + same rules → identical index.
    pub fn build(catalog: &[ImageRecord], rules: &RuleSet) -> CategoryIndex {
        let mut buckets: Vec<(CategoryId, Vec<CategorizedImage>)> =
            CategoryId::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for record in catalog {
            let category = classify(record, rules);
            let subcategory = resolve_subcategory(record, category, rules);
            let bucket = buckets
                .iter_mut()
                .find(|(c, _)| *c == category)
                .map(|(_, images)| images)
                .expect("CategoryId::ALL covers every classification result");
            bucket.push(CategorizedImage {
                record: record.clone(),
                category,
                subcategory,
            });
        }

        CategoryIndex {
            buckets,
            total: catalog.len(),
        }
    }

    /// An index with no images; what an unavailable catalog degrades to.
    pub fn empty() -> CategoryIndex {
        CategoryIndex::build(&[], &RuleSet::stock())
    }

    /// Images filed under `category`, in catalog order.
    pub fn images(&self, category: CategoryId) -> &[CategorizedImage] {
        self.buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, images)| images.as_slice())
            .unwrap_or(&[])
    }

    /// Images in `category` carrying subcategory `label`, in catalog order.
    pub fn filtered(&self, category: CategoryId, label: &str) -> Vec<&CategorizedImage> {
        self.images(category)
            .iter()
            .filter(|img| img.subcategory == label)
            .collect()
    }

    /// Distinct subcategory labels present in `category`, in order of first
    /// appearance. Drives which secondary-nav controls exist: an empty
    /// category yields an empty set and therefore no controls.
    pub fn subcategories_of(&self, category: CategoryId) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for image in self.images(category) {
            if !labels.contains(&image.subcategory.as_str()) {
                labels.push(&image.subcategory);
            }
        }
        labels
    }

    /// Every classified image across all buckets, bucket order.
    pub fn all_images(&self) -> impl Iterator<Item = &CategorizedImage> {
        self.buckets.iter().flat_map(|(_, images)| images.iter())
    }

    /// Per-category counts, bucket order.
    pub fn stats(&self) -> Vec<(CategoryId, usize)> {
        self.buckets
            .iter()
            .map(|(c, images)| (*c, images.len()))
            .collect()
    }

    /// Total record count; equals the catalog length by construction.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

struct CellInner {
    index: Option<Rc<CategoryIndex>>,
    epoch: u64,
    rebuilding: bool,
    ready_listeners: Vec<Box<dyn FnOnce()>>,
}

/// Owned handle to the single published index.
///
/// One writer (the build/refresh path), any number of readers (desktop nav,
/// mobile nav, grid). Readers take [`snapshot`](IndexCell::snapshot)s; the
/// writer marks the rebuild window with [`begin_rebuild`] and swaps the
/// reference with [`publish`] only once the new index is complete.
///
/// The "categorization complete" signal fires once, on the first publish.
/// Late subscribers are called immediately; [`is_ready`](IndexCell::is_ready)
/// answers synchronously for callers that would rather poll than listen.
///
/// [`begin_rebuild`]: IndexCell::begin_rebuild
/// [`publish`]: IndexCell::publish
pub struct IndexCell {
    inner: RefCell<CellInner>,
}

impl IndexCell {
    /// An empty cell: not ready, nothing published.
    pub fn new() -> Rc<IndexCell> {
        Rc::new(IndexCell {
            inner: RefCell::new(CellInner {
                index: None,
                epoch: 0,
                rebuilding: false,
                ready_listeners: Vec::new(),
            }),
        })
    }

    /// Has a first index been published?
    pub fn is_ready(&self) -> bool {
        self.inner.borrow().index.is_some()
    }

    /// Is a rebuild in flight? Views must not apply transitions while true.
    pub fn is_rebuilding(&self) -> bool {
        self.inner.borrow().rebuilding
    }

    /// Bumped on every publish; lets a view detect a swap it hasn't rendered.
    pub fn epoch(&self) -> u64 {
        self.inner.borrow().epoch
    }

    /// The current index, if one has been published.
    pub fn snapshot(&self) -> Option<Rc<CategoryIndex>> {
        self.inner.borrow().index.clone()
    }

    /// Subscribe to the one-shot readiness signal. Fires immediately if an
    /// index is already published; otherwise fires on the first publish.
    pub fn on_ready(&self, listener: impl FnOnce() + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.index.is_none() {
                inner.ready_listeners.push(Box::new(listener));
                return;
            }
        }
        // Borrow released — the listener may re-enter the cell.
        listener();
    }

    /// Open the rebuild window: the current index stays readable but views
    /// treat the cell as briefly unavailable for transitions.
    pub fn begin_rebuild(&self) {
        self.inner.borrow_mut().rebuilding = true;
    }

    /// Atomically swap in a fully built index and close any rebuild window.
    /// The first publish drains the readiness listeners.
    pub fn publish(&self, index: CategoryIndex) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.index = Some(Rc::new(index));
            inner.epoch += 1;
            inner.rebuilding = false;
            std::mem::take(&mut inner.ready_listeners)
        };
        // Borrow released before listeners run — they may re-enter the cell.
        for listener in listeners {
            listener();
        }
    }

    /// Discard and rebuild from `catalog`: begin_rebuild → build → publish.
    /// The old index remains the readable snapshot until the swap.
    pub fn refresh(&self, catalog: &[ImageRecord], rules: &RuleSet) {
        self.begin_rebuild();
        self.publish(CategoryIndex::build(catalog, rules));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_catalog;
    use std::cell::Cell;

    #[test]
    fn partition_invariant_holds() {
        let catalog = sample_catalog();
        let index = CategoryIndex::build(&catalog, &RuleSet::stock());
        let bucketed: usize = index.stats().iter().map(|(_, n)| n).sum();
        assert_eq!(bucketed, catalog.len());
        assert_eq!(index.len(), catalog.len());
    }

    #[test]
    fn build_is_deterministic() {
        let catalog = sample_catalog();
        let rules = RuleSet::stock();
        let a = CategoryIndex::build(&catalog, &rules);
        let b = CategoryIndex::build(&catalog, &rules);
        assert_eq!(a, b);
    }

    #[test]
    fn bucket_preserves_catalog_order() {
        let catalog = vec![
            ImageRecord::new("tabela-totem-1.jpg", "img/Urunler/tabela-totem-1.jpg"),
            ImageRecord::new("baski-vinil-1.jpg", "img/Urunler/baski-vinil-1.jpg"),
            ImageRecord::new("tabela-isikli-1.jpg", "img/Urunler/tabela-isikli-1.jpg"),
        ];
        let index = CategoryIndex::build(&catalog, &RuleSet::stock());
        let names: Vec<&str> = index
            .images(CategoryId::Tabela)
            .iter()
            .map(|i| i.record.name.as_str())
            .collect();
        assert_eq!(names, vec!["tabela-totem-1.jpg", "tabela-isikli-1.jpg"]);
    }

    #[test]
    fn subcategories_in_first_appearance_order() {
        let catalog = vec![
            ImageRecord::new("arac-kismi-1.jpg", "img/Urunler/arac-kismi-1.jpg"),
            ImageRecord::new("arac-tam-1.jpg", "img/Urunler/arac-tam-1.jpg"),
            ImageRecord::new("arac-kismi-2.jpg", "img/Urunler/arac-kismi-2.jpg"),
            ImageRecord::new("arac-diger.jpg", "img/Urunler/arac-diger.jpg"),
        ];
        let index = CategoryIndex::build(&catalog, &RuleSet::stock());
        assert_eq!(
            index.subcategories_of(CategoryId::Arac),
            vec!["kismi", "tam", "genel"]
        );
    }

    #[test]
    fn empty_category_has_no_subcategories() {
        let index = CategoryIndex::empty();
        assert!(index.subcategories_of(CategoryId::Hediye).is_empty());
        assert!(index.images(CategoryId::Hediye).is_empty());
    }

    #[test]
    fn filtered_returns_only_matching_label() {
        let catalog = sample_catalog();
        let index = CategoryIndex::build(&catalog, &RuleSet::stock());
        for img in index.filtered(CategoryId::Tabela, "isikli") {
            assert_eq!(img.subcategory, "isikli");
            assert_eq!(img.category, CategoryId::Tabela);
        }
    }

    #[test]
    fn ready_signal_fires_once_and_immediately_for_late_subscribers() {
        let cell = IndexCell::new();
        assert!(!cell.is_ready());

        let fired = Rc::new(Cell::new(0u32));
        let f = fired.clone();
        cell.on_ready(move || f.set(f.get() + 1));
        assert_eq!(fired.get(), 0);

        cell.publish(CategoryIndex::empty());
        assert!(cell.is_ready());
        assert_eq!(fired.get(), 1);

        // Late subscriber: immediate.
        let f = fired.clone();
        cell.on_ready(move || f.set(f.get() + 1));
        assert_eq!(fired.get(), 2);

        // Second publish must not re-fire the first subscriber.
        cell.publish(CategoryIndex::empty());
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn refresh_swaps_index_and_bumps_epoch() {
        let cell = IndexCell::new();
        let rules = RuleSet::stock();
        cell.refresh(&sample_catalog(), &rules);
        let before = cell.epoch();
        let old = cell.snapshot().unwrap();

        let smaller = vec![ImageRecord::new("hediye-magnet-1.jpg", "img/hediye-magnet-1.jpg")];
        cell.refresh(&smaller, &rules);

        assert_eq!(cell.epoch(), before + 1);
        assert!(!cell.is_rebuilding());
        let new = cell.snapshot().unwrap();
        assert_eq!(new.len(), 1);
        // The old snapshot a reader held is untouched.
        assert!(old.len() > 1);
    }

    #[test]
    fn rebuild_window_is_observable() {
        let cell = IndexCell::new();
        cell.publish(CategoryIndex::empty());
        cell.begin_rebuild();
        assert!(cell.is_rebuilding());
        // Old index still readable during the window.
        assert!(cell.snapshot().is_some());
        cell.publish(CategoryIndex::empty());
        assert!(!cell.is_rebuilding());
    }
}
