use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use stickylist_core::{
    DataSetObservable, HeaderId, SectionIndexer, StickyListHeadersAdapter, View, ViewId,
    Visibility,
};

/// Row views bound per section. A view belongs to one section at a time.
#[derive(Default)]
struct SectionViews {
    by_section: FxHashMap<HeaderId, Vec<View>>,
    section_of: FxHashMap<ViewId, HeaderId>,
}

impl SectionViews {
    fn insert(&mut self, section: HeaderId, view: &View) {
        match self.section_of.insert(view.id(), section) {
            Some(previous) if previous == section => return,
            Some(previous) => {
                if let Some(views) = self.by_section.get_mut(&previous) {
                    views.retain(|bound| bound != view);
                }
            }
            None => {}
        }
        self.by_section.entry(section).or_default().push(view.clone());
    }

    fn views(&self, section: HeaderId) -> Vec<View> {
        self.by_section.get(&section).cloned().unwrap_or_default()
    }
}

/// One-to-one association between row views and item ids.
#[derive(Default)]
struct ItemViews {
    item_of: FxHashMap<ViewId, u64>,
    view_of: FxHashMap<u64, View>,
}

impl ItemViews {
    fn insert(&mut self, view: &View, item_id: u64) {
        if let Some(previous_item) = self.item_of.insert(view.id(), item_id) {
            if previous_item != item_id {
                self.view_of.remove(&previous_item);
            }
        }
        if let Some(previous_view) = self.view_of.insert(item_id, view.clone()) {
            if previous_view != *view {
                self.item_of.remove(&previous_view.id());
            }
        }
    }
}

/// Adapter decorator tracking bound rows per section and hiding rows of
/// collapsed sections.
pub struct ExpandableAdapter<A: ?Sized> {
    inner: Rc<A>,
    collapsed: RefCell<FxHashSet<HeaderId>>,
    sections: RefCell<SectionViews>,
    items: RefCell<ItemViews>,
}

impl<A: StickyListHeadersAdapter + ?Sized> ExpandableAdapter<A> {
    pub fn new(inner: Rc<A>) -> Self {
        Self {
            inner,
            collapsed: RefCell::new(FxHashSet::default()),
            sections: RefCell::new(SectionViews::default()),
            items: RefCell::new(ItemViews::default()),
        }
    }

    pub fn inner(&self) -> &Rc<A> {
        &self.inner
    }

    /// Row views last bound for `header_id`, in bind order.
    pub fn item_views_by_header_id(&self, header_id: HeaderId) -> Vec<View> {
        self.sections.borrow().views(header_id)
    }

    pub fn is_header_collapsed(&self, header_id: HeaderId) -> bool {
        self.collapsed.borrow().contains(&header_id)
    }

    /// Marks the section expanded. Returns whether it was collapsed.
    pub fn expand(&self, header_id: HeaderId) -> bool {
        self.collapsed.borrow_mut().remove(&header_id)
    }

    /// Marks the section collapsed. Returns whether it was expanded.
    pub fn collapse(&self, header_id: HeaderId) -> bool {
        self.collapsed.borrow_mut().insert(header_id)
    }

    pub fn find_view_by_item_id(&self, item_id: u64) -> Option<View> {
        self.items.borrow().view_of.get(&item_id).cloned()
    }

    pub fn find_item_id_by_view(&self, view: &View) -> Option<u64> {
        self.items.borrow().item_of.get(&view.id()).copied()
    }
}

impl<A: StickyListHeadersAdapter + ?Sized> StickyListHeadersAdapter for ExpandableAdapter<A> {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn item_id(&self, position: usize) -> u64 {
        self.inner.item_id(position)
    }

    fn has_stable_ids(&self) -> bool {
        self.inner.has_stable_ids()
    }

    fn are_all_items_enabled(&self) -> bool {
        self.inner.are_all_items_enabled()
    }

    fn is_enabled(&self, position: usize) -> bool {
        self.inner.is_enabled(position)
    }

    fn item_view_type(&self, position: usize) -> usize {
        self.inner.item_view_type(position)
    }

    fn view_type_count(&self) -> usize {
        self.inner.view_type_count()
    }

    fn row_view(&self, position: usize, convert_view: Option<View>) -> View {
        let view = self.inner.row_view(position, convert_view);
        let section = self.inner.header_id(position);
        self.items.borrow_mut().insert(&view, self.inner.item_id(position));
        self.sections.borrow_mut().insert(section, &view);

        let visibility = if self.is_header_collapsed(section) {
            Visibility::Gone
        } else {
            Visibility::Visible
        };
        view.set_visibility(visibility);
        view
    }

    fn header_id(&self, position: usize) -> HeaderId {
        self.inner.header_id(position)
    }

    fn header_view(&self, position: usize, convert_view: Option<View>) -> View {
        self.inner.header_view(position, convert_view)
    }

    fn data_set_observable(&self) -> Option<&DataSetObservable> {
        self.inner.data_set_observable()
    }

    fn section_indexer(&self) -> Option<&dyn SectionIndexer> {
        self.inner.section_indexer()
    }
}

impl<A: ?Sized> std::fmt::Debug for ExpandableAdapter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableAdapter")
            .field("collapsed", &self.collapsed.borrow())
            .field("tracked_rows", &self.items.borrow().item_of.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_moves_between_sections() {
        let mut sections = SectionViews::default();
        let view = View::new(10.0);
        sections.insert(1, &view);
        sections.insert(1, &view);
        assert_eq!(sections.views(1), vec![view.clone()]);

        sections.insert(2, &view);
        assert!(sections.views(1).is_empty());
        assert_eq!(sections.views(2), vec![view]);
    }

    #[test]
    fn item_association_stays_one_to_one() {
        let mut items = ItemViews::default();
        let first = View::new(10.0);
        let second = View::new(10.0);
        items.insert(&first, 7);
        items.insert(&second, 7);
        assert_eq!(items.view_of.get(&7), Some(&second));
        assert!(!items.item_of.contains_key(&first.id()));

        items.insert(&second, 8);
        assert!(!items.view_of.contains_key(&7));
        assert_eq!(items.item_of.get(&second.id()), Some(&8));
    }
}
