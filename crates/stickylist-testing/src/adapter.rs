//! Configurable in-memory adapter.
//!
//! Rows are labelled `row {position}` and headers `header {section}`, which
//! lets tests read bindings back from a [`RecordingCanvas`](crate::RecordingCanvas)
//! or straight from the views.

use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use stickylist_core::{
    DataSetObservable, HeaderId, SectionIndexer, StickyListHeadersAdapter, View,
};

type SectionFn = Rc<dyn Fn(usize) -> HeaderId>;

/// Builder for [`TestAdapter`].
pub struct TestAdapterBuilder {
    count: usize,
    section_of: SectionFn,
    row_height: f32,
    header_height: f32,
    checkable: bool,
    indexed: bool,
}

impl TestAdapterBuilder {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            section_of: Rc::new(|_| 0),
            row_height: TestAdapter::DEFAULT_ROW_HEIGHT,
            header_height: TestAdapter::DEFAULT_HEADER_HEIGHT,
            checkable: false,
            indexed: false,
        }
    }

    /// Section id per position.
    pub fn sections(mut self, section_of: impl Fn(usize) -> HeaderId + 'static) -> Self {
        self.section_of = Rc::new(section_of);
        self
    }

    /// Sections of `size` consecutive rows: `id = position / size`.
    pub fn section_size(self, size: usize) -> Self {
        let size = size.max(1);
        self.sections(move |position| (position / size) as HeaderId)
    }

    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    /// Rows are created with the checkable capability.
    pub fn checkable(mut self) -> Self {
        self.checkable = true;
        self
    }

    /// Exposes a section indexer with one entry per distinct section id.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn build(self) -> Rc<TestAdapter> {
        Rc::new(TestAdapter {
            count: Cell::new(self.count),
            section_of: RefCell::new(self.section_of),
            row_height: self.row_height,
            header_height: self.header_height,
            checkable: self.checkable,
            indexed: self.indexed,
            disabled: RefCell::new(BTreeSet::new()),
            row_allocations: Cell::new(0),
            header_allocations: Cell::new(0),
            header_binds: RefCell::new(Vec::new()),
            observable: DataSetObservable::new(),
        })
    }
}

pub struct TestAdapter {
    count: Cell<usize>,
    section_of: RefCell<SectionFn>,
    row_height: f32,
    header_height: f32,
    checkable: bool,
    indexed: bool,
    disabled: RefCell<BTreeSet<usize>>,
    row_allocations: Cell<usize>,
    header_allocations: Cell<usize>,
    header_binds: RefCell<Vec<(usize, HeaderId)>>,
    observable: DataSetObservable,
}

impl TestAdapter {
    pub const DEFAULT_ROW_HEIGHT: f32 = 40.0;
    pub const DEFAULT_HEADER_HEIGHT: f32 = 20.0;

    pub fn builder(count: usize) -> TestAdapterBuilder {
        TestAdapterBuilder::new(count)
    }

    /// `count` rows in sections of `size` with default heights.
    pub fn sectioned(count: usize, size: usize) -> Rc<Self> {
        TestAdapterBuilder::new(count).section_size(size).build()
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Changes the row count and notifies observers.
    pub fn set_count(&self, count: usize) {
        self.count.set(count);
        self.observable.notify_changed();
    }

    /// Replaces the section function and notifies observers.
    pub fn set_sections(&self, section_of: impl Fn(usize) -> HeaderId + 'static) {
        *self.section_of.borrow_mut() = Rc::new(section_of);
        self.observable.notify_changed();
    }

    pub fn set_enabled(&self, position: usize, enabled: bool) {
        if enabled {
            self.disabled.borrow_mut().remove(&position);
        } else {
            self.disabled.borrow_mut().insert(position);
        }
    }

    pub fn observable(&self) -> &DataSetObservable {
        &self.observable
    }

    /// Row views created because no recycled view was offered.
    pub fn row_allocations(&self) -> usize {
        self.row_allocations.get()
    }

    /// Header views created because no recycled view was offered.
    pub fn header_allocations(&self) -> usize {
        self.header_allocations.get()
    }

    /// Every header bind as (position, section id), in call order.
    pub fn header_binds(&self) -> Ref<'_, Vec<(usize, HeaderId)>> {
        self.header_binds.borrow()
    }

    /// Distinct sections a header has been bound for.
    pub fn bound_sections(&self) -> BTreeSet<HeaderId> {
        self.header_binds.borrow().iter().map(|(_, id)| *id).collect()
    }

    pub fn reset_counters(&self) {
        self.row_allocations.set(0);
        self.header_allocations.set(0);
        self.header_binds.borrow_mut().clear();
    }

    fn section_ids(&self) -> Vec<HeaderId> {
        let mut ids: Vec<HeaderId> = Vec::new();
        for position in 0..self.count.get() {
            let id = self.header_id(position);
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

impl StickyListHeadersAdapter for TestAdapter {
    fn count(&self) -> usize {
        self.count.get()
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64 + 1000
    }

    fn has_stable_ids(&self) -> bool {
        true
    }

    fn are_all_items_enabled(&self) -> bool {
        self.disabled.borrow().is_empty()
    }

    fn is_enabled(&self, position: usize) -> bool {
        !self.disabled.borrow().contains(&position)
    }

    fn row_view(&self, position: usize, convert_view: Option<View>) -> View {
        let view = match convert_view {
            Some(view) if view.is_checkable() == self.checkable => view,
            _ => {
                self.row_allocations.set(self.row_allocations.get() + 1);
                if self.checkable {
                    View::checkable(self.row_height)
                } else {
                    View::new(self.row_height)
                }
            }
        };
        view.set_label(format!("row {position}"));
        view
    }

    fn header_id(&self, position: usize) -> HeaderId {
        let section_of = self.section_of.borrow().clone();
        section_of(position)
    }

    fn header_view(&self, position: usize, convert_view: Option<View>) -> View {
        let view = convert_view.unwrap_or_else(|| {
            self.header_allocations.set(self.header_allocations.get() + 1);
            View::new(self.header_height)
        });
        let id = self.header_id(position);
        view.set_label(format!("header {id}"));
        self.header_binds.borrow_mut().push((position, id));
        view
    }

    fn data_set_observable(&self) -> Option<&DataSetObservable> {
        Some(&self.observable)
    }

    fn section_indexer(&self) -> Option<&dyn SectionIndexer> {
        self.indexed.then_some(self as &dyn SectionIndexer)
    }
}

impl SectionIndexer for TestAdapter {
    fn sections(&self) -> Vec<String> {
        self.section_ids()
            .into_iter()
            .map(|id| format!("section {id}"))
            .collect()
    }

    fn position_for_section(&self, section: usize) -> usize {
        let mut seen = 0;
        for position in 0..self.count.get() {
            if position == 0 || self.header_id(position) != self.header_id(position - 1) {
                if seen == section {
                    return position;
                }
                seen += 1;
            }
        }
        self.count.get().saturating_sub(1)
    }

    fn section_for_position(&self, position: usize) -> usize {
        let last = position.min(self.count.get().saturating_sub(1));
        (1..=last)
            .filter(|&p| self.header_id(p) != self.header_id(p - 1))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sectioned_groups_consecutive_rows() {
        let adapter = TestAdapter::sectioned(25, 10);
        assert_eq!(adapter.header_id(9), 0);
        assert_eq!(adapter.header_id(10), 1);
        assert_eq!(adapter.header_id(24), 2);
    }

    #[test]
    fn recycled_views_are_not_counted() {
        let adapter = TestAdapter::sectioned(5, 5);
        let row = adapter.row_view(0, None);
        let again = adapter.row_view(1, Some(row.clone()));
        assert_eq!(row, again);
        assert_eq!(again.label(), "row 1");
        assert_eq!(adapter.row_allocations(), 1);
    }

    #[test]
    fn indexer_lists_sections_in_order() {
        let adapter = TestAdapter::builder(30).section_size(10).indexed().build();
        let indexer = adapter.section_indexer().unwrap();
        assert_eq!(indexer.sections(), vec!["section 0", "section 1", "section 2"]);
        assert_eq!(indexer.position_for_section(2), 20);
        assert_eq!(indexer.section_for_position(15), 1);
    }
}
