//! Data source contract for sticky header lists.
//!
//! The list never owns row data. It asks a [`StickyListHeadersAdapter`] for
//! row and header views by position and groups rows into sections by
//! comparing adjacent [`HeaderId`]s.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::view::View;

/// Section identifier. Only equality between adjacent rows is meaningful.
pub type HeaderId = i64;

/// Provides rows, section headers and section identity for a sticky list.
///
/// Preconditions callers may rely on:
/// - `row_view` and `header_view` always return a bound view. A recycled
///   `convert_view` may be returned as-is after rebinding.
/// - `header_id` is stable for a position until the next data-set change.
/// - Checkability is a property of the returned row view (see
///   [`View::checkable`]), not of the adapter.
pub trait StickyListHeadersAdapter {
    /// Number of data rows.
    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn has_stable_ids(&self) -> bool {
        false
    }

    fn are_all_items_enabled(&self) -> bool {
        true
    }

    fn is_enabled(&self, position: usize) -> bool {
        let _ = position;
        true
    }

    /// View type used to pick compatible recycled rows.
    fn item_view_type(&self, position: usize) -> usize {
        let _ = position;
        0
    }

    fn view_type_count(&self) -> usize {
        1
    }

    /// Returns the row view for `position`, reusing `convert_view` when given.
    fn row_view(&self, position: usize, convert_view: Option<View>) -> View;

    /// Section of the row at `position`.
    fn header_id(&self, position: usize) -> HeaderId;

    /// Returns the header view for the section containing `position`,
    /// reusing `convert_view` when given.
    fn header_view(&self, position: usize, convert_view: Option<View>) -> View;

    /// Change notifications, for adapters whose data can change.
    fn data_set_observable(&self) -> Option<&DataSetObservable> {
        None
    }

    /// Fast-scroll section index, for adapters that provide one.
    fn section_indexer(&self) -> Option<&dyn SectionIndexer> {
        None
    }
}

/// Optional section index capability used by fast scrolling.
pub trait SectionIndexer {
    fn sections(&self) -> Vec<String>;
    fn position_for_section(&self, section: usize) -> usize;
    fn section_for_position(&self, position: usize) -> usize;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSetChange {
    /// Row contents or count changed.
    Changed,
    /// Previously handed out views are no longer valid.
    Invalidated,
}

impl DataSetChange {
    /// Combines two pending changes; invalidation wins.
    pub fn merge(self, other: DataSetChange) -> DataSetChange {
        if self == DataSetChange::Invalidated || other == DataSetChange::Invalidated {
            DataSetChange::Invalidated
        } else {
            DataSetChange::Changed
        }
    }
}

pub trait DataSetObserver {
    fn on_data_set_change(&self, change: DataSetChange);
}

/// Registry of weakly held observers.
///
/// Observers are held weakly so that a list dropping its adapter bridge does
/// not need to unregister explicitly.
#[derive(Default)]
pub struct DataSetObservable {
    observers: RefCell<Vec<Weak<dyn DataSetObserver>>>,
}

impl DataSetObservable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, observer: &Rc<dyn DataSetObserver>) {
        let weak = Rc::downgrade(observer);
        let mut observers = self.observers.borrow_mut();
        if !observers.iter().any(|existing| existing.ptr_eq(&weak)) {
            observers.push(weak);
        }
    }

    pub fn unregister(&self, observer: &Rc<dyn DataSetObserver>) {
        let weak = Rc::downgrade(observer);
        self.observers
            .borrow_mut()
            .retain(|existing| !existing.ptr_eq(&weak) && existing.strong_count() > 0);
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }

    pub fn notify_changed(&self) {
        self.notify(DataSetChange::Changed);
    }

    pub fn notify_invalidated(&self) {
        self.notify(DataSetChange::Invalidated);
    }

    pub fn notify(&self, change: DataSetChange) {
        // Upgrade first so observers may register/unregister while notified.
        let live: Vec<Rc<dyn DataSetObserver>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.on_data_set_change(change);
        }
    }
}

impl std::fmt::Debug for DataSetObservable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSetObservable")
            .field("observers", &self.observer_count())
            .finish()
    }
}
