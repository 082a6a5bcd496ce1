//! Adapter bridge: turns adapter rows into compound rows.
//!
//! For each bound position the bridge decides whether the row starts a
//! section (and therefore carries a header) or continues one (and gets a
//! divider). Headers released by continuing rows go to a FIFO
//! [`HeaderPool`] so the adapter can rebind them instead of allocating.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::adapter::{
    DataSetChange, DataSetObservable, DataSetObserver, HeaderId, StickyListHeadersAdapter,
};
use crate::compound_row::{CompoundRowView, Divider, RowKind};
use crate::header_pool::HeaderPool;
use crate::view::View;

/// Receives (header view, item position, section id) for in-list header clicks.
pub type HeaderClickCallback = Rc<dyn Fn(&View, usize, HeaderId)>;

type HeaderClickSlot = Rc<RefCell<Option<HeaderClickCallback>>>;

/// Drops the header pool on invalidation, then forwards the change.
struct BridgeObserver {
    pool: Weak<RefCell<HeaderPool>>,
    downstream: Weak<DataSetObservable>,
}

impl DataSetObserver for BridgeObserver {
    fn on_data_set_change(&self, change: DataSetChange) {
        if change == DataSetChange::Invalidated {
            if let Some(pool) = self.pool.upgrade() {
                let mut pool = pool.borrow_mut();
                log::debug!("data set invalidated, dropping {} pooled headers", pool.len());
                pool.clear();
            }
        }
        if let Some(downstream) = self.downstream.upgrade() {
            downstream.notify(change);
        }
    }
}

pub struct AdapterBridge {
    adapter: Rc<dyn StickyListHeadersAdapter>,
    pool: Rc<RefCell<HeaderPool>>,
    divider: Option<Divider>,
    header_click: HeaderClickSlot,
    observable: Rc<DataSetObservable>,
    upstream: Rc<dyn DataSetObserver>,
}

impl AdapterBridge {
    pub fn new(adapter: Rc<dyn StickyListHeadersAdapter>) -> Self {
        let pool = Rc::new(RefCell::new(HeaderPool::new()));
        let observable = Rc::new(DataSetObservable::new());
        let upstream: Rc<dyn DataSetObserver> = Rc::new(BridgeObserver {
            pool: Rc::downgrade(&pool),
            downstream: Rc::downgrade(&observable),
        });
        if let Some(source) = adapter.data_set_observable() {
            source.register(&upstream);
        }
        Self {
            adapter,
            pool,
            divider: None,
            header_click: Rc::new(RefCell::new(None)),
            observable,
            upstream,
        }
    }

    pub fn adapter(&self) -> &Rc<dyn StickyListHeadersAdapter> {
        &self.adapter
    }

    /// Change notifications forwarded from the adapter, after pool handling.
    pub fn observable(&self) -> &DataSetObservable {
        &self.observable
    }

    pub fn set_divider(&mut self, divider: Option<Divider>) {
        self.divider = divider;
    }

    pub fn divider(&self) -> Option<Divider> {
        self.divider
    }

    /// Sets the listener notified when an in-list header is clicked.
    ///
    /// Applies to headers bound earlier as well.
    pub fn set_header_click_listener(&self, listener: Option<HeaderClickCallback>) {
        *self.header_click.borrow_mut() = listener;
    }

    pub fn header_pool(&self) -> Ref<'_, HeaderPool> {
        self.pool.borrow()
    }

    pub fn count(&self) -> usize {
        self.adapter.count()
    }

    pub fn is_empty(&self) -> bool {
        self.adapter.is_empty()
    }

    pub fn item_id(&self, position: usize) -> u64 {
        self.adapter.item_id(position)
    }

    pub fn has_stable_ids(&self) -> bool {
        self.adapter.has_stable_ids()
    }

    pub fn are_all_items_enabled(&self) -> bool {
        self.adapter.are_all_items_enabled()
    }

    pub fn is_enabled(&self, position: usize) -> bool {
        self.adapter.is_enabled(position)
    }

    pub fn item_view_type(&self, position: usize) -> usize {
        self.adapter.item_view_type(position)
    }

    pub fn view_type_count(&self) -> usize {
        self.adapter.view_type_count()
    }

    pub fn header_id(&self, position: usize) -> HeaderId {
        self.adapter.header_id(position)
    }

    /// Header view straight from the adapter, bypassing the pool.
    pub fn header_view(&self, position: usize, convert_view: Option<View>) -> View {
        self.adapter.header_view(position, convert_view)
    }

    pub fn sections(&self) -> Option<Vec<String>> {
        self.adapter.section_indexer().map(|indexer| indexer.sections())
    }

    pub fn position_for_section(&self, section: usize) -> Option<usize> {
        self.adapter
            .section_indexer()
            .map(|indexer| indexer.position_for_section(section))
    }

    pub fn section_for_position(&self, position: usize) -> Option<usize> {
        self.adapter
            .section_indexer()
            .map(|indexer| indexer.section_for_position(position))
    }

    /// Whether the row at `position` belongs to the same section as the one above.
    pub fn continues_section(&self, position: usize) -> bool {
        position > 0 && self.header_id(position) == self.header_id(position - 1)
    }

    pub fn is_start_of_section(&self, position: usize) -> bool {
        !self.continues_section(position)
    }

    /// Binds the row at `position` into a compound row, recycling `recycled`.
    pub fn bind_row(
        &mut self,
        position: usize,
        recycled: Option<CompoundRowView>,
    ) -> CompoundRowView {
        let mut recycled = recycled;
        let convert_row = recycled.as_ref().map(|compound| compound.row().clone());
        let row = self.adapter.row_view(position, convert_row);

        let own_header = recycled.as_mut().and_then(CompoundRowView::take_header);
        let header = if self.continues_section(position) {
            if let Some(header) = own_header {
                self.pool.borrow_mut().recycle(header);
            }
            None
        } else {
            Some(self.configure_header(position, own_header))
        };

        let kind = RowKind::of(&row);
        let mut compound = match recycled {
            Some(compound) if compound.kind() == kind => compound,
            Some(mismatched) => {
                log::trace!(
                    "row {position} changed capability to {kind:?}, replacing compound {}",
                    mismatched.id()
                );
                CompoundRowView::new(row.clone())
            }
            None => CompoundRowView::new(row.clone()),
        };
        compound.update(row, header, self.divider);
        compound
    }

    fn configure_header(&mut self, position: usize, own_header: Option<View>) -> View {
        let convert = own_header.or_else(|| self.pool.borrow_mut().pop());
        let header = self.adapter.header_view(position, convert);

        // Section id is resolved on click, the adapter may have changed since bind.
        let adapter = Rc::downgrade(&self.adapter);
        let listener = Rc::clone(&self.header_click);
        header.set_on_click(Some(Rc::new(move |view: &View| {
            let Some(adapter) = adapter.upgrade() else {
                return;
            };
            let callback = listener.borrow().clone();
            if let Some(callback) = callback {
                callback(view, position, adapter.header_id(position));
            }
        })));
        header
    }
}

impl Drop for AdapterBridge {
    fn drop(&mut self) {
        if let Some(source) = self.adapter.data_set_observable() {
            source.unregister(&self.upstream);
        }
    }
}

impl std::fmt::Debug for AdapterBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterBridge")
            .field("count", &self.adapter.count())
            .field("pooled_headers", &self.pool.borrow().len())
            .field("divider", &self.divider)
            .finish()
    }
}
