use std::cell::RefCell;
use std::rc::Rc;

use super::fixtures::Sections;
use crate::adapter::{DataSetChange, DataSetObserver, HeaderId};
use crate::bridge::AdapterBridge;
use crate::compound_row::RowKind;
use crate::view::View;

#[derive(Default)]
struct ChangeLog {
    changes: RefCell<Vec<DataSetChange>>,
}

impl DataSetObserver for ChangeLog {
    fn on_data_set_change(&self, change: DataSetChange) {
        self.changes.borrow_mut().push(change);
    }
}

#[test]
fn first_row_of_each_section_carries_header() {
    let adapter = Sections::new(vec![1, 1, 2, 2, 2, 3]);
    let mut bridge = AdapterBridge::new(adapter.clone());

    let with_header: Vec<bool> = (0..adapter.ids_len())
        .map(|position| bridge.bind_row(position, None).has_header())
        .collect();
    assert_eq!(with_header, vec![true, false, true, false, false, true]);

    let continuing = bridge.bind_row(1, None);
    assert!(continuing.divider().is_some());
    let starting = bridge.bind_row(2, None);
    assert!(starting.divider().is_none());
}

#[test]
fn released_header_is_pooled_and_reused() {
    let adapter = Sections::new(vec![1, 1, 2]);
    let mut bridge = AdapterBridge::new(adapter.clone());

    let compound = bridge.bind_row(0, None);
    let header = compound.header().cloned().unwrap();

    let compound = bridge.bind_row(1, Some(compound));
    assert!(!compound.has_header());
    assert_eq!(bridge.header_pool().len(), 1);
    assert!(bridge.header_pool().contains(&header));
    assert_eq!(header.parent(), None);

    let other = bridge.bind_row(2, None);
    assert_eq!(other.header(), Some(&header));
    assert!(bridge.header_pool().is_empty());
    assert_eq!(adapter.header_allocations.get(), 1);
    assert_eq!(header.parent(), Some(other.id()));
}

#[test]
fn starting_row_keeps_its_own_header() {
    let adapter = Sections::new(vec![1, 2, 3]);
    let mut bridge = AdapterBridge::new(adapter.clone());

    let compound = bridge.bind_row(0, None);
    let header = compound.header().cloned().unwrap();
    let compound = bridge.bind_row(2, Some(compound));

    assert_eq!(compound.header(), Some(&header));
    assert_eq!(header.label(), "header 3");
    assert!(bridge.header_pool().is_empty());
}

#[test]
fn capability_change_replaces_compound() {
    let adapter = Sections::new(vec![1, 1]);
    let mut bridge = AdapterBridge::new(adapter.clone());

    let plain = bridge.bind_row(0, None);
    let plain_id = plain.id();
    assert_eq!(plain.kind(), RowKind::Plain);

    adapter.set_checkable(true);
    let checkable = bridge.bind_row(1, Some(plain));
    assert_ne!(checkable.id(), plain_id);
    assert_eq!(checkable.kind(), RowKind::Checkable);
    assert_eq!(checkable.row().parent(), Some(checkable.id()));
}

#[test]
fn invalidation_drops_pool_before_forwarding() {
    let adapter = Sections::new(vec![1, 1]);
    let mut bridge = AdapterBridge::new(adapter.clone());
    let log = Rc::new(ChangeLog::default());
    let observer: Rc<dyn DataSetObserver> = log.clone();
    bridge.observable().register(&observer);

    let compound = bridge.bind_row(0, None);
    bridge.bind_row(1, Some(compound));
    assert_eq!(bridge.header_pool().len(), 1);

    adapter.observable().notify_changed();
    assert_eq!(bridge.header_pool().len(), 1);

    adapter.observable().notify_invalidated();
    assert!(bridge.header_pool().is_empty());
    assert_eq!(
        *log.changes.borrow(),
        vec![DataSetChange::Changed, DataSetChange::Invalidated]
    );
}

#[test]
fn dropping_bridge_unregisters_from_adapter() {
    let adapter = Sections::new(vec![1]);
    let bridge = AdapterBridge::new(adapter.clone());
    assert_eq!(adapter.observable().observer_count(), 1);
    drop(bridge);
    assert_eq!(adapter.observable().observer_count(), 0);
}

#[test]
fn header_click_resolves_section_at_click_time() {
    let adapter = Sections::new(vec![1, 1, 2]);
    let mut bridge = AdapterBridge::new(adapter.clone());
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = clicks.clone();
    bridge.set_header_click_listener(Some(Rc::new(
        move |header: &View, position: usize, id: HeaderId| {
            sink.borrow_mut().push((header.label(), position, id));
        },
    )));

    let compound = bridge.bind_row(0, None);
    let header = compound.header().cloned().unwrap();
    assert!(header.perform_click());

    adapter.set_ids(vec![9, 9, 2]);
    header.perform_click();

    assert_eq!(
        *clicks.borrow(),
        vec![
            ("header 1".to_string(), 0, 1),
            ("header 1".to_string(), 0, 9)
        ]
    );
}

#[test]
fn section_indexer_is_optional() {
    let adapter = Sections::new(vec![1]);
    let bridge = AdapterBridge::new(adapter);
    assert_eq!(bridge.sections(), None);
    assert_eq!(bridge.position_for_section(0), None);
}
