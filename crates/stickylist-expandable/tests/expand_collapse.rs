use std::cell::RefCell;
use std::rc::Rc;

use stickylist_core::{StickyListConfig, View, Visibility};
use stickylist_expandable::{ExpandableStickyList, TransitionKind};
use stickylist_testing::TestAdapter;

/// 30 rows in sections of 10, rows 40 tall, headers 20, 200px viewport.
fn list() -> ExpandableStickyList<TestAdapter> {
    let mut list = ExpandableStickyList::new(StickyListConfig {
        divider: None,
        ..StickyListConfig::default()
    });
    list.set_size(240.0, 200.0);
    list.set_adapter(Some(TestAdapter::sectioned(30, 10)));
    list.layout();
    list
}

fn top_of(list: &ExpandableStickyList<TestAdapter>, position: usize) -> Option<f32> {
    list.controller()
        .host()
        .child_for_position(position)
        .map(|child| child.top())
}

#[test]
fn collapsing_leaves_only_the_header() {
    let mut list = list();
    assert_eq!(top_of(&list, 1), Some(60.0));

    list.collapse(0);
    assert!(list.is_header_collapsed(0));
    let first = list.controller().host().child_at(0).unwrap();
    assert_eq!(first.height(), 20.0);
    assert_eq!(top_of(&list, 10), Some(20.0));
    assert!(top_of(&list, 13).is_some());

    list.expand(0);
    assert!(!list.is_header_collapsed(0));
    assert_eq!(top_of(&list, 1), Some(60.0));
    assert_eq!(list.controller().last_visible_position(), Some(4));
}

#[test]
fn transition_runs_only_for_rows_that_change() {
    let mut list = list();
    let runs: Rc<RefCell<Vec<(View, TransitionKind)>>> = Rc::default();
    let sink = runs.clone();
    list.set_transition(Box::new(move |view: &View, kind: TransitionKind| {
        view.set_visibility(kind.target_visibility());
        sink.borrow_mut().push((view.clone(), kind));
    }));

    list.expand(0);
    assert!(runs.borrow().is_empty());

    let bound = list.adapter().unwrap().item_views_by_header_id(0);
    assert!(!bound.is_empty());
    list.collapse(0);
    assert_eq!(runs.borrow().len(), bound.len());
    assert!(runs
        .borrow()
        .iter()
        .all(|(_, kind)| *kind == TransitionKind::Collapse));

    list.collapse(0);
    assert_eq!(runs.borrow().len(), bound.len());

    // rows bound while collapsed are already gone
    let gone = list.adapter().unwrap().item_views_by_header_id(0);
    assert!(gone.iter().all(|view| view.visibility() == Visibility::Gone));
}

#[test]
fn deferred_transition_blocks_layout_until_done() {
    let mut list = list();
    let pending: Rc<RefCell<Vec<(View, TransitionKind)>>> = Rc::default();
    let sink = pending.clone();
    list.set_transition(Box::new(move |view: &View, kind: TransitionKind| {
        sink.borrow_mut().push((view.clone(), kind));
    }));

    list.set_block_layout_children(true);
    list.collapse(0);
    assert_eq!(top_of(&list, 1), Some(60.0));

    for (view, kind) in pending.borrow_mut().drain(..) {
        view.set_visibility(kind.target_visibility());
    }
    list.set_block_layout_children(false);
    list.layout();
    assert_eq!(top_of(&list, 10), Some(20.0));
}

#[test]
fn rows_bound_later_respect_collapsed_sections() {
    let mut list = list();
    list.collapse(1);
    assert!(list.adapter().unwrap().item_views_by_header_id(1).is_empty());

    list.scroll_by(420.0);
    assert_eq!(list.controller().first_visible_position(), 10);
    assert_eq!(top_of(&list, 20), Some(20.0));
    assert_eq!(list.controller().sticky_header_id(), Some(1));
}

#[test]
fn item_ids_map_to_bound_views() {
    let list = list();
    let view = list.find_view_by_item_id(1002).unwrap();
    assert_eq!(view.label(), "row 2");
    assert_eq!(list.find_item_id_by_view(&view), Some(1002));
    assert_eq!(list.find_view_by_item_id(9_999), None);
    assert_eq!(list.find_item_id_by_view(&View::new(10.0)), None);
}
