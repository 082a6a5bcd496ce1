use std::cell::RefCell;
use std::rc::Rc;

use super::fixtures::{Recorder, Sections, HEADER_HEIGHT};
use crate::adapter::HeaderId;
use crate::config::StickyListConfig;
use crate::controller::{HeaderClick, StickyHeaderController, TouchOwner};
use crate::error::StickyListError;
use crate::geometry::{EdgeInsets, Point, Rect};
use crate::input::MotionEvent;
use crate::state::ParentState;
use crate::view::{View, Visibility};

/// 100 wide, 200 tall, no divider. Rows are 40 tall, section starts 60.
fn controller_with(adapter: Rc<Sections>, config: StickyListConfig) -> StickyHeaderController {
    let mut controller = StickyHeaderController::new(StickyListConfig {
        divider: None,
        ..config
    });
    controller.set_size(100.0, 200.0);
    controller.set_adapter(Some(adapter));
    controller.layout();
    controller
}

fn default_controller(adapter: Rc<Sections>) -> StickyHeaderController {
    controller_with(adapter, StickyListConfig::default())
}

type Log<T> = Rc<RefCell<Vec<T>>>;

fn record_changes(controller: &mut StickyHeaderController) -> Log<(String, usize, HeaderId)> {
    let log: Log<(String, usize, HeaderId)> = Rc::default();
    let sink = log.clone();
    controller.set_on_sticky_header_changed_listener(Some(Box::new(
        move |header: &View, position: usize, id: HeaderId| {
            sink.borrow_mut().push((header.label(), position, id));
        },
    )));
    log
}

fn record_offsets(controller: &mut StickyHeaderController) -> Log<f32> {
    let log: Log<f32> = Rc::default();
    let sink = log.clone();
    controller.set_on_sticky_header_offset_changed_listener(Some(Box::new(
        move |_: &View, displacement: f32| sink.borrow_mut().push(displacement),
    )));
    log
}

fn record_header_clicks(controller: &mut StickyHeaderController) -> Log<(usize, HeaderId, bool)> {
    let log: Log<(usize, HeaderId, bool)> = Rc::default();
    let sink = log.clone();
    controller.set_on_header_click_listener(Some(Rc::new(move |click: &HeaderClick| {
        sink.borrow_mut()
            .push((click.item_position, click.header_id, click.currently_sticky));
    })));
    log
}

#[test]
fn empty_adapter_never_floats_a_header() {
    let mut controller = default_controller(Sections::new(Vec::new()));
    assert!(!controller.scroll_by(50.0));
    assert!(controller.sticky_header().is_none());
    assert_eq!(
        controller.set_selection(0),
        Err(StickyListError::PositionOutOfRange {
            position: 0,
            count: 0
        })
    );
}

#[test]
fn no_floating_header_while_list_is_at_top() {
    let controller = default_controller(Sections::grouped(20, 5));
    assert!(controller.sticky_header().is_none());
    let first = controller.list_child_at(0).unwrap().compound().unwrap();
    assert_eq!(first.header().unwrap().visibility(), Visibility::Visible);
}

#[test]
fn header_floats_once_section_scrolls_under_top() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let changes = record_changes(&mut controller);

    assert!(controller.scroll_by(10.0));
    assert_eq!(controller.sticky_header_id(), Some(0));
    assert_eq!(controller.sticky_header_position(), Some(0));
    assert_eq!(controller.sticky_header_offset(), Some(0.0));

    let header = controller.sticky_header().unwrap();
    assert_eq!(header.frame(), Rect::new(0.0, 0.0, 100.0, HEADER_HEIGHT));
    assert!(header.parent().is_some());
    assert_eq!(*changes.borrow(), vec![("header 0".to_string(), 0, 0)]);

    let in_list = controller.list_child_at(0).unwrap().compound().unwrap();
    assert_eq!(in_list.header().unwrap().visibility(), Visibility::Invisible);
}

#[test]
fn next_section_pushes_floating_header_up() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let offsets = record_offsets(&mut controller);

    controller.scroll_by(200.0);
    assert_eq!(controller.sticky_header_id(), Some(0));
    assert_eq!(controller.sticky_header_offset(), Some(0.0));

    controller.scroll_by(5.0);
    assert_eq!(controller.sticky_header_offset(), Some(-5.0));
    let header = controller.sticky_header().unwrap();
    assert_eq!(header.visual_bounds().top(), -5.0);

    let pusher = controller.list_child_at(1).unwrap();
    assert!(pusher.has_header());
    assert!(header.visual_bounds().top() <= pusher.top() - HEADER_HEIGHT);
    assert_eq!(*offsets.borrow(), vec![0.0, 5.0]);
}

#[test]
fn footer_pushes_floating_header_up() {
    let mut controller = default_controller(Sections::grouped(6, 6));
    controller.set_size(100.0, 60.0);
    let footer = View::new(50.0);
    controller.add_footer_view(footer.clone());
    controller.layout();

    controller.scroll_by(10_000.0);
    assert_eq!(footer.top(), 10.0);
    assert_eq!(controller.sticky_header_id(), Some(0));
    assert_eq!(controller.sticky_header_offset(), Some(-10.0));
}

#[test]
fn section_change_swaps_and_notifies() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let changes = record_changes(&mut controller);

    controller.scroll_by(10.0);
    let first = controller.sticky_header().cloned().unwrap();
    controller.scroll_by(220.0);

    assert_eq!(controller.sticky_header_id(), Some(1));
    assert_eq!(controller.sticky_header_position(), Some(5));
    assert_eq!(
        *changes.borrow(),
        vec![
            ("header 0".to_string(), 0, 0),
            ("header 1".to_string(), 5, 1)
        ]
    );
    // the floating view is rebound rather than reallocated
    assert_eq!(controller.sticky_header(), Some(&first));
}

#[test]
fn recomputing_same_position_is_idempotent() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let changes = record_changes(&mut controller);
    let offsets = record_offsets(&mut controller);
    controller.scroll_by(205.0);

    let header = controller.sticky_header().cloned();
    let offset = controller.sticky_header_offset();
    let (change_count, offset_count) = (changes.borrow().len(), offsets.borrow().len());

    let first_visible = controller.host().fixed_first_visible_position();
    controller.update_or_clear_header(first_visible);
    controller.update_or_clear_header(first_visible);

    assert_eq!(controller.sticky_header().cloned(), header);
    assert_eq!(controller.sticky_header_offset(), offset);
    assert_eq!(changes.borrow().len(), change_count);
    assert_eq!(offsets.borrow().len(), offset_count);
}

#[test]
fn tap_on_floating_header_reports_sticky_click() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let clicks = record_header_clicks(&mut controller);
    let items = Rc::new(RefCell::new(Vec::new()));
    let sink = items.clone();
    controller.set_on_item_click_listener(Some(Box::new(
        move |_: &View, position: usize, _: Option<u64>| sink.borrow_mut().push(position),
    )));
    controller.scroll_by(10.0);

    assert!(controller.dispatch_touch_event(&MotionEvent::down(5.0, 10.0)));
    assert_eq!(controller.touch_owner(), TouchOwner::Header);
    controller.dispatch_touch_event(&MotionEvent::up(5.0, 12.0));

    assert_eq!(*clicks.borrow(), vec![(0, 0, true)]);
    assert!(items.borrow().is_empty());
    assert_eq!(controller.touch_owner(), TouchOwner::Idle);
}

#[test]
fn drag_from_floating_header_transfers_to_list() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let clicks = record_header_clicks(&mut controller);
    controller.scroll_by(10.0);
    let slop = controller.host().touch_slop();

    controller.dispatch_touch_event(&MotionEvent::down(5.0, 10.0));
    controller.dispatch_touch_event(&MotionEvent::moved(7.0, 10.0 + slop + 1.0));
    assert_eq!(controller.touch_owner(), TouchOwner::List);
    assert_eq!(controller.host().touch_down_position(), Some(Point::new(7.0, 10.0)));
    assert!(!controller.sticky_header().unwrap().is_pressed());

    controller.dispatch_touch_event(&MotionEvent::moved(7.0, 60.0));
    controller.dispatch_touch_event(&MotionEvent::up(7.0, 60.0));
    assert!(clicks.borrow().is_empty());
    assert_eq!(controller.first_visible_position(), 0);
    assert!(controller.sticky_header().is_none());
}

#[test]
fn in_list_header_click_is_not_sticky() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let clicks = record_header_clicks(&mut controller);

    let header = controller
        .list_child_at(0)
        .and_then(|child| child.compound())
        .and_then(|compound| compound.header().cloned())
        .unwrap();
    assert!(header.perform_click());
    assert_eq!(*clicks.borrow(), vec![(0, 0, false)]);
}

#[test]
fn tapping_in_list_header_at_top_clicks_header() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    let clicks = record_header_clicks(&mut controller);
    let items = Rc::new(RefCell::new(Vec::new()));
    let sink = items.clone();
    controller.set_on_item_click_listener(Some(Box::new(
        move |_: &View, position: usize, _: Option<u64>| sink.borrow_mut().push(position),
    )));

    controller.dispatch_touch_event(&MotionEvent::down(5.0, 10.0));
    assert_eq!(controller.touch_owner(), TouchOwner::List);
    controller.dispatch_touch_event(&MotionEvent::up(5.0, 10.0));

    assert_eq!(*clicks.borrow(), vec![(0, 0, false)]);
    assert!(items.borrow().is_empty());
}

#[test]
fn data_change_is_applied_on_next_layout() {
    let adapter = Sections::grouped(20, 5);
    let mut controller = default_controller(adapter.clone());
    controller.scroll_by(10.0);
    assert_eq!(controller.sticky_header_id(), Some(0));

    adapter.set_ids(vec![3; 20]);
    adapter.observable().notify_changed();
    assert_eq!(controller.sticky_header_id(), Some(0));

    controller.layout();
    assert_eq!(controller.sticky_header_id(), Some(3));
    assert_eq!(controller.first_visible_position(), 0);
}

#[test]
fn invalidation_clears_header_and_scroll() {
    let adapter = Sections::grouped(20, 5);
    let mut controller = default_controller(adapter.clone());
    controller.scroll_by(100.0);

    adapter.observable().notify_invalidated();
    controller.layout();
    assert!(controller.sticky_header().is_none());
    assert_eq!(controller.first_visible_position(), 0);
}

#[test]
fn sticky_line_follows_top_padding_when_clipping() {
    let config = StickyListConfig {
        padding: EdgeInsets::from_components(0.0, 16.0, 0.0, 0.0),
        ..StickyListConfig::default()
    };
    let mut controller = controller_with(Sections::grouped(20, 5), config);
    assert_eq!(controller.sticky_header_top(), 16.0);
    assert!(controller.sticky_header().is_none());

    controller.scroll_by(10.0);
    assert_eq!(controller.sticky_header_offset(), Some(16.0));

    let mut canvas = Recorder::default();
    controller.dispatch_draw(&mut canvas);
    assert_eq!(
        canvas.clips().last(),
        Some(&Rect::from_ltrb(0.0, 16.0, 100.0, 200.0))
    );
    assert_eq!(
        canvas.views().last(),
        Some(&("header 0".to_string(), Rect::new(0.0, 16.0, 100.0, HEADER_HEIGHT)))
    );
}

#[test]
fn floating_header_is_drawn_after_rows() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    controller.scroll_by(10.0);

    let mut canvas = Recorder::default();
    controller.dispatch_draw(&mut canvas);
    let views = canvas.views();
    assert_eq!(views.iter().filter(|(label, _)| label == "header 0").count(), 1);
    assert_eq!(
        views.last(),
        Some(&("header 0".to_string(), Rect::new(0.0, 0.0, 100.0, HEADER_HEIGHT)))
    );
}

#[test]
fn list_is_clipped_below_header_when_not_drawing_under_it() {
    let config = StickyListConfig {
        drawing_list_under_sticky_header: false,
        ..StickyListConfig::default()
    };
    let mut controller = controller_with(Sections::grouped(20, 5), config);
    controller.scroll_by(205.0);
    assert_eq!(controller.host().top_clipping_length(), HEADER_HEIGHT - 5.0);

    controller.set_drawing_list_under_sticky_header(true);
    assert_eq!(controller.host().top_clipping_length(), 0.0);
}

#[test]
fn selection_leaves_room_for_floating_header() {
    let mut controller = default_controller(Sections::grouped(20, 5));

    controller.set_selection(7).unwrap();
    let row = controller.host().child_for_position(7).unwrap();
    assert_eq!(row.top(), HEADER_HEIGHT);
    assert_eq!(controller.sticky_header_id(), Some(1));

    controller.set_selection(5).unwrap();
    assert_eq!(controller.host().child_for_position(5).unwrap().top(), 0.0);
}

#[test]
fn list_header_views_shift_header_position() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    controller.add_header_view(View::new(30.0));
    controller.layout();

    controller.scroll_by(40.0);
    assert_eq!(controller.first_visible_position(), 1);
    assert_eq!(controller.sticky_header_position(), Some(0));
    assert_eq!(controller.sticky_header_id(), Some(0));
}

#[test]
fn non_sticky_mode_keeps_headers_in_list() {
    let config = StickyListConfig {
        are_headers_sticky: false,
        ..StickyListConfig::default()
    };
    let mut controller = controller_with(Sections::grouped(20, 5), config);
    controller.scroll_by(10.0);
    assert!(controller.sticky_header().is_none());
    let in_list = controller.list_child_at(0).unwrap().compound().unwrap();
    assert_eq!(in_list.header().unwrap().visibility(), Visibility::Visible);

    controller.set_are_headers_sticky(true);
    assert_eq!(controller.sticky_header_id(), Some(0));
}

#[test]
fn restoring_state_with_parent_snapshot_fails() {
    let mut controller = default_controller(Sections::grouped(20, 5));
    controller.scroll_by(70.0);
    let mut state = controller.save_instance_state();
    assert!(state.parent.is_empty());

    let mut other = default_controller(Sections::grouped(20, 5));
    other.restore_instance_state(&state).unwrap();
    other.layout();
    assert_eq!(other.first_visible_position(), 1);

    state.parent = ParentState::new().with_entry("scrollX", "0");
    assert_eq!(
        other.restore_instance_state(&state),
        Err(StickyListError::UnexpectedParentState { entries: 1 })
    );
}
