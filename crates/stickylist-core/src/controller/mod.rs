//! Sticky header controller.
//!
//! Hosts the [`RecyclingScrollHost`] together with one floating header view.
//! After every layout or scroll the controller works out which section's
//! header floats at the top of the list, swaps the header view when the
//! section changes and pushes it up when the next section's header (or a
//! footer) arrives underneath.

mod listeners;
mod touch;

pub use listeners::{
    HeaderClick, HeaderClickListener, ScrollListener, StickyHeaderChangedListener,
    StickyHeaderOffsetListener,
};
pub use touch::{TouchOwner, TouchRoute, TouchRouter};

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::adapter::{DataSetChange, DataSetObserver, HeaderId, StickyListHeadersAdapter};
use crate::bridge::{AdapterBridge, HeaderClickCallback};
use crate::compound_row::Divider;
use crate::config::StickyListConfig;
use crate::draw::Canvas;
use crate::error::StickyListError;
use crate::geometry::{EdgeInsets, Rect};
use crate::host::{
    ChoiceMode, FixedRole, HostChild, ItemClickListener, RecyclingScrollHost, ScrollDecorations,
    SelectorCapability,
};
use crate::input::MotionEvent;
use crate::state::{ParentState, SavedState};
use crate::view::{View, ViewId, Visibility};
use listeners::{notify_header_click, Listeners};

/// Records adapter changes until the next layout, scroll, touch or draw.
#[derive(Default)]
struct DataSetWatcher {
    pending: Cell<Option<DataSetChange>>,
}

impl DataSetObserver for DataSetWatcher {
    fn on_data_set_change(&self, change: DataSetChange) {
        let merged = match self.pending.get() {
            Some(pending) => pending.merge(change),
            None => change,
        };
        self.pending.set(Some(merged));
    }
}

#[derive(Debug, Clone)]
struct StickyHeader {
    view: View,
    header_id: HeaderId,
    position: usize,
    /// `None` until the offset has been applied for this header.
    offset: Option<f32>,
}

pub struct StickyHeaderController {
    id: ViewId,
    host: RecyclingScrollHost,
    sticky: Option<StickyHeader>,
    /// (position, section id) read by the floating header's click handler.
    anchor: Rc<Cell<Option<(usize, HeaderId)>>>,
    watcher: Rc<DataSetWatcher>,
    observer: Rc<dyn DataSetObserver>,
    are_headers_sticky: bool,
    drawing_list_under_sticky_header: bool,
    divider: Option<Divider>,
    touch: TouchRouter,
    listeners: Listeners,
}

impl Default for StickyHeaderController {
    fn default() -> Self {
        Self::new(StickyListConfig::default())
    }
}

impl StickyHeaderController {
    pub fn new(config: StickyListConfig) -> Self {
        let mut host = RecyclingScrollHost::new();
        host.set_padding(config.padding);
        host.set_clip_to_padding(config.clip_to_padding);
        host.set_choice_mode(config.choice_mode);
        host.set_stack_from_bottom(config.stack_from_bottom);
        host.set_touch_slop(config.touch_slop);
        *host.decorations_mut() = config.decorations;

        let watcher = Rc::new(DataSetWatcher::default());
        let observer: Rc<dyn DataSetObserver> = watcher.clone();
        Self {
            id: ViewId::next(),
            host,
            sticky: None,
            anchor: Rc::new(Cell::new(None)),
            watcher,
            observer,
            are_headers_sticky: config.are_headers_sticky,
            drawing_list_under_sticky_header: config.drawing_list_under_sticky_header,
            divider: config.divider,
            touch: TouchRouter::new(config.touch_slop),
            listeners: Listeners::default(),
        }
    }

    pub fn host(&self) -> &RecyclingScrollHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut RecyclingScrollHost {
        &mut self.host
    }

    /// Installs a new adapter, dropping the floating header and scroll position.
    pub fn set_adapter(&mut self, adapter: Option<Rc<dyn StickyListHeadersAdapter>>) {
        if let Some(bridge) = self.host.bridge() {
            bridge.observable().unregister(&self.observer);
        }
        self.clear_header();
        self.watcher.pending.set(None);

        let bridge = adapter.map(|adapter| {
            let mut bridge = AdapterBridge::new(adapter);
            bridge.set_divider(self.divider);
            bridge.set_header_click_listener(Some(self.in_list_header_click()));
            bridge.observable().register(&self.observer);
            bridge
        });
        log::debug!("adapter set, {} rows", bridge.as_ref().map_or(0, AdapterBridge::count));
        self.host.set_bridge(bridge);
    }

    pub fn adapter(&self) -> Option<&Rc<dyn StickyListHeadersAdapter>> {
        self.host.bridge().map(AdapterBridge::adapter)
    }

    fn in_list_header_click(&self) -> HeaderClickCallback {
        let slot = Rc::clone(&self.listeners.header_click);
        Rc::new(move |header: &View, item_position: usize, header_id: HeaderId| {
            notify_header_click(
                &slot,
                &HeaderClick {
                    header: header.clone(),
                    item_position,
                    header_id,
                    currently_sticky: false,
                },
            );
        })
    }

    fn apply_pending_changes(&mut self) {
        if let Some(change) = self.watcher.pending.take() {
            self.host.on_data_set_change(change);
            self.clear_header();
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.host.set_size(width, height);
    }

    /// Lays out the list and the floating header, then recomputes the sticky header.
    pub fn layout(&mut self) {
        self.apply_pending_changes();
        self.host.layout();
        if let Some(sticky) = &self.sticky {
            self.layout_floating_header(&sticky.view);
        }
        self.drain_scroll_event();
    }

    /// Scrolls the list by `dy`. Returns whether it moved.
    pub fn scroll_by(&mut self, dy: f32) -> bool {
        self.apply_pending_changes();
        let moved = self.host.scroll_by(dy);
        self.drain_scroll_event();
        moved
    }

    fn drain_scroll_event(&mut self) {
        if let Some(event) = self.host.take_scroll_event() {
            if let Some(listener) = self.listeners.scroll.as_mut() {
                listener(&event);
            }
            let first_visible = self.host.fixed_first_visible_position();
            self.update_or_clear_header(first_visible);
            self.update_header_visibilities();
        }
    }

    /// Line at which the floating header rests.
    pub fn sticky_header_top(&self) -> f32 {
        if self.host.clip_to_padding() {
            self.host.padding().top
        } else {
            0.0
        }
    }

    /// Recomputes the floating header for the given first visible position.
    pub fn update_or_clear_header(&mut self, first_visible_position: usize) {
        let count = self.host.adapter_count();
        if count == 0 || !self.are_headers_sticky {
            return;
        }

        let sticky_top = self.sticky_header_top();
        let first_child = self.host.child_at(0);
        let mut header_position =
            first_visible_position as isize - self.host.header_views_count() as isize;
        if first_child.is_some_and(|child| child.bottom() < sticky_top) {
            header_position += 1;
        }

        let first_view_below_top = self.host.first_visible_position() == 0
            && first_child.is_some_and(|child| child.top() >= sticky_top);
        let in_range = (0..count as isize).contains(&header_position);
        if first_child.is_none() || !in_range || first_view_below_top {
            self.clear_header();
            return;
        }
        self.update_header(header_position as usize);
    }

    fn update_header(&mut self, position: usize) {
        let Some(header_id) = self.host.bridge().map(|bridge| bridge.header_id(position)) else {
            return;
        };

        let section_changed = self
            .sticky
            .as_ref()
            .map_or(true, |sticky| sticky.header_id != header_id);
        if section_changed {
            let previous = self.sticky.take().map(|sticky| sticky.view);
            let Some(view) = self
                .host
                .bridge()
                .map(|bridge| bridge.header_view(position, previous.clone()))
            else {
                return;
            };
            if previous.as_ref() != Some(&view) {
                if let Some(previous) = &previous {
                    previous.set_parent(None);
                }
                self.install_floating_header(&view);
            }
            self.layout_floating_header(&view);
            log::debug!("sticky header now section {header_id} at position {position}");
            if let Some(listener) = self.listeners.header_changed.as_mut() {
                listener(&view, position, header_id);
            }
            self.sticky = Some(StickyHeader {
                view,
                header_id,
                position,
                offset: None,
            });
        } else if let Some(sticky) = self.sticky.as_mut() {
            sticky.position = position;
        }
        self.anchor.set(Some((position, header_id)));

        let Some(header_height) = self.sticky.as_ref().map(|sticky| sticky.view.measured_height())
        else {
            return;
        };
        let sticky_top = self.sticky_header_top();
        let mut offset = sticky_top;
        for child in self.host.children() {
            let pushes = child.has_header() || child.role() == Some(FixedRole::Footer);
            if child.top() >= sticky_top && pushes {
                offset = offset.min(child.top() - header_height);
                break;
            }
        }
        self.set_header_offset(offset);

        if !self.drawing_list_under_sticky_header {
            self.host.set_top_clipping_length(header_height + offset);
        }
        self.update_header_visibilities();
    }

    fn install_floating_header(&self, view: &View) {
        view.set_parent(Some(self.id));
        let slot = Rc::clone(&self.listeners.header_click);
        let anchor = Rc::clone(&self.anchor);
        view.set_on_click(Some(Rc::new(move |header: &View| {
            let Some((item_position, header_id)) = anchor.get() else {
                return;
            };
            notify_header_click(
                &slot,
                &HeaderClick {
                    header: header.clone(),
                    item_position,
                    header_id,
                    currently_sticky: true,
                },
            );
        })));
    }

    fn layout_floating_header(&self, view: &View) {
        let padding = self.host.padding();
        let width = (self.host.width() - padding.horizontal_sum()).max(0.0);
        view.layout(Rect::new(padding.left, 0.0, width, view.measured_height()));
    }

    fn set_header_offset(&mut self, offset: f32) {
        let Some(sticky) = self.sticky.as_mut() else {
            return;
        };
        if sticky.offset == Some(offset) {
            return;
        }
        sticky.offset = Some(offset);
        sticky.view.set_translation_y(offset);
        log::trace!("sticky header offset {offset}");
        if let Some(listener) = self.listeners.offset_changed.as_mut() {
            listener(&sticky.view, -offset);
        }
    }

    /// Hides in-list headers scrolled above the sticky line while a header
    /// floats there, shows the rest.
    fn update_header_visibilities(&self) {
        let hide_above = self.sticky.as_ref().map(|_| self.sticky_header_top());
        for child in self.host.children() {
            let Some(header) = child.compound().and_then(|compound| compound.header()) else {
                continue;
            };
            let visibility = match hide_above {
                Some(sticky_top) if child.top() < sticky_top => Visibility::Invisible,
                _ => Visibility::Visible,
            };
            if header.visibility() != visibility {
                header.set_visibility(visibility);
            }
        }
    }

    fn clear_header(&mut self) {
        if let Some(sticky) = self.sticky.take() {
            log::debug!("clearing sticky header for section {}", sticky.header_id);
            sticky.view.set_parent(None);
            self.anchor.set(None);
            self.host.set_top_clipping_length(0.0);
            self.update_header_visibilities();
        }
    }

    /// Draws the list, then the floating header above the rows.
    pub fn dispatch_draw(&mut self, canvas: &mut dyn Canvas) {
        self.apply_pending_changes();
        let floating = self
            .sticky
            .as_ref()
            .map(|sticky| sticky.view.clone())
            .filter(View::is_visible);
        let clip = self.host.clip_to_padding().then(|| {
            Rect::from_ltrb(
                0.0,
                self.host.padding().top,
                self.host.width(),
                self.host.height(),
            )
        });
        self.host.dispatch_draw(canvas, |canvas| {
            let Some(header) = floating else {
                return;
            };
            match clip {
                Some(clip) => {
                    canvas.save();
                    canvas.clip_rect(clip);
                    canvas.draw_view(&header, header.visual_bounds());
                    canvas.restore();
                }
                None => canvas.draw_view(&header, header.visual_bounds()),
            }
        });
    }

    /// Routes a touch event to the floating header or the list.
    pub fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool {
        self.apply_pending_changes();
        let header_bottom = self
            .sticky
            .as_ref()
            .map(|sticky| sticky.view.height() + sticky.offset.unwrap_or(0.0));
        let handled = match self.touch.route(event, header_bottom) {
            TouchRoute::Header(event) => self
                .sticky
                .as_ref()
                .is_some_and(|sticky| sticky.view.dispatch_touch_event(&event)),
            TouchRoute::Transfer {
                header_cancel,
                list_down,
            } => {
                if let (Some(cancel), Some(sticky)) = (header_cancel, &self.sticky) {
                    sticky.view.dispatch_touch_event(&cancel);
                }
                self.host.dispatch_touch_event(&list_down)
            }
            TouchRoute::List(event) => self.host.dispatch_touch_event(&event),
        };
        self.drain_scroll_event();
        handled
    }

    pub fn touch_owner(&self) -> TouchOwner {
        self.touch.owner()
    }

    pub fn sticky_header(&self) -> Option<&View> {
        self.sticky.as_ref().map(|sticky| &sticky.view)
    }

    pub fn sticky_header_id(&self) -> Option<HeaderId> {
        self.sticky.as_ref().map(|sticky| sticky.header_id)
    }

    pub fn sticky_header_position(&self) -> Option<usize> {
        self.sticky.as_ref().map(|sticky| sticky.position)
    }

    pub fn sticky_header_offset(&self) -> Option<f32> {
        self.sticky.as_ref().and_then(|sticky| sticky.offset)
    }

    pub fn set_are_headers_sticky(&mut self, sticky: bool) {
        self.are_headers_sticky = sticky;
        if sticky {
            let first_visible = self.host.fixed_first_visible_position();
            self.update_or_clear_header(first_visible);
        } else {
            self.clear_header();
        }
    }

    pub fn are_headers_sticky(&self) -> bool {
        self.are_headers_sticky
    }

    pub fn set_drawing_list_under_sticky_header(&mut self, drawing: bool) {
        self.drawing_list_under_sticky_header = drawing;
        self.host.set_top_clipping_length(0.0);
    }

    pub fn is_drawing_list_under_sticky_header(&self) -> bool {
        self.drawing_list_under_sticky_header
    }

    /// Sets the divider drawn between rows of a section; rows rebind on the next layout.
    pub fn set_divider(&mut self, divider: Option<Divider>) {
        self.divider = divider;
        if let Some(bridge) = self.host.bridge_mut() {
            bridge.set_divider(divider);
            self.host.on_data_set_change(DataSetChange::Changed);
        }
    }

    pub fn divider(&self) -> Option<Divider> {
        self.divider
    }

    pub fn set_on_header_click_listener(&mut self, listener: Option<HeaderClickListener>) {
        *self.listeners.header_click.borrow_mut() = listener;
    }

    pub fn set_on_sticky_header_changed_listener(
        &mut self,
        listener: Option<StickyHeaderChangedListener>,
    ) {
        self.listeners.header_changed = listener;
    }

    pub fn set_on_sticky_header_offset_changed_listener(
        &mut self,
        listener: Option<StickyHeaderOffsetListener>,
    ) {
        self.listeners.offset_changed = listener;
    }

    pub fn set_on_scroll_listener(&mut self, listener: Option<ScrollListener>) {
        self.listeners.scroll = listener;
    }

    pub fn set_on_item_click_listener(&mut self, listener: Option<ItemClickListener>) {
        self.host.set_on_item_click_listener(listener);
    }

    pub fn set_selection(&mut self, position: usize) -> Result<(), StickyListError> {
        self.set_selection_from_top(position, 0.0)
    }

    /// Scrolls `position` to `y` below the sticky line, leaving room for the
    /// floating header when the row does not start its section.
    pub fn set_selection_from_top(&mut self, position: usize, y: f32) -> Result<(), StickyListError> {
        self.apply_pending_changes();
        let mut y = y + self.header_overlap(position);
        if !self.host.clip_to_padding() {
            y -= self.host.padding().top;
        }
        self.host.set_selection_from_top(position, y)?;
        self.drain_scroll_event();
        Ok(())
    }

    fn header_overlap(&self, position: usize) -> f32 {
        let Some(bridge) = self.host.bridge() else {
            return 0.0;
        };
        let row = position.saturating_sub(self.host.header_views_count());
        if row >= bridge.count() || bridge.is_start_of_section(row) {
            return 0.0;
        }
        bridge.header_view(row, None).measured_height()
    }

    pub fn save_instance_state(&self) -> SavedState {
        SavedState {
            parent: ParentState::new(),
            list: self.host.save_state(),
        }
    }

    /// Restores the list position. Fails when the state carries a parent snapshot.
    pub fn restore_instance_state(&mut self, state: &SavedState) -> Result<(), StickyListError> {
        if !state.parent.is_empty() {
            return Err(StickyListError::UnexpectedParentState {
                entries: state.parent.len(),
            });
        }
        self.clear_header();
        self.host.restore_state(&state.list);
        Ok(())
    }

    pub fn set_padding(&mut self, padding: EdgeInsets) {
        self.host.set_padding(padding);
    }

    pub fn padding(&self) -> EdgeInsets {
        self.host.padding()
    }

    pub fn set_clip_to_padding(&mut self, clip_to_padding: bool) {
        self.host.set_clip_to_padding(clip_to_padding);
    }

    pub fn clip_to_padding(&self) -> bool {
        self.host.clip_to_padding()
    }

    pub fn first_visible_position(&self) -> usize {
        self.host.first_visible_position()
    }

    pub fn last_visible_position(&self) -> Option<usize> {
        self.host.last_visible_position()
    }

    pub fn count(&self) -> usize {
        self.host.count()
    }

    pub fn add_header_view(&mut self, view: View) {
        self.host.add_header_view(view);
    }

    pub fn remove_header_view(&mut self, view: &View) -> bool {
        self.host.remove_header_view(view)
    }

    pub fn header_views_count(&self) -> usize {
        self.host.header_views_count()
    }

    pub fn add_footer_view(&mut self, view: View) {
        self.host.add_footer_view(view);
    }

    pub fn remove_footer_view(&mut self, view: &View) -> bool {
        self.host.remove_footer_view(view)
    }

    pub fn footer_views_count(&self) -> usize {
        self.host.footer_views_count()
    }

    pub fn list_child_count(&self) -> usize {
        self.host.child_count()
    }

    pub fn list_child_at(&self, index: usize) -> Option<&HostChild> {
        self.host.child_at(index)
    }

    pub fn set_choice_mode(&mut self, mode: ChoiceMode) {
        self.host.set_choice_mode(mode);
    }

    pub fn choice_mode(&self) -> ChoiceMode {
        self.host.choice_mode()
    }

    pub fn set_item_checked(&mut self, position: usize, checked: bool) {
        self.host.set_item_checked(position, checked);
    }

    pub fn is_item_checked(&self, position: usize) -> bool {
        self.host.is_item_checked(position)
    }

    pub fn checked_positions(&self) -> Vec<usize> {
        self.host.checked_positions()
    }

    pub fn set_selector(&mut self, selector: Option<Box<dyn SelectorCapability>>) {
        self.host.set_selector(selector);
    }

    pub fn decorations(&self) -> &ScrollDecorations {
        self.host.decorations()
    }

    pub fn decorations_mut(&mut self) -> &mut ScrollDecorations {
        self.host.decorations_mut()
    }

    pub fn set_vertical_scrollbar_enabled(&mut self, enabled: bool) {
        self.host.decorations_mut().vertical_scrollbar = enabled;
    }

    pub fn is_vertical_scrollbar_enabled(&self) -> bool {
        self.host.decorations().vertical_scrollbar
    }

    pub fn set_horizontal_scrollbar_enabled(&mut self, enabled: bool) {
        self.host.decorations_mut().horizontal_scrollbar = enabled;
    }

    pub fn is_horizontal_scrollbar_enabled(&self) -> bool {
        self.host.decorations().horizontal_scrollbar
    }

    pub fn set_fast_scroll_enabled(&mut self, enabled: bool) {
        self.host.decorations_mut().fast_scroll_enabled = enabled;
    }

    pub fn is_fast_scroll_enabled(&self) -> bool {
        self.host.decorations().fast_scroll_enabled
    }

    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.host.set_touch_slop(touch_slop);
        self.touch.set_touch_slop(self.host.touch_slop());
    }

    /// Suppresses list layout, used while row visibility animates.
    pub fn set_block_layout_children(&mut self, block: bool) {
        self.host.set_block_layout_children(block);
    }

    /// Section titles from the adapter's section indexer, if it has one.
    pub fn sections(&self) -> Option<Vec<String>> {
        self.host.bridge().and_then(AdapterBridge::sections)
    }

    pub fn position_for_section(&self, section: usize) -> Option<usize> {
        self.host
            .bridge()
            .and_then(|bridge| bridge.position_for_section(section))
    }

    pub fn section_for_position(&self, position: usize) -> Option<usize> {
        self.host
            .bridge()
            .and_then(|bridge| bridge.section_for_position(position))
    }
}

impl Drop for StickyHeaderController {
    fn drop(&mut self) {
        if let Some(bridge) = self.host.bridge() {
            bridge.observable().unregister(&self.observer);
        }
    }
}

impl fmt::Debug for StickyHeaderController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyHeaderController")
            .field("host", &self.host)
            .field("sticky", &self.sticky)
            .field("are_headers_sticky", &self.are_headers_sticky)
            .field(
                "drawing_list_under_sticky_header",
                &self.drawing_list_under_sticky_header,
            )
            .field("touch", &self.touch)
            .finish()
    }
}
