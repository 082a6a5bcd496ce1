//! Virtualized scrolling list hosting compound rows.
//!
//! Positions are absolute: list header views come first, then the adapter
//! rows, then footer views. Only children intersecting the viewport are laid
//! out. Compound rows leaving the viewport go to a scrap pool keyed by view
//! type and are rebound through the [`AdapterBridge`] when needed again.

mod child;
mod decorations;
mod selector;

pub use child::{FixedRole, HostChild};
pub use decorations::{ChoiceMode, ScrollBarStyle, ScrollDecorations};
pub use selector::{ListSelector, SelectorCapability};

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::adapter::DataSetChange;
use crate::bridge::AdapterBridge;
use crate::compound_row::CompoundRowView;
use crate::draw::Canvas;
use crate::error::StickyListError;
use crate::geometry::{EdgeInsets, Point, Rect};
use crate::gesture_constants::TOUCH_SLOP;
use crate::input::{MotionAction, MotionEvent};
use crate::view::{View, ViewId};
use child::fixed_height;

/// Upper bound on children laid out in a single pass.
const MAX_LAID_OUT_CHILDREN: usize = 4096;

/// Reported after every layout pass and after scrolls that moved the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollEvent {
    pub first_visible_position: usize,
    pub visible_count: usize,
    pub total_count: usize,
}

/// Scroll position, selection and checked rows of the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostSavedState {
    pub first_position: usize,
    /// Top of the first visible child relative to the top padding.
    pub first_top_offset: f32,
    pub selected_position: Option<usize>,
    pub checked_positions: Vec<usize>,
}

/// Receives (row view, absolute position, item id). The id is `None` for
/// list header and footer views.
pub type ItemClickListener = Box<dyn FnMut(&View, usize, Option<u64>)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    ListHeader(usize),
    Row(usize),
    Footer(usize),
}

#[derive(Debug, Default)]
struct ListGesture {
    down: Option<Point>,
    last_y: f32,
    dragging: bool,
    pressed: Option<usize>,
    /// Visible section header of a compound row taking the tap.
    pressed_header: Option<View>,
}

pub struct RecyclingScrollHost {
    bridge: Option<AdapterBridge>,
    list_headers: Vec<View>,
    footers: IndexMap<ViewId, View>,
    children: SmallVec<[HostChild; 16]>,
    scrap: FxHashMap<usize, Vec<CompoundRowView>>,
    first_position: usize,
    first_top: f32,
    width: f32,
    height: f32,
    padding: EdgeInsets,
    clip_to_padding: bool,
    stack_from_bottom: bool,
    stack_pending: bool,
    layout_blocked: bool,
    data_changed: bool,
    top_clipping_length: f32,
    selector: Option<Box<dyn SelectorCapability>>,
    selected_position: Option<usize>,
    decorations: ScrollDecorations,
    choice_mode: ChoiceMode,
    checked: BTreeSet<usize>,
    pending_scroll: Option<ScrollEvent>,
    item_click_listener: Option<ItemClickListener>,
    gesture: ListGesture,
    touch_slop: f32,
}

impl Default for RecyclingScrollHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecyclingScrollHost {
    pub fn new() -> Self {
        Self {
            bridge: None,
            list_headers: Vec::new(),
            footers: IndexMap::new(),
            children: SmallVec::new(),
            scrap: FxHashMap::default(),
            first_position: 0,
            first_top: 0.0,
            width: 0.0,
            height: 0.0,
            padding: EdgeInsets::default(),
            clip_to_padding: true,
            stack_from_bottom: false,
            stack_pending: false,
            layout_blocked: false,
            data_changed: false,
            top_clipping_length: 0.0,
            selector: Some(Box::new(ListSelector::new())),
            selected_position: None,
            decorations: ScrollDecorations::default(),
            choice_mode: ChoiceMode::None,
            checked: BTreeSet::new(),
            pending_scroll: None,
            item_click_listener: None,
            gesture: ListGesture::default(),
            touch_slop: TOUCH_SLOP,
        }
    }

    /// Replaces the adapter bridge and resets scroll position and selection.
    pub fn set_bridge(&mut self, bridge: Option<AdapterBridge>) {
        self.children.clear();
        self.scrap.clear();
        self.checked.clear();
        self.selected_position = None;
        self.hide_selector();
        self.first_position = 0;
        self.first_top = self.padding.top;
        self.data_changed = false;
        self.stack_pending = self.stack_from_bottom;
        self.bridge = bridge;
    }

    pub fn bridge(&self) -> Option<&AdapterBridge> {
        self.bridge.as_ref()
    }

    pub fn bridge_mut(&mut self) -> Option<&mut AdapterBridge> {
        self.bridge.as_mut()
    }

    pub fn adapter_count(&self) -> usize {
        self.bridge.as_ref().map_or(0, AdapterBridge::count)
    }

    /// Total positions: list headers, adapter rows and footers.
    pub fn count(&self) -> usize {
        self.list_headers.len() + self.adapter_count() + self.footers.len()
    }

    fn slot(&self, position: usize) -> Option<Slot> {
        let headers = self.list_headers.len();
        if position < headers {
            return Some(Slot::ListHeader(position));
        }
        let row = position - headers;
        let rows = self.adapter_count();
        if row < rows {
            return Some(Slot::Row(row));
        }
        let footer = row - rows;
        (footer < self.footers.len()).then_some(Slot::Footer(footer))
    }

    fn fixed_view(&self, slot: Slot) -> Option<(View, FixedRole)> {
        match slot {
            Slot::ListHeader(index) => self
                .list_headers
                .get(index)
                .map(|view| (view.clone(), FixedRole::Header)),
            Slot::Footer(index) => self
                .footers
                .get_index(index)
                .map(|(_, view)| (view.clone(), FixedRole::Footer)),
            Slot::Row(_) => None,
        }
    }

    pub fn add_header_view(&mut self, view: View) {
        if !self.list_headers.contains(&view) {
            self.list_headers.push(view);
            self.data_changed = true;
        }
    }

    pub fn remove_header_view(&mut self, view: &View) -> bool {
        let before = self.list_headers.len();
        self.list_headers.retain(|header| header != view);
        let removed = self.list_headers.len() != before;
        self.data_changed |= removed;
        removed
    }

    pub fn header_views_count(&self) -> usize {
        self.list_headers.len()
    }

    pub fn add_footer_view(&mut self, view: View) {
        if self.footers.insert(view.id(), view).is_none() {
            self.data_changed = true;
        }
    }

    pub fn remove_footer_view(&mut self, view: &View) -> bool {
        let removed = self.footers.shift_remove(&view.id()).is_some();
        self.data_changed |= removed;
        removed
    }

    pub fn contains_footer_view(&self, view: &View) -> bool {
        self.footers.contains_key(&view.id())
    }

    pub fn footer_views_count(&self) -> usize {
        self.footers.len()
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Updates the padding, keeping the content where it was relative to it.
    pub fn set_padding(&mut self, padding: EdgeInsets) {
        self.first_top += padding.top - self.padding.top;
        self.padding = padding;
    }

    pub fn padding(&self) -> EdgeInsets {
        self.padding
    }

    pub fn set_clip_to_padding(&mut self, clip_to_padding: bool) {
        self.clip_to_padding = clip_to_padding;
    }

    pub fn clip_to_padding(&self) -> bool {
        self.clip_to_padding
    }

    /// Starts the list scrolled to its end on the next layout.
    pub fn set_stack_from_bottom(&mut self, stack_from_bottom: bool) {
        self.stack_from_bottom = stack_from_bottom;
        self.stack_pending = stack_from_bottom;
    }

    pub fn is_stack_from_bottom(&self) -> bool {
        self.stack_from_bottom
    }

    pub fn decorations(&self) -> &ScrollDecorations {
        &self.decorations
    }

    pub fn decorations_mut(&mut self) -> &mut ScrollDecorations {
        &mut self.decorations
    }

    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.touch_slop = touch_slop.max(0.0);
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    fn visible_top(&self) -> f32 {
        if self.clip_to_padding {
            self.padding.top
        } else {
            0.0
        }
    }

    fn visible_bottom(&self) -> f32 {
        if self.clip_to_padding {
            self.height - self.padding.bottom
        } else {
            self.height
        }
    }

    fn content_bottom(&self) -> f32 {
        self.height - self.padding.bottom
    }

    fn content_width(&self) -> f32 {
        (self.width - self.padding.horizontal_sum()).max(0.0)
    }

    /// Suppresses [`layout`](Self::layout) until unblocked.
    pub fn set_block_layout_children(&mut self, block: bool) {
        self.layout_blocked = block;
    }

    pub fn is_layout_blocked(&self) -> bool {
        self.layout_blocked
    }

    /// Top edge (in container coordinates) above which children are not drawn.
    /// Zero disables the extra clipping.
    pub fn set_top_clipping_length(&mut self, length: f32) {
        self.top_clipping_length = length;
    }

    pub fn top_clipping_length(&self) -> f32 {
        self.top_clipping_length
    }

    /// Refills the viewport and queues a [`ScrollEvent`]. Skipped while blocked.
    pub fn layout(&mut self) {
        if self.layout_blocked {
            log::trace!("layout blocked, keeping {} children", self.children.len());
            return;
        }
        if self.stack_pending {
            self.stack_pending = false;
            self.anchor_to_end();
        }
        self.layout_children();
        self.queue_scroll_event();
    }

    /// Scrolls the content up by `dy` (down for negative values).
    ///
    /// Returns whether the list moved; a [`ScrollEvent`] is queued when it did.
    pub fn scroll_by(&mut self, dy: f32) -> bool {
        if dy == 0.0 || self.children.is_empty() {
            return false;
        }
        let before = (self.first_position, self.first_top);
        self.first_top -= dy;
        self.layout_children();
        let moved = before != (self.first_position, self.first_top);
        if moved {
            self.queue_scroll_event();
        }
        moved
    }

    fn anchor_to_end(&mut self) {
        let total = self.count();
        if total == 0 {
            return;
        }
        let last = total - 1;
        let height = self.measure_position(last);
        self.first_position = last;
        self.first_top = self.content_bottom() - height;
    }

    fn layout_children(&mut self) {
        self.normalize_anchor();
        self.fill();
        if let Some(shift) = self.end_gap() {
            self.first_top += shift;
            self.normalize_anchor();
            self.fill();
        }
        self.sync_checked_states();
    }

    /// Moves the anchor so that `first_position` is the first position
    /// intersecting the visible region, and clamps at the start of the list.
    fn normalize_anchor(&mut self) {
        let total = self.count();
        if total == 0 {
            self.first_position = 0;
            self.first_top = self.padding.top;
            return;
        }
        self.first_position = self.first_position.min(total - 1);
        let visible_top = self.visible_top();

        while self.first_position + 1 < total {
            let height = self.measure_position(self.first_position);
            if self.first_top + height > visible_top {
                break;
            }
            self.first_top += height;
            self.first_position += 1;
        }
        while self.first_top > visible_top && self.first_position > 0 {
            self.first_position -= 1;
            let height = self.measure_position(self.first_position);
            self.first_top -= height;
        }
        if self.first_position == 0 && self.first_top > self.padding.top {
            self.first_top = self.padding.top;
        }
    }

    /// Distance the content must move down so the last position ends at the
    /// bottom padding, limited so the first position stays at the top padding.
    fn end_gap(&self) -> Option<f32> {
        let first = self.children.first()?;
        let last = self.children.last()?;
        if last.position() + 1 != self.count() {
            return None;
        }
        let gap = self.content_bottom() - last.bottom();
        let room = if first.position() == 0 {
            self.padding.top - first.top()
        } else {
            f32::INFINITY
        };
        let shift = gap.min(room);
        (shift > 0.0).then_some(shift)
    }

    fn fill(&mut self) {
        let mut previous: FxHashMap<usize, HostChild> = self
            .children
            .drain(..)
            .map(|child| (child.position(), child))
            .collect();
        let total = self.count();
        let bottom_limit = self.visible_bottom();
        let left = self.padding.left;
        let width = self.content_width();

        let mut children: SmallVec<[HostChild; 16]> = SmallVec::new();
        let mut top = self.first_top;
        let mut position = self.first_position;
        while position < total && top < bottom_limit {
            if children.len() == MAX_LAID_OUT_CHILDREN {
                log::warn!(
                    "stopped layout after {MAX_LAID_OUT_CHILDREN} children at position {position}"
                );
                break;
            }
            let Some(mut child) = self.obtain_child(position, &mut previous) else {
                break;
            };
            child.layout(left, top, width);
            top = child.bottom();
            children.push(child);
            position += 1;
        }

        for (_, child) in previous {
            self.recycle(child);
        }
        self.children = children;
        self.data_changed = false;
    }

    fn recycle(&mut self, child: HostChild) {
        if let HostChild::Row {
            view_type,
            compound,
            ..
        } = child
        {
            self.scrap.entry(view_type).or_default().push(compound);
        }
    }

    fn obtain_child(
        &mut self,
        position: usize,
        previous: &mut FxHashMap<usize, HostChild>,
    ) -> Option<HostChild> {
        let slot = self.slot(position)?;
        let reusable = previous.remove(&position);
        let row = match slot {
            Slot::Row(row) => row,
            Slot::ListHeader(_) | Slot::Footer(_) => {
                if let Some(old) = reusable {
                    self.recycle(old);
                }
                let (view, role) = self.fixed_view(slot)?;
                return Some(HostChild::Fixed {
                    position,
                    view,
                    role,
                });
            }
        };

        let bridge = self.bridge.as_mut()?;
        let view_type = bridge.item_view_type(row);
        let mut recycled = None;
        if let Some(HostChild::Row {
            view_type: bound_type,
            compound,
            ..
        }) = reusable
        {
            if !self.data_changed {
                return Some(HostChild::Row {
                    position,
                    view_type: bound_type,
                    compound,
                });
            }
            if bound_type == view_type {
                recycled = Some(compound);
            } else {
                self.scrap.entry(bound_type).or_default().push(compound);
            }
        }
        let recycled = recycled.or_else(|| self.scrap.get_mut(&view_type).and_then(Vec::pop));
        let compound = bridge.bind_row(row, recycled);
        Some(HostChild::Row {
            position,
            view_type,
            compound,
        })
    }

    /// Height of `position`, binding it through the scrap pool when it is not
    /// laid out.
    fn measure_position(&mut self, position: usize) -> f32 {
        if !self.data_changed {
            if let Some(child) = self.child_for_position(position) {
                return child.measure();
            }
        }
        match self.slot(position) {
            None => 0.0,
            Some(Slot::Row(row)) => {
                let Some(bridge) = self.bridge.as_mut() else {
                    return 0.0;
                };
                let view_type = bridge.item_view_type(row);
                let recycled = self.scrap.get_mut(&view_type).and_then(Vec::pop);
                let compound = bridge.bind_row(row, recycled);
                let height = compound.measure();
                self.scrap.entry(view_type).or_default().push(compound);
                height
            }
            Some(slot) => self
                .fixed_view(slot)
                .map_or(0.0, |(view, _)| fixed_height(&view)),
        }
    }

    fn queue_scroll_event(&mut self) {
        self.pending_scroll = Some(ScrollEvent {
            first_visible_position: self.first_visible_position(),
            visible_count: self.children.len(),
            total_count: self.count(),
        });
    }

    /// Drains the scroll event queued by the last layout or scroll.
    pub fn take_scroll_event(&mut self) -> Option<ScrollEvent> {
        self.pending_scroll.take()
    }

    pub fn first_visible_position(&self) -> usize {
        self.children
            .first()
            .map_or(self.first_position, HostChild::position)
    }

    /// First visible position corrected for top padding.
    ///
    /// Children are only laid out from the first position intersecting the
    /// visible region, so this is the position of the first child.
    pub fn fixed_first_visible_position(&self) -> usize {
        self.first_visible_position()
    }

    pub fn last_visible_position(&self) -> Option<usize> {
        self.children.last().map(HostChild::position)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_at(&self, index: usize) -> Option<&HostChild> {
        self.children.get(index)
    }

    pub fn children(&self) -> &[HostChild] {
        &self.children
    }

    pub fn child_for_position(&self, position: usize) -> Option<&HostChild> {
        let first = self.children.first()?.position();
        self.children.get(position.checked_sub(first)?)
    }

    fn child_index_at(&self, y: f32) -> Option<usize> {
        self.children
            .iter()
            .position(|child| y >= child.top() && y < child.bottom())
    }

    /// Number of compound rows parked in the scrap pool.
    pub fn scrap_count(&self) -> usize {
        self.scrap.values().map(Vec::len).sum()
    }

    /// Compound rows parked in the scrap pool.
    pub fn scrap_rows(&self) -> impl Iterator<Item = &CompoundRowView> {
        self.scrap.values().flatten()
    }

    /// Scrolls so that `position` sits `y` below the top padding.
    pub fn set_selection_from_top(&mut self, position: usize, y: f32) -> Result<(), StickyListError> {
        let count = self.count();
        if position >= count {
            return Err(StickyListError::PositionOutOfRange { position, count });
        }
        self.first_position = position;
        self.first_top = self.padding.top + y;
        self.selected_position = Some(position);
        self.stack_pending = false;
        if !self.layout_blocked {
            self.layout_children();
            self.queue_scroll_event();
        }
        Ok(())
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selected_position
    }

    /// Replaces the row highlight capability. `None` disables highlighting.
    pub fn set_selector(&mut self, selector: Option<Box<dyn SelectorCapability>>) {
        if selector.is_none() {
            log::warn!("row highlight capability unavailable, highlights will not skip section headers");
        }
        self.selector = selector;
    }

    pub fn selector(&self) -> Option<&dyn SelectorCapability> {
        self.selector.as_deref()
    }

    fn hide_selector(&mut self) {
        if let Some(selector) = self.selector.as_mut() {
            selector.hide();
        }
    }

    /// Moves the highlight below the header part of the highlighted compound row.
    fn position_selector_rect(&mut self) {
        let Some(selector) = self.selector.as_mut() else {
            return;
        };
        let Some(rect) = selector.selector_rect().filter(|rect| !rect.is_empty()) else {
            return;
        };
        let position = selector.selector_position().or_else(|| {
            self.children
                .iter()
                .find(|child| child.bottom() == rect.bottom())
                .map(HostChild::position)
        });
        let Some(position) = position else {
            log::debug!("highlight position unavailable, leaving highlight at {rect:?}");
            return;
        };
        let first = self.children.first().map_or(0, HostChild::position);
        let compound = position
            .checked_sub(first)
            .and_then(|index| self.children.get(index))
            .and_then(HostChild::compound);
        if let Some(compound) = compound {
            selector.set_selector_rect(rect.with_top(compound.top() + compound.item_top()));
        }
    }

    /// Draws the children, then hands the canvas to `after_children`.
    pub fn dispatch_draw(
        &mut self,
        canvas: &mut dyn Canvas,
        after_children: impl FnOnce(&mut dyn Canvas),
    ) {
        self.position_selector_rect();

        let mut clip = if self.clip_to_padding {
            Rect::from_ltrb(
                self.padding.left,
                self.padding.top,
                self.width - self.padding.right,
                self.height - self.padding.bottom,
            )
        } else {
            Rect::new(0.0, 0.0, self.width, self.height)
        };
        if self.top_clipping_length != 0.0 {
            clip = clip.with_top(self.top_clipping_length);
        }

        let highlight = self
            .selector
            .as_ref()
            .and_then(|selector| selector.selector_rect())
            .filter(|rect| !rect.is_empty());
        let on_top = self.decorations.draw_selector_on_top;

        canvas.save();
        canvas.clip_rect(clip);
        if let (Some(bounds), false) = (highlight, on_top) {
            canvas.draw_selector(bounds);
        }
        for child in &self.children {
            child.draw(canvas);
        }
        if let (Some(bounds), true) = (highlight, on_top) {
            canvas.draw_selector(bounds);
        }
        canvas.restore();

        after_children(canvas);
    }

    /// Position of the down event of the gesture in progress.
    pub fn touch_down_position(&self) -> Option<Point> {
        self.gesture.down
    }

    fn is_position_enabled(&self, position: usize) -> bool {
        match self.slot(position) {
            Some(Slot::Row(row)) => self
                .bridge
                .as_ref()
                .is_some_and(|bridge| bridge.is_enabled(row)),
            Some(Slot::ListHeader(_) | Slot::Footer(_)) => true,
            None => false,
        }
    }

    /// Section header of `child` under `y`, when it is shown and clickable.
    fn header_under(child: &HostChild, y: f32) -> Option<View> {
        let compound = child.compound()?;
        let header = compound.header()?;
        let over_header = y < compound.top() + compound.item_top();
        (over_header && header.is_visible() && header.is_clickable()).then(|| header.clone())
    }

    /// Drag scrolling beyond the touch slop; taps click the row under the
    /// finger, or the section header when they land on one.
    pub fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool {
        match event.action {
            MotionAction::Down => {
                self.gesture = ListGesture {
                    down: Some(event.position),
                    last_y: event.y(),
                    ..ListGesture::default()
                };
                let Some(index) = self.child_index_at(event.y()) else {
                    return true;
                };
                let child = &self.children[index];
                if let Some(header) = Self::header_under(child, event.y()) {
                    header.dispatch_touch_event(event);
                    self.gesture.pressed_header = Some(header);
                    return true;
                }
                let (position, frame) = (child.position(), child.frame());
                if self.is_position_enabled(position) {
                    self.gesture.pressed = Some(position);
                    if let Some(selector) = self.selector.as_mut() {
                        selector.show(position, frame);
                    }
                }
                true
            }
            MotionAction::Move => {
                let Some(down) = self.gesture.down else {
                    return false;
                };
                if !self.gesture.dragging && (event.y() - down.y).abs() > self.touch_slop {
                    self.gesture.dragging = true;
                    self.gesture.pressed = None;
                    if let Some(header) = self.gesture.pressed_header.take() {
                        header.dispatch_touch_event(&event.with_action(MotionAction::Cancel));
                    }
                    self.hide_selector();
                }
                if self.gesture.dragging {
                    let dy = self.gesture.last_y - event.y();
                    self.gesture.last_y = event.y();
                    self.scroll_by(dy);
                }
                true
            }
            MotionAction::Up => {
                if self.gesture.down.is_none() {
                    return false;
                }
                let gesture = std::mem::take(&mut self.gesture);
                self.hide_selector();
                if let Some(header) = gesture.pressed_header {
                    header.dispatch_touch_event(event);
                } else if let (false, Some(position)) = (gesture.dragging, gesture.pressed) {
                    self.perform_item_click(position);
                }
                true
            }
            MotionAction::Cancel => {
                let gesture = std::mem::take(&mut self.gesture);
                let active = gesture.down.is_some();
                if let Some(header) = gesture.pressed_header {
                    header.dispatch_touch_event(event);
                }
                self.hide_selector();
                active
            }
        }
    }

    pub fn set_on_item_click_listener(&mut self, listener: Option<ItemClickListener>) {
        self.item_click_listener = listener;
    }

    /// Clicks the child at `position`, reporting the row view rather than its
    /// compound wrapper. Returns whether a listener or choice mode handled it.
    pub fn perform_item_click(&mut self, position: usize) -> bool {
        let Some(child) = self.child_for_position(position) else {
            return false;
        };
        let view = child.view().clone();
        let is_row = child.compound().is_some();
        let id = match self.slot(position) {
            Some(Slot::Row(row)) => self.bridge.as_ref().map(|bridge| bridge.item_id(row)),
            _ => None,
        };

        let mut handled = is_row && self.apply_choice(position);
        if let Some(listener) = self.item_click_listener.as_mut() {
            listener(&view, position, id);
            handled = true;
        }
        handled
    }

    pub fn set_choice_mode(&mut self, mode: ChoiceMode) {
        self.choice_mode = mode;
        if mode == ChoiceMode::None {
            self.checked.clear();
        }
    }

    pub fn choice_mode(&self) -> ChoiceMode {
        self.choice_mode
    }

    pub fn is_item_checked(&self, position: usize) -> bool {
        self.checked.contains(&position)
    }

    pub fn checked_positions(&self) -> Vec<usize> {
        self.checked.iter().copied().collect()
    }

    pub fn set_item_checked(&mut self, position: usize, checked: bool) {
        match self.choice_mode {
            ChoiceMode::None => return,
            ChoiceMode::Single if checked => self.checked.clear(),
            _ => {}
        }
        if checked {
            self.checked.insert(position);
        } else {
            self.checked.remove(&position);
        }
        self.sync_checked_states();
    }

    fn apply_choice(&mut self, position: usize) -> bool {
        match self.choice_mode {
            ChoiceMode::None => return false,
            ChoiceMode::Single => {
                self.checked.clear();
                self.checked.insert(position);
            }
            ChoiceMode::Multiple => {
                if !self.checked.remove(&position) {
                    self.checked.insert(position);
                }
            }
        }
        self.sync_checked_states();
        true
    }

    fn sync_checked_states(&self) {
        if self.choice_mode == ChoiceMode::None {
            return;
        }
        for child in &self.children {
            if let Some(compound) = child.compound() {
                compound.set_checked(self.checked.contains(&child.position()));
            }
        }
    }

    /// Applies an adapter change: rows are rebound on the next layout. An
    /// invalidation also drops recycled rows, checked state and scroll position.
    pub fn on_data_set_change(&mut self, change: DataSetChange) {
        log::debug!(
            "data set {change:?}, {} rows, {} children",
            self.adapter_count(),
            self.children.len()
        );
        self.data_changed = true;
        if change == DataSetChange::Invalidated {
            self.children.clear();
            self.scrap.clear();
            self.checked.clear();
            self.selected_position = None;
            self.hide_selector();
            self.first_position = 0;
            self.first_top = self.padding.top;
        }
    }

    pub fn save_state(&self) -> HostSavedState {
        let first = self.children.first();
        HostSavedState {
            first_position: first.map_or(self.first_position, HostChild::position),
            first_top_offset: first.map_or(self.first_top, HostChild::top) - self.padding.top,
            selected_position: self.selected_position,
            checked_positions: self.checked_positions(),
        }
    }

    /// Restores a saved position; it takes effect on the next layout.
    pub fn restore_state(&mut self, state: &HostSavedState) {
        self.first_position = state.first_position;
        self.first_top = self.padding.top + state.first_top_offset;
        self.selected_position = state.selected_position;
        self.checked = state.checked_positions.iter().copied().collect();
        self.stack_pending = false;
        self.data_changed = true;
    }
}

impl fmt::Debug for RecyclingScrollHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclingScrollHost")
            .field("bridge", &self.bridge)
            .field("list_headers", &self.list_headers.len())
            .field("footers", &self.footers.len())
            .field("children", &self.children.len())
            .field("scrap", &self.scrap_count())
            .field("first_position", &self.first_position)
            .field("first_top", &self.first_top)
            .field("padding", &self.padding)
            .field("clip_to_padding", &self.clip_to_padding)
            .field("layout_blocked", &self.layout_blocked)
            .finish()
    }
}
