//! Listener types exposed by the sticky list.

use std::cell::RefCell;
use std::rc::Rc;

use crate::adapter::HeaderId;
use crate::host::ScrollEvent;
use crate::view::View;

/// A click on a section header, in the list or floating.
#[derive(Debug, Clone)]
pub struct HeaderClick {
    pub header: View,
    pub item_position: usize,
    pub header_id: HeaderId,
    /// `true` when the floating header was clicked.
    pub currently_sticky: bool,
}

pub type HeaderClickListener = Rc<dyn Fn(&HeaderClick)>;

/// Receives (header view, anchor position, section id).
pub type StickyHeaderChangedListener = Box<dyn FnMut(&View, usize, HeaderId)>;

/// Receives (header view, upward displacement of the floating header).
pub type StickyHeaderOffsetListener = Box<dyn FnMut(&View, f32)>;

pub type ScrollListener = Box<dyn FnMut(&ScrollEvent)>;

pub(crate) type HeaderClickSlot = Rc<RefCell<Option<HeaderClickListener>>>;

#[derive(Default)]
pub(crate) struct Listeners {
    pub(crate) header_click: HeaderClickSlot,
    pub(crate) header_changed: Option<StickyHeaderChangedListener>,
    pub(crate) offset_changed: Option<StickyHeaderOffsetListener>,
    pub(crate) scroll: Option<ScrollListener>,
}

/// Invokes the listener in `slot`, if any, without holding the borrow.
pub(crate) fn notify_header_click(slot: &HeaderClickSlot, click: &HeaderClick) {
    let listener = slot.borrow().clone();
    if let Some(listener) = listener {
        listener(click);
    }
}
