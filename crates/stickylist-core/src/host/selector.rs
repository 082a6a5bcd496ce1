//! Row highlight ("selector") capability.
//!
//! Hosts that can report and accept the highlight rectangle expose a
//! [`SelectorCapability`]. The recycling host uses it to move the highlight
//! below the header part of a compound row; hosts without it simply skip
//! that adjustment.

use std::fmt;

use crate::geometry::Rect;

pub trait SelectorCapability: fmt::Debug {
    /// Current highlight rectangle, `None` when nothing is highlighted.
    fn selector_rect(&self) -> Option<Rect>;

    /// Absolute list position the highlight belongs to, when the host can tell.
    fn selector_position(&self) -> Option<usize>;

    fn set_selector_rect(&mut self, rect: Rect);

    /// Highlights `position` with the given bounds.
    fn show(&mut self, position: usize, rect: Rect);

    fn hide(&mut self);
}

/// Default highlight implementation used by the recycling host.
#[derive(Clone, Debug)]
pub struct ListSelector {
    rect: Option<Rect>,
    position: Option<usize>,
    reports_position: bool,
}

impl Default for ListSelector {
    fn default() -> Self {
        Self {
            rect: None,
            position: None,
            reports_position: true,
        }
    }
}

impl ListSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector that cannot report which position it highlights; the host
    /// then matches the highlight to a child by its bottom edge.
    pub fn without_position_reporting() -> Self {
        Self {
            reports_position: false,
            ..Self::default()
        }
    }
}

impl SelectorCapability for ListSelector {
    fn selector_rect(&self) -> Option<Rect> {
        self.rect
    }

    fn selector_position(&self) -> Option<usize> {
        if self.reports_position {
            self.position
        } else {
            None
        }
    }

    fn set_selector_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }

    fn show(&mut self, position: usize, rect: Rect) {
        self.position = Some(position);
        self.rect = Some(rect);
    }

    fn hide(&mut self) {
        self.position = None;
        self.rect = None;
    }
}
