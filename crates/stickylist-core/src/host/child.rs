//! Children laid out by the recycling host.

use crate::compound_row::CompoundRowView;
use crate::draw::Canvas;
use crate::geometry::Rect;
use crate::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixedRole {
    /// List header view placed before the adapter rows.
    Header,
    /// Footer view placed after the adapter rows.
    Footer,
}

/// A laid out child of the host, keyed by absolute list position.
#[derive(Debug)]
pub enum HostChild {
    Row {
        position: usize,
        view_type: usize,
        compound: CompoundRowView,
    },
    Fixed {
        position: usize,
        view: View,
        role: FixedRole,
    },
}

impl HostChild {
    pub fn position(&self) -> usize {
        match self {
            HostChild::Row { position, .. } | HostChild::Fixed { position, .. } => *position,
        }
    }

    pub fn compound(&self) -> Option<&CompoundRowView> {
        match self {
            HostChild::Row { compound, .. } => Some(compound),
            HostChild::Fixed { .. } => None,
        }
    }

    /// Row view for data rows; the view itself for list headers and footers.
    pub fn view(&self) -> &View {
        match self {
            HostChild::Row { compound, .. } => compound.row(),
            HostChild::Fixed { view, .. } => view,
        }
    }

    /// Whether this child embeds a section header.
    pub fn has_header(&self) -> bool {
        self.compound().is_some_and(CompoundRowView::has_header)
    }

    pub fn role(&self) -> Option<FixedRole> {
        match self {
            HostChild::Row { .. } => None,
            HostChild::Fixed { role, .. } => Some(*role),
        }
    }

    pub fn frame(&self) -> Rect {
        match self {
            HostChild::Row { compound, .. } => compound.frame(),
            HostChild::Fixed { view, .. } => view.frame(),
        }
    }

    pub fn top(&self) -> f32 {
        self.frame().top()
    }

    pub fn bottom(&self) -> f32 {
        self.frame().bottom()
    }

    pub fn height(&self) -> f32 {
        self.frame().height
    }

    pub(crate) fn measure(&self) -> f32 {
        match self {
            HostChild::Row { compound, .. } => compound.measure(),
            HostChild::Fixed { view, .. } => fixed_height(view),
        }
    }

    pub(crate) fn layout(&mut self, left: f32, top: f32, width: f32) {
        match self {
            HostChild::Row { compound, .. } => compound.layout(left, top, width),
            HostChild::Fixed { view, .. } => {
                view.layout(Rect::new(left, top, width, fixed_height(view)));
            }
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            HostChild::Row { compound, .. } => compound.draw(canvas),
            HostChild::Fixed { view, .. } => {
                if view.is_visible() {
                    canvas.draw_view(view, view.frame());
                }
            }
        }
    }
}

pub(crate) fn fixed_height(view: &View) -> f32 {
    if view.is_gone() {
        0.0
    } else {
        view.measured_height()
    }
}
