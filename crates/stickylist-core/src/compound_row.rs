//! Compound row: one data row plus its optional section header or divider.
//!
//! The recycling host sees a compound row as a single item. The header sits
//! above the row; a row that continues a section gets the divider instead.
//! A compound row never carries both.

use crate::draw::Canvas;
use crate::geometry::{Color, Rect};
use crate::view::{View, ViewId};

/// Separator drawn above rows that do not start a section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divider {
    pub color: Color,
    pub height: f32,
}

impl Default for Divider {
    fn default() -> Self {
        Self {
            color: Color::LIGHT_GRAY,
            height: 1.0,
        }
    }
}

/// Capability specialization of a compound row.
///
/// Choice-mode bookkeeping toggles the checked state through the compound
/// row, so a compound must match the capability of the row it wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Plain,
    Checkable,
}

impl RowKind {
    pub fn of(view: &View) -> Self {
        if view.is_checkable() {
            RowKind::Checkable
        } else {
            RowKind::Plain
        }
    }
}

#[derive(Debug)]
pub struct CompoundRowView {
    id: ViewId,
    kind: RowKind,
    row: View,
    header: Option<View>,
    divider: Option<Divider>,
    frame: Rect,
    /// Offset of the row inside the compound (header or divider height).
    item_top: f32,
}

impl CompoundRowView {
    pub(crate) fn new(row: View) -> Self {
        let id = ViewId::next();
        row.set_parent(Some(id));
        Self {
            id,
            kind: RowKind::of(&row),
            row,
            header: None,
            divider: None,
            frame: Rect::default(),
            item_top: 0.0,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn row(&self) -> &View {
        &self.row
    }

    pub fn header(&self) -> Option<&View> {
        self.header.as_ref()
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn divider(&self) -> Option<Divider> {
        self.divider
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn top(&self) -> f32 {
        self.frame.top()
    }

    pub fn bottom(&self) -> f32 {
        self.frame.bottom()
    }

    pub fn height(&self) -> f32 {
        self.frame.height
    }

    pub fn item_top(&self) -> f32 {
        self.item_top
    }

    /// Checked state of the wrapped row, for checkable compounds.
    pub fn is_checked(&self) -> bool {
        self.kind == RowKind::Checkable && self.row.is_checked()
    }

    pub(crate) fn set_checked(&self, checked: bool) {
        if self.kind == RowKind::Checkable {
            self.row.set_checked(checked);
        }
    }

    /// Detaches and returns the header, leaving the compound header-less.
    pub(crate) fn take_header(&mut self) -> Option<View> {
        let header = self.header.take();
        if let Some(header) = &header {
            header.set_parent(None);
        }
        header
    }

    /// Rebinds the compound with a row, an optional header and a divider.
    ///
    /// The divider is dropped when a header is present.
    pub(crate) fn update(&mut self, row: View, header: Option<View>, divider: Option<Divider>) {
        if self.row != row {
            if self.row.parent() == Some(self.id) {
                self.row.set_parent(None);
            }
            row.set_parent(Some(self.id));
            self.row = row;
        }

        if self.header != header {
            if let Some(old) = self.header.take() {
                if old.parent() == Some(self.id) {
                    old.set_parent(None);
                }
            }
            if let Some(new) = &header {
                new.set_parent(Some(self.id));
            }
            self.header = header;
        }

        self.divider = if self.header.is_some() { None } else { divider };
    }

    /// Height of the header, or of the divider when the row is shown.
    fn leading_height(&self) -> f32 {
        match (&self.header, &self.divider) {
            (Some(header), _) => header.measured_height(),
            (None, Some(divider)) if !self.row.is_gone() => divider.height,
            _ => 0.0,
        }
    }

    fn row_height(&self) -> f32 {
        if self.row.is_gone() {
            0.0
        } else {
            self.row.measured_height()
        }
    }

    /// Combined height of the compound for the current binding.
    pub fn measure(&self) -> f32 {
        self.leading_height() + self.row_height()
    }

    /// Places the compound at `top`, header first, row below.
    pub(crate) fn layout(&mut self, left: f32, top: f32, width: f32) {
        let leading = self.leading_height();
        if let Some(header) = &self.header {
            header.layout(Rect::new(left, top, width, leading));
        }
        self.item_top = leading;
        let row_height = self.row_height();
        self.row
            .layout(Rect::new(left, top + leading, width, row_height));
        self.frame = Rect::new(left, top, width, leading + row_height);
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(header) = &self.header {
            if header.is_visible() {
                canvas.draw_view(header, header.frame());
            }
        } else if let Some(divider) = &self.divider {
            if !self.row.is_gone() {
                let bounds = Rect::new(self.frame.x, self.frame.y, self.frame.width, divider.height);
                canvas.draw_divider(divider.color, bounds);
            }
        }
        if self.row.is_visible() {
            canvas.draw_view(&self.row, self.row.frame());
        }
    }
}
