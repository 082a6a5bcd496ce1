use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::adapter::{DataSetObservable, HeaderId, StickyListHeadersAdapter};
use crate::draw::Canvas;
use crate::geometry::{Color, Rect};
use crate::view::View;

pub const ROW_HEIGHT: f32 = 40.0;
pub const HEADER_HEIGHT: f32 = 20.0;

/// Adapter with explicit section ids per row.
pub struct Sections {
    ids: RefCell<Vec<HeaderId>>,
    checkable: Cell<bool>,
    pub row_allocations: Cell<usize>,
    pub header_allocations: Cell<usize>,
    pub header_binds: RefCell<Vec<usize>>,
    observable: DataSetObservable,
}

impl Sections {
    pub fn new(ids: Vec<HeaderId>) -> Rc<Self> {
        Rc::new(Self {
            ids: RefCell::new(ids),
            checkable: Cell::new(false),
            row_allocations: Cell::new(0),
            header_allocations: Cell::new(0),
            header_binds: RefCell::new(Vec::new()),
            observable: DataSetObservable::new(),
        })
    }

    /// `count` rows, `per_section` rows to a section.
    pub fn grouped(count: usize, per_section: usize) -> Rc<Self> {
        Self::new((0..count).map(|p| (p / per_section) as HeaderId).collect())
    }

    pub fn ids_len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn set_ids(&self, ids: Vec<HeaderId>) {
        *self.ids.borrow_mut() = ids;
    }

    pub fn set_checkable(&self, checkable: bool) {
        self.checkable.set(checkable);
    }

    pub fn observable(&self) -> &DataSetObservable {
        &self.observable
    }
}

impl StickyListHeadersAdapter for Sections {
    fn count(&self) -> usize {
        self.ids.borrow().len()
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn row_view(&self, position: usize, convert_view: Option<View>) -> View {
        let checkable = self.checkable.get();
        let view = match convert_view {
            Some(view) if view.is_checkable() == checkable => view,
            _ => {
                self.row_allocations.set(self.row_allocations.get() + 1);
                if checkable {
                    View::checkable(ROW_HEIGHT)
                } else {
                    View::new(ROW_HEIGHT)
                }
            }
        };
        view.set_label(format!("row {position}"));
        view
    }

    fn header_id(&self, position: usize) -> HeaderId {
        self.ids.borrow()[position]
    }

    fn header_view(&self, position: usize, convert_view: Option<View>) -> View {
        let view = convert_view.unwrap_or_else(|| {
            self.header_allocations.set(self.header_allocations.get() + 1);
            View::new(HEADER_HEIGHT)
        });
        view.set_label(format!("header {}", self.header_id(position)));
        self.header_binds.borrow_mut().push(position);
        view
    }

    fn data_set_observable(&self) -> Option<&DataSetObservable> {
        Some(&self.observable)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Save,
    Restore,
    Clip(Rect),
    View(String, Rect),
    Divider(Rect),
    Selector(Rect),
}

#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn views(&self) -> Vec<(String, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::View(label, bounds) => Some((label.clone(), *bounds)),
                _ => None,
            })
            .collect()
    }

    pub fn clips(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Clip(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn selectors(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Selector(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for Recorder {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(Op::Clip(rect));
    }

    fn draw_view(&mut self, view: &View, bounds: Rect) {
        self.ops.push(Op::View(view.label(), bounds));
    }

    fn draw_divider(&mut self, _color: Color, bounds: Rect) {
        self.ops.push(Op::Divider(bounds));
    }

    fn draw_selector(&mut self, bounds: Rect) {
        self.ops.push(Op::Selector(bounds));
    }
}
