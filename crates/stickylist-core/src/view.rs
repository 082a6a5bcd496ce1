//! Lightweight view handles shared between adapters, compound rows and the
//! floating header.
//!
//! A [`View`] is a reference-counted handle: cloning it yields another handle
//! to the same view, and equality is identity. Geometry and visibility live in
//! `Cell`s so that adapters can bind content through a shared reference, the
//! way platform view objects are mutated in place.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;
use crate::input::{MotionAction, MotionEvent};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a view or compound row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub(crate) fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Takes up space but is not drawn.
    Invisible,
    /// Takes up no space and is not drawn.
    Gone,
}

pub type ClickHandler = Rc<dyn Fn(&View)>;

struct ViewInner {
    id: ViewId,
    label: RefCell<String>,
    measured_height: Cell<f32>,
    frame: Cell<Rect>,
    visibility: Cell<Visibility>,
    translation_y: Cell<f32>,
    /// `Some` for views created with the checkable capability.
    checked: Option<Cell<bool>>,
    clickable: Cell<bool>,
    pressed: Cell<bool>,
    on_click: RefCell<Option<ClickHandler>>,
    parent: Cell<Option<ViewId>>,
}

#[derive(Clone)]
pub struct View {
    inner: Rc<ViewInner>,
}

impl View {
    /// Creates a plain view with the given measured height.
    pub fn new(measured_height: f32) -> Self {
        Self::with_capability(measured_height, None)
    }

    /// Creates a view carrying the checkable capability.
    pub fn checkable(measured_height: f32) -> Self {
        Self::with_capability(measured_height, Some(Cell::new(false)))
    }

    fn with_capability(measured_height: f32, checked: Option<Cell<bool>>) -> Self {
        Self {
            inner: Rc::new(ViewInner {
                id: ViewId::next(),
                label: RefCell::new(String::new()),
                measured_height: Cell::new(measured_height),
                frame: Cell::new(Rect::default()),
                visibility: Cell::new(Visibility::Visible),
                translation_y: Cell::new(0.0),
                checked,
                clickable: Cell::new(false),
                pressed: Cell::new(false),
                on_click: RefCell::new(None),
                parent: Cell::new(None),
            }),
        }
    }

    pub fn id(&self) -> ViewId {
        self.inner.id
    }

    pub fn label(&self) -> String {
        self.inner.label.borrow().clone()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        *self.inner.label.borrow_mut() = label.into();
    }

    /// Height the view wants, as reported by the last bind.
    pub fn measured_height(&self) -> f32 {
        self.inner.measured_height.get()
    }

    pub fn set_measured_height(&self, height: f32) {
        self.inner.measured_height.set(height.max(0.0));
    }

    /// Bounds assigned by the last layout pass, before translation.
    pub fn frame(&self) -> Rect {
        self.inner.frame.get()
    }

    pub fn layout(&self, frame: Rect) {
        self.inner.frame.set(frame);
    }

    pub fn top(&self) -> f32 {
        self.frame().top()
    }

    pub fn bottom(&self) -> f32 {
        self.frame().bottom()
    }

    /// Laid out height. Zero until the first layout pass.
    pub fn height(&self) -> f32 {
        self.frame().height
    }

    pub fn visibility(&self) -> Visibility {
        self.inner.visibility.get()
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.inner.visibility.set(visibility);
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    pub fn is_gone(&self) -> bool {
        self.visibility() == Visibility::Gone
    }

    pub fn translation_y(&self) -> f32 {
        self.inner.translation_y.get()
    }

    pub fn set_translation_y(&self, translation: f32) {
        self.inner.translation_y.set(translation);
    }

    /// Frame shifted by the current translation.
    pub fn visual_bounds(&self) -> Rect {
        self.frame().translate(0.0, self.translation_y())
    }

    pub fn is_checkable(&self) -> bool {
        self.inner.checked.is_some()
    }

    /// Checked state; always `false` for views without the capability.
    pub fn is_checked(&self) -> bool {
        self.inner.checked.as_ref().is_some_and(Cell::get)
    }

    /// Sets the checked state. Returns `false` when the view is not checkable.
    pub fn set_checked(&self, checked: bool) -> bool {
        match &self.inner.checked {
            Some(cell) => {
                cell.set(checked);
                true
            }
            None => false,
        }
    }

    pub fn toggle(&self) -> bool {
        self.set_checked(!self.is_checked())
    }

    pub fn is_clickable(&self) -> bool {
        self.inner.clickable.get()
    }

    pub fn set_clickable(&self, clickable: bool) {
        self.inner.clickable.set(clickable);
    }

    /// Installs the click handler. Installing a handler makes the view clickable.
    pub fn set_on_click(&self, handler: Option<ClickHandler>) {
        if handler.is_some() {
            self.set_clickable(true);
        }
        *self.inner.on_click.borrow_mut() = handler;
    }

    pub fn has_click_handler(&self) -> bool {
        self.inner.on_click.borrow().is_some()
    }

    /// Invokes the click handler. Returns whether one was installed.
    pub fn perform_click(&self) -> bool {
        // Clone out so the handler may replace itself.
        let handler = self.inner.on_click.borrow().clone();
        match handler {
            Some(handler) => {
                handler(self);
                true
            }
            None => false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.inner.pressed.get()
    }

    /// Minimal tap recognition: down presses, up clicks, cancel releases.
    pub fn dispatch_touch_event(&self, event: &MotionEvent) -> bool {
        if !self.is_clickable() {
            return false;
        }
        match event.action {
            MotionAction::Down => self.inner.pressed.set(true),
            MotionAction::Move => {}
            MotionAction::Up => {
                if self.inner.pressed.replace(false) {
                    self.perform_click();
                }
            }
            MotionAction::Cancel => self.inner.pressed.set(false),
        }
        true
    }

    /// Identity of the container currently holding this view.
    pub fn parent(&self) -> Option<ViewId> {
        self.inner.parent.get()
    }

    pub(crate) fn set_parent(&self, parent: Option<ViewId>) {
        self.inner.parent.set(parent);
    }

    pub fn ptr_eq(&self, other: &View) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for View {}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id())
            .field("label", &*self.inner.label.borrow())
            .field("frame", &self.frame())
            .field("visibility", &self.visibility())
            .field("parent", &self.parent())
            .finish()
    }
}
