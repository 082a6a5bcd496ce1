//! Robot-style driver for a sticky list.
//!
//! Wraps a [`StickyHeaderController`] with a fixed viewport and offers
//! scroll and gesture helpers that mirror what a user would do.
//!
//! # Example
//!
//! ```
//! use stickylist_testing::{ListRobot, TestAdapter};
//!
//! let mut robot = ListRobot::new(TestAdapter::sectioned(50, 5), 320.0, 200.0);
//! robot.scroll_by(30.0);
//! assert_eq!(robot.floating_header_label().as_deref(), Some("header 0"));
//! ```

use std::rc::Rc;

use stickylist_core::{
    MotionEvent, StickyHeaderController, StickyListConfig, StickyListHeadersAdapter,
};

use crate::canvas::RecordingCanvas;

pub struct ListRobot {
    controller: StickyHeaderController,
    canvas: RecordingCanvas,
}

impl ListRobot {
    /// Creates a robot over `adapter` with default configuration and no divider.
    pub fn new(adapter: Rc<dyn StickyListHeadersAdapter>, width: f32, height: f32) -> Self {
        Self::with_config(
            adapter,
            StickyListConfig {
                divider: None,
                ..StickyListConfig::default()
            },
            width,
            height,
        )
    }

    pub fn with_config(
        adapter: Rc<dyn StickyListHeadersAdapter>,
        config: StickyListConfig,
        width: f32,
        height: f32,
    ) -> Self {
        let mut controller = StickyHeaderController::new(config);
        controller.set_size(width, height);
        controller.set_adapter(Some(adapter));
        controller.layout();
        Self {
            controller,
            canvas: RecordingCanvas::new(),
        }
    }

    pub fn controller(&self) -> &StickyHeaderController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut StickyHeaderController {
        &mut self.controller
    }

    pub fn layout(&mut self) {
        self.controller.layout();
    }

    pub fn scroll_by(&mut self, dy: f32) -> bool {
        self.controller.scroll_by(dy)
    }

    /// Scrolls by `step` until the list stops moving, calling `on_step`
    /// after every movement. Returns the number of steps taken.
    pub fn scroll_in_steps(
        &mut self,
        step: f32,
        mut on_step: impl FnMut(&StickyHeaderController),
    ) -> usize {
        let mut steps = 0;
        while self.controller.scroll_by(step) {
            steps += 1;
            on_step(&self.controller);
        }
        steps
    }

    pub fn scroll_to_top(&mut self) {
        let page = self.controller.host().height().max(1.0);
        while self.controller.scroll_by(-page) {}
    }

    pub fn scroll_to_end(&mut self) {
        let page = self.controller.host().height().max(1.0);
        while self.controller.scroll_by(page) {}
    }

    pub fn press(&mut self, x: f32, y: f32) -> bool {
        self.controller.dispatch_touch_event(&MotionEvent::down(x, y))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.controller.dispatch_touch_event(&MotionEvent::moved(x, y))
    }

    pub fn release(&mut self, x: f32, y: f32) -> bool {
        self.controller.dispatch_touch_event(&MotionEvent::up(x, y))
    }

    /// Down and up at the same point.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        let pressed = self.press(x, y);
        self.release(x, y);
        pressed
    }

    /// Down at `from_y`, `steps` evenly spaced moves to `to_y`, then up.
    pub fn drag(&mut self, x: f32, from_y: f32, to_y: f32, steps: usize) {
        let steps = steps.max(1);
        self.press(x, from_y);
        for step in 1..=steps {
            let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
            self.move_to(x, y);
        }
        self.release(x, to_y);
    }

    /// Draws a frame into the robot's canvas and returns it.
    pub fn draw(&mut self) -> &RecordingCanvas {
        self.canvas.clear();
        self.controller.dispatch_draw(&mut self.canvas);
        &self.canvas
    }

    pub fn floating_header_label(&self) -> Option<String> {
        self.controller.sticky_header().map(|view| view.label())
    }

    /// Labels of the rows currently laid out, top to bottom.
    pub fn visible_row_labels(&self) -> Vec<String> {
        self.controller
            .host()
            .children()
            .iter()
            .filter_map(|child| child.compound())
            .map(|compound| compound.row().label())
            .collect()
    }
}

impl std::fmt::Debug for ListRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRobot")
            .field("controller", &self.controller)
            .finish()
    }
}
