//! Canvas that records draw calls for later inspection.

use stickylist_core::{Canvas, Color, Rect, View};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Clip(Rect),
    View { label: String, bounds: Rect },
    Divider { color: Color, bounds: Rect },
    Selector(Rect),
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Labels of drawn views, back to front.
    pub fn labels(&self) -> Vec<String> {
        self.views().into_iter().map(|(label, _)| label).collect()
    }

    pub fn views(&self) -> Vec<(String, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::View { label, bounds } => Some((label.clone(), *bounds)),
                _ => None,
            })
            .collect()
    }

    /// Bounds of the last draw of the view labelled `label`.
    pub fn bounds_of(&self, label: &str) -> Option<Rect> {
        self.views()
            .into_iter()
            .rev()
            .find(|(drawn, _)| drawn == label)
            .map(|(_, bounds)| bounds)
    }

    pub fn clips(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Clip(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn dividers(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Divider { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .collect()
    }

    pub fn selectors(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Selector(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Every save has a matching restore, never popping an empty stack.
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0usize;
        for op in &self.ops {
            match op {
                DrawOp::Save => depth += 1,
                DrawOp::Restore => match depth.checked_sub(1) {
                    Some(next) => depth = next,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }

    fn draw_view(&mut self, view: &View, bounds: Rect) {
        self.ops.push(DrawOp::View {
            label: view.label(),
            bounds,
        });
    }

    fn draw_divider(&mut self, color: Color, bounds: Rect) {
        self.ops.push(DrawOp::Divider { color, bounds });
    }

    fn draw_selector(&mut self, bounds: Rect) {
        self.ops.push(DrawOp::Selector(bounds));
    }
}
