//! Canvas that renders a frame as lines of text, one per visible view.

use stickylist_core::{Canvas, Color, Rect, View};

#[derive(Debug, Default)]
pub struct TextCanvas {
    clips: Vec<Option<Rect>>,
    current_clip: Option<Rect>,
    lines: Vec<String>,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn take_lines(&mut self) -> Vec<String> {
        self.clips.clear();
        self.current_clip = None;
        std::mem::take(&mut self.lines)
    }

    fn visible(&self, bounds: Rect) -> Option<Rect> {
        let visible = match self.current_clip {
            Some(clip) => bounds.intersect(&clip),
            None => bounds,
        };
        (!visible.is_empty()).then_some(visible)
    }
}

impl Canvas for TextCanvas {
    fn save(&mut self) {
        self.clips.push(self.current_clip);
    }

    fn restore(&mut self) {
        self.current_clip = self.clips.pop().flatten();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.current_clip = Some(match self.current_clip {
            Some(clip) => clip.intersect(&rect),
            None => rect,
        });
    }

    fn draw_view(&mut self, view: &View, bounds: Rect) {
        let Some(visible) = self.visible(bounds) else {
            return;
        };
        let marker = if view.is_checked() { "[x]" } else { "   " };
        self.lines.push(format!(
            "{:>7.1}..{:<7.1} {marker} {}",
            visible.top(),
            visible.bottom(),
            view.label()
        ));
    }

    fn draw_divider(&mut self, _color: Color, _bounds: Rect) {}

    fn draw_selector(&mut self, bounds: Rect) {
        if let Some(visible) = self.visible(bounds) {
            self.lines.push(format!(
                "{:>7.1}..{:<7.1} (highlight)",
                visible.top(),
                visible.bottom()
            ));
        }
    }
}
