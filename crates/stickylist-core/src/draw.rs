//! Drawing surface the list renders into.
//!
//! The engine does not rasterize anything itself; it issues draw calls in
//! back-to-front order against a [`Canvas`] supplied by the platform layer.

use crate::geometry::{Color, Rect};
use crate::view::View;

pub trait Canvas {
    /// Pushes the current clip onto the clip stack.
    fn save(&mut self);

    /// Pops the clip stack.
    fn restore(&mut self);

    /// Intersects the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Draws `view` at `bounds` (container coordinates).
    fn draw_view(&mut self, view: &View, bounds: Rect);

    fn draw_divider(&mut self, color: Color, bounds: Rect);

    /// Draws the pressed/selected row highlight.
    fn draw_selector(&mut self, bounds: Rect);
}
