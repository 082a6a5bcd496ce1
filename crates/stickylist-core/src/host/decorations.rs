//! Cosmetic scroll-view settings passed through to the list.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollBarStyle {
    #[default]
    InsideOverlay,
    InsideInset,
    OutsideOverlay,
    OutsideInset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChoiceMode {
    #[default]
    None,
    Single,
    Multiple,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollDecorations {
    pub vertical_scrollbar: bool,
    pub horizontal_scrollbar: bool,
    pub scrollbar_style: ScrollBarStyle,
    pub fading_edge_length: f32,
    pub vertical_fading_edge: bool,
    pub horizontal_fading_edge: bool,
    pub fast_scroll_enabled: bool,
    pub fast_scroll_always_visible: bool,
    /// Draw the row highlight above rows instead of beneath them.
    pub draw_selector_on_top: bool,
}

impl Default for ScrollDecorations {
    fn default() -> Self {
        Self {
            vertical_scrollbar: true,
            horizontal_scrollbar: false,
            scrollbar_style: ScrollBarStyle::default(),
            fading_edge_length: 0.0,
            vertical_fading_edge: false,
            horizontal_fading_edge: false,
            fast_scroll_enabled: false,
            fast_scroll_always_visible: false,
            draw_selector_on_top: false,
        }
    }
}
