//! Construction-time configuration of the sticky list.
//!
//! [`StickyListConfig`] can be built directly with struct update syntax or
//! parsed once from an [`AttributeSet`] of string attributes.

use std::fmt;

use indexmap::IndexMap;

use crate::compound_row::Divider;
use crate::geometry::{Color, EdgeInsets};
use crate::gesture_constants::TOUCH_SLOP;
use crate::host::{ChoiceMode, ScrollBarStyle, ScrollDecorations};

const KNOWN_KEYS: &[&str] = &[
    "hasStickyHeaders",
    "isDrawingListUnderStickyHeader",
    "padding",
    "paddingLeft",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "clipToPadding",
    "divider",
    "dividerHeight",
    "scrollbars",
    "fadingEdgeLength",
    "requiresFadingEdge",
    "scrollbarStyle",
    "choiceMode",
    "fastScrollEnabled",
    "fastScrollAlwaysVisible",
    "drawSelectorOnTop",
    "stackFromBottom",
    "touchSlop",
];

#[derive(Clone, Debug, PartialEq)]
pub struct StickyListConfig {
    pub are_headers_sticky: bool,
    /// When `false`, rows are clipped below the floating header.
    pub drawing_list_under_sticky_header: bool,
    pub padding: EdgeInsets,
    pub clip_to_padding: bool,
    /// Divider drawn above rows that continue a section. `None` disables it.
    pub divider: Option<Divider>,
    pub decorations: ScrollDecorations,
    pub choice_mode: ChoiceMode,
    pub stack_from_bottom: bool,
    pub touch_slop: f32,
}

impl Default for StickyListConfig {
    fn default() -> Self {
        Self {
            are_headers_sticky: true,
            drawing_list_under_sticky_header: true,
            padding: EdgeInsets::default(),
            clip_to_padding: true,
            divider: Some(Divider::default()),
            decorations: ScrollDecorations::default(),
            choice_mode: ChoiceMode::None,
            stack_from_bottom: false,
            touch_slop: TOUCH_SLOP,
        }
    }
}

/// String attributes keyed by name, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: IndexMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBool { key: String, value: String },
    InvalidDimension { key: String, value: String },
    InvalidColor { key: String, value: String },
    InvalidEnum {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBool { key, value } => {
                write!(f, "attribute {key}: expected true or false, got {value:?}")
            }
            ConfigError::InvalidDimension { key, value } => write!(
                f,
                "attribute {key}: expected a non-negative pixel dimension, got {value:?}"
            ),
            ConfigError::InvalidColor { key, value } => write!(
                f,
                "attribute {key}: expected #RRGGBB or #AARRGGBB, got {value:?}"
            ),
            ConfigError::InvalidEnum {
                key,
                value,
                expected,
            } => write!(f, "attribute {key}: expected one of {expected}, got {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl StickyListConfig {
    /// Reads the configuration from attributes, starting from the defaults.
    pub fn from_attributes(attrs: &AttributeSet) -> Result<Self, ConfigError> {
        for key in attrs.keys() {
            if !KNOWN_KEYS.contains(&key) {
                log::debug!("ignoring unknown sticky list attribute {key}");
            }
        }

        let mut config = StickyListConfig::default();
        let reader = Reader { attrs };

        if let Some(sticky) = reader.bool("hasStickyHeaders")? {
            config.are_headers_sticky = sticky;
        }
        if let Some(under) = reader.bool("isDrawingListUnderStickyHeader")? {
            config.drawing_list_under_sticky_header = under;
        }

        let base = reader.dimension("padding")?.unwrap_or(0.0);
        config.padding = EdgeInsets::from_components(
            reader.dimension("paddingLeft")?.unwrap_or(base),
            reader.dimension("paddingTop")?.unwrap_or(base),
            reader.dimension("paddingRight")?.unwrap_or(base),
            reader.dimension("paddingBottom")?.unwrap_or(base),
        );
        if let Some(clip) = reader.bool("clipToPadding")? {
            config.clip_to_padding = clip;
        }

        match attrs.get("divider") {
            Some("@null") => config.divider = None,
            Some(_) => {
                let color = reader.color("divider")?.unwrap_or(Color::LIGHT_GRAY);
                config.divider = Some(Divider {
                    color,
                    ..Divider::default()
                });
            }
            None => {}
        }
        if let Some(height) = reader.dimension("dividerHeight")? {
            if let Some(divider) = config.divider.as_mut() {
                divider.height = height;
            }
        }

        let decorations = &mut config.decorations;
        if let Some((vertical, horizontal)) = reader.axes("scrollbars")? {
            decorations.vertical_scrollbar = vertical;
            decorations.horizontal_scrollbar = horizontal;
        }
        if let Some(length) = reader.dimension("fadingEdgeLength")? {
            decorations.fading_edge_length = length;
        }
        if let Some((vertical, horizontal)) = reader.axes("requiresFadingEdge")? {
            decorations.vertical_fading_edge = vertical;
            decorations.horizontal_fading_edge = horizontal;
        }
        if let Some(style) = reader.scrollbar_style("scrollbarStyle")? {
            decorations.scrollbar_style = style;
        }
        if let Some(enabled) = reader.bool("fastScrollEnabled")? {
            decorations.fast_scroll_enabled = enabled;
        }
        if let Some(visible) = reader.bool("fastScrollAlwaysVisible")? {
            decorations.fast_scroll_always_visible = visible;
        }
        if let Some(on_top) = reader.bool("drawSelectorOnTop")? {
            decorations.draw_selector_on_top = on_top;
        }

        if let Some(mode) = reader.choice_mode("choiceMode")? {
            config.choice_mode = mode;
        }
        if let Some(stack) = reader.bool("stackFromBottom")? {
            config.stack_from_bottom = stack;
        }
        if let Some(slop) = reader.dimension("touchSlop")? {
            config.touch_slop = slop;
        }
        Ok(config)
    }
}

struct Reader<'a> {
    attrs: &'a AttributeSet,
}

impl Reader<'_> {
    fn bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        let Some(value) = self.attrs.get(key) else {
            return Ok(None);
        };
        match value.trim() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidBool {
                key: key.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    fn dimension(&self, key: &str) -> Result<Option<f32>, ConfigError> {
        let Some(value) = self.attrs.get(key) else {
            return Ok(None);
        };
        let trimmed = value.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
        match number.parse::<f32>() {
            Ok(px) if px.is_finite() && px >= 0.0 => Ok(Some(px)),
            _ => Err(ConfigError::InvalidDimension {
                key: key.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    fn color(&self, key: &str) -> Result<Option<Color>, ConfigError> {
        let Some(value) = self.attrs.get(key) else {
            return Ok(None);
        };
        parse_color(value.trim())
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidColor {
                key: key.to_owned(),
                value: value.to_owned(),
            })
    }

    /// Parses `vertical`, `horizontal`, `none` or `vertical|horizontal`.
    fn axes(&self, key: &str) -> Result<Option<(bool, bool)>, ConfigError> {
        let Some(value) = self.attrs.get(key) else {
            return Ok(None);
        };
        let invalid = || ConfigError::InvalidEnum {
            key: key.to_owned(),
            value: value.to_owned(),
            expected: "vertical, horizontal, none",
        };
        let mut axes = (false, false);
        for flag in value.split('|').map(str::trim) {
            match flag {
                "vertical" => axes.0 = true,
                "horizontal" => axes.1 = true,
                "none" => {}
                _ => return Err(invalid()),
            }
        }
        Ok(Some(axes))
    }

    fn scrollbar_style(&self, key: &str) -> Result<Option<ScrollBarStyle>, ConfigError> {
        let Some(value) = self.attrs.get(key) else {
            return Ok(None);
        };
        let style = match value.trim() {
            "insideOverlay" => ScrollBarStyle::InsideOverlay,
            "insideInset" => ScrollBarStyle::InsideInset,
            "outsideOverlay" => ScrollBarStyle::OutsideOverlay,
            "outsideInset" => ScrollBarStyle::OutsideInset,
            _ => {
                return Err(ConfigError::InvalidEnum {
                    key: key.to_owned(),
                    value: value.to_owned(),
                    expected: "insideOverlay, insideInset, outsideOverlay, outsideInset",
                })
            }
        };
        Ok(Some(style))
    }

    fn choice_mode(&self, key: &str) -> Result<Option<ChoiceMode>, ConfigError> {
        let Some(value) = self.attrs.get(key) else {
            return Ok(None);
        };
        let mode = match value.trim() {
            "none" => ChoiceMode::None,
            "single" | "singleChoice" => ChoiceMode::Single,
            "multiple" | "multipleChoice" => ChoiceMode::Multiple,
            _ => {
                return Err(ConfigError::InvalidEnum {
                    key: key.to_owned(),
                    value: value.to_owned(),
                    expected: "none, single, multiple",
                })
            }
        };
        Ok(Some(mode))
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb_u8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::from_argb_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}
