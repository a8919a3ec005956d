//! The per-widget style value.

use horizon_trellis_render::{Color, Font, Rect};

/// Space reserved inside a widget's border, per side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    /// Same inset on every side.
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical and horizontal insets.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// No inset.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Left plus right.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Shrink `rect` by these insets.
    pub fn apply(&self, rect: Rect) -> Rect {
        rect.inset(self.left, self.top, self.right, self.bottom)
    }
}

/// Visual properties of one widget.
///
/// Widgets share `Arc<Style>` values handed out by a [`Skin`](crate::Skin)
/// and clone them on first mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub background: Color,
    pub foreground: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub hover_background: Color,
    pub pressed_background: Color,
    pub pressed_foreground: Color,
    pub selection_background: Color,
    pub selection_foreground: Color,
    pub disabled_foreground: Color,
    pub placeholder_foreground: Color,
    pub focus_color: Color,
    pub padding: Insets,
    pub font: Font,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl Style {
    /// A neutral style: black text on transparent background, no padding.
    pub fn new() -> Self {
        Self {
            background: Color::TRANSPARENT,
            foreground: Color::BLACK,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            hover_background: Color::TRANSPARENT,
            pressed_background: Color::TRANSPARENT,
            pressed_foreground: Color::BLACK,
            selection_background: Color::LIGHT_GRAY,
            selection_foreground: Color::BLACK,
            disabled_foreground: Color::GRAY,
            placeholder_foreground: Color::GRAY,
            focus_color: Color::BLACK,
            padding: Insets::ZERO,
            font: Font::default(),
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn border(mut self, color: Color, width: f32) -> Self {
        self.border_color = color;
        self.border_width = width;
        self
    }

    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    pub fn pressed(mut self, background: Color, foreground: Color) -> Self {
        self.pressed_background = background;
        self.pressed_foreground = foreground;
        self
    }

    pub fn selection(mut self, background: Color, foreground: Color) -> Self {
        self.selection_background = background;
        self.selection_foreground = foreground;
        self
    }

    pub fn disabled_foreground(mut self, color: Color) -> Self {
        self.disabled_foreground = color;
        self
    }

    pub fn placeholder_foreground(mut self, color: Color) -> Self {
        self.placeholder_foreground = color;
        self
    }

    pub fn focus_color(mut self, color: Color) -> Self {
        self.focus_color = color;
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Rectangle inside the padding of a widget occupying `bounds`.
    pub fn content_rect(&self, bounds: Rect) -> Rect {
        self.padding.apply(bounds)
    }
}
