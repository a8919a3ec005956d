//! Color palettes that seed the built-in skins.

use horizon_trellis_render::Color;

/// A color palette for theming.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Accent color for pressed, checked, and selected states.
    pub accent: Color,
    /// Text on top of the accent color.
    pub on_accent: Color,
    /// Window and panel background.
    pub background: Color,
    /// Control surface (buttons, fields, list rows).
    pub surface: Color,
    /// Surface under the pointer.
    pub surface_hover: Color,
    /// Primary text color.
    pub text: Color,
    /// Muted text (placeholders).
    pub text_muted: Color,
    /// Disabled text.
    pub text_disabled: Color,
    /// Standard border color.
    pub border: Color,
    /// Keyboard focus indicator.
    pub focus: Color,
}

impl Palette {
    /// The default light palette.
    pub fn light() -> Self {
        Self {
            accent: Color::from_rgba8(0x25, 0x63, 0xEB, 0xFF),
            on_accent: Color::WHITE,
            background: Color::from_rgba8(0xF5, 0xF5, 0xF5, 0xFF),
            surface: Color::WHITE,
            surface_hover: Color::from_rgba8(0xE8, 0xEE, 0xFB, 0xFF),
            text: Color::from_rgba8(0x1F, 0x1F, 0x1F, 0xFF),
            text_muted: Color::GRAY,
            text_disabled: Color::LIGHT_GRAY,
            border: Color::from_rgba8(0xC8, 0xC8, 0xC8, 0xFF),
            focus: Color::from_rgba8(0x25, 0x63, 0xEB, 0xFF),
        }
    }

    /// The default dark palette.
    pub fn dark() -> Self {
        Self {
            accent: Color::from_rgba8(0x3B, 0x82, 0xF6, 0xFF),
            on_accent: Color::WHITE,
            background: Color::from_rgba8(0x1E, 0x1E, 0x1E, 0xFF),
            surface: Color::from_rgba8(0x2A, 0x2A, 0x2A, 0xFF),
            surface_hover: Color::from_rgba8(0x36, 0x3B, 0x46, 0xFF),
            text: Color::from_rgba8(0xEE, 0xEE, 0xEE, 0xFF),
            text_muted: Color::GRAY,
            text_disabled: Color::DARK_GRAY,
            border: Color::from_rgba8(0x4A, 0x4A, 0x4A, 0xFF),
            focus: Color::from_rgba8(0x3B, 0x82, 0xF6, 0xFF),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
