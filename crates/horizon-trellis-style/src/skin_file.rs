//! TOML skin files.
//!
//! A skin file picks a built-in base skin and overrides individual style
//! properties per widget class:
//!
//! ```toml
//! base = "dark"
//!
//! [styles.Button]
//! background = "#336699"
//! padding = [4.0, 10.0]
//! font_size = 13.0
//!
//! [styles.ListItem]
//! selection_background = "#FFCC00"
//! ```
//!
//! Classes that are not built in are created from the base skin's default
//! style. Colors are `#RRGGBB` or `#RRGGBBAA`.

use std::collections::BTreeMap;

use horizon_trellis_render::{Color, FontWeight};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::style::{Insets, Style};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SkinFile {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleOverrides>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub(crate) enum PaddingValue {
    Uniform(f32),
    Symmetric([f32; 2]),
    Sides([f32; 4]),
}

impl From<PaddingValue> for Insets {
    fn from(padding: PaddingValue) -> Self {
        match padding {
            PaddingValue::Uniform(value) => Insets::uniform(value),
            PaddingValue::Symmetric([vertical, horizontal]) => {
                Insets::symmetric(vertical, horizontal)
            }
            PaddingValue::Sides([top, right, bottom, left]) => Insets {
                top,
                right,
                bottom,
                left,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StyleOverrides {
    background: Option<String>,
    foreground: Option<String>,
    border_color: Option<String>,
    border_width: Option<f32>,
    hover_background: Option<String>,
    pressed_background: Option<String>,
    pressed_foreground: Option<String>,
    selection_background: Option<String>,
    selection_foreground: Option<String>,
    disabled_foreground: Option<String>,
    placeholder_foreground: Option<String>,
    focus_color: Option<String>,
    padding: Option<PaddingValue>,
    font_family: Option<String>,
    font_size: Option<f32>,
    bold: Option<bool>,
}

impl StyleOverrides {
    /// Apply every present override onto `style`.
    pub(crate) fn apply(&self, class: &str, style: &mut Style) -> Result<()> {
        let colors = [
            ("background", &self.background, &mut style.background),
            ("foreground", &self.foreground, &mut style.foreground),
            ("border_color", &self.border_color, &mut style.border_color),
            ("hover_background", &self.hover_background, &mut style.hover_background),
            ("pressed_background", &self.pressed_background, &mut style.pressed_background),
            ("pressed_foreground", &self.pressed_foreground, &mut style.pressed_foreground),
            ("selection_background", &self.selection_background, &mut style.selection_background),
            ("selection_foreground", &self.selection_foreground, &mut style.selection_foreground),
            ("disabled_foreground", &self.disabled_foreground, &mut style.disabled_foreground),
            (
                "placeholder_foreground",
                &self.placeholder_foreground,
                &mut style.placeholder_foreground,
            ),
            ("focus_color", &self.focus_color, &mut style.focus_color),
        ];
        for (property, value, slot) in colors {
            if let Some(text) = value {
                *slot = parse_color(class, property, text)?;
            }
        }

        if let Some(width) = self.border_width {
            style.border_width = non_negative(class, "border_width", width)?;
        }
        if let Some(padding) = self.padding {
            let insets = Insets::from(padding);
            if [insets.top, insets.right, insets.bottom, insets.left]
                .iter()
                .any(|v| *v < 0.0)
            {
                return Err(Error::invalid_value(class, "padding", "insets must not be negative"));
            }
            style.padding = insets;
        }
        if let Some(family) = &self.font_family {
            style.font.family = family.clone();
        }
        if let Some(size) = self.font_size {
            if size <= 0.0 {
                return Err(Error::invalid_value(class, "font_size", "must be positive"));
            }
            style.font.size = size;
        }
        if let Some(bold) = self.bold {
            style.font.weight = if bold {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            };
        }
        Ok(())
    }
}

fn parse_color(class: &str, property: &str, text: &str) -> Result<Color> {
    Color::from_hex(text).ok_or_else(|| {
        Error::invalid_value(class, property, format!("'{text}' is not a #RRGGBB[AA] color"))
    })
}

fn non_negative(class: &str, property: &str, value: f32) -> Result<f32> {
    if value < 0.0 {
        Err(Error::invalid_value(class, property, "must not be negative"))
    } else {
        Ok(value)
    }
}
