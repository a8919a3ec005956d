//! The skin: a style provider keyed by widget class.
//!
//! A [`Skin`] maps widget class names (see [`class`]) to shared
//! `Arc<Style>` values. It is an ordinary value owned by the application and
//! handed to widgets through the UI context at construction time; there is no
//! process-wide skin.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use horizon_trellis_core::logging::targets;
use horizon_trellis_render::{Color, Font};
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::palette::Palette;
use crate::skin_file::SkinFile;
use crate::style::{Insets, Style};

/// Widget class names used as skin keys.
pub mod class {
    pub const BUTTON: &str = "Button";
    pub const TOGGLE_BUTTON: &str = "ToggleButton";
    pub const LABEL: &str = "Label";
    pub const ICON_PANEL: &str = "IconPanel";
    pub const LIST_VIEW: &str = "ListView";
    pub const LIST_ITEM: &str = "ListItem";
    pub const PANEL: &str = "Panel";
    pub const SCROLL_BAR: &str = "ScrollBar";
    pub const TEXT_FIELD: &str = "TextField";
}

/// A collection of per-class default styles.
#[derive(Debug)]
pub struct Skin {
    name: String,
    palette: Palette,
    fallback: Arc<Style>,
    styles: RwLock<HashMap<String, Arc<Style>>>,
}

impl Skin {
    /// The built-in light skin.
    pub fn light() -> Self {
        Self::from_palette("light", Palette::light())
    }

    /// The built-in dark skin.
    pub fn dark() -> Self {
        Self::from_palette("dark", Palette::dark())
    }

    /// Build the standard widget styles from a palette.
    pub fn from_palette(name: impl Into<String>, palette: Palette) -> Self {
        let fallback = Style::new()
            .foreground(palette.text)
            .disabled_foreground(palette.text_disabled)
            .placeholder_foreground(palette.text_muted)
            .selection(palette.accent, palette.on_accent)
            .focus_color(palette.focus);

        let button = fallback
            .clone()
            .background(palette.surface)
            .border(palette.border, 1.0)
            .hover_background(palette.surface_hover)
            .pressed(palette.accent, palette.on_accent)
            .padding(Insets::symmetric(6.0, 14.0));

        let mut styles = HashMap::new();
        styles.insert(class::BUTTON.to_string(), Arc::new(button.clone()));
        styles.insert(class::TOGGLE_BUTTON.to_string(), Arc::new(button));
        styles.insert(class::LABEL.to_string(), Arc::new(fallback.clone()));
        styles.insert(
            class::ICON_PANEL.to_string(),
            Arc::new(fallback.clone().padding(Insets::uniform(2.0))),
        );
        styles.insert(
            class::LIST_VIEW.to_string(),
            Arc::new(
                fallback
                    .clone()
                    .background(palette.surface)
                    .border(palette.border, 1.0),
            ),
        );
        styles.insert(
            class::LIST_ITEM.to_string(),
            Arc::new(
                fallback
                    .clone()
                    .hover_background(palette.surface_hover)
                    .padding(Insets::symmetric(4.0, 8.0)),
            ),
        );
        styles.insert(
            class::PANEL.to_string(),
            Arc::new(fallback.clone().background(palette.background)),
        );
        styles.insert(
            class::SCROLL_BAR.to_string(),
            Arc::new(
                fallback
                    .clone()
                    .background(palette.background)
                    .foreground(palette.border)
                    .hover_background(palette.text_muted)
                    .pressed(palette.accent, palette.on_accent),
            ),
        );
        styles.insert(
            class::TEXT_FIELD.to_string(),
            Arc::new(
                fallback
                    .clone()
                    .background(palette.surface)
                    .border(palette.border, 1.0)
                    .padding(Insets::symmetric(4.0, 6.0))
                    .font(Font::default()),
            ),
        );

        Self {
            name: name.into(),
            palette,
            fallback: Arc::new(fallback),
            styles: RwLock::new(styles),
        }
    }

    /// Parse a skin from TOML text (see the `skin_file` format).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: SkinFile = toml::from_str(text)?;
        let skin = match file.base.as_deref() {
            None | Some("light") => Self::light(),
            Some("dark") => Self::dark(),
            Some(other) => return Err(Error::UnknownBase(other.to_string())),
        };

        for (class, overrides) in &file.styles {
            let mut style = (*skin.style_for(class)).clone();
            overrides.apply(class, &mut style)?;
            skin.set_style(class.clone(), style);
        }
        Ok(skin)
    }

    /// Load a skin from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let skin = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::STYLE, path = %path.display(), skin = skin.name(), "loaded skin");
        Ok(skin)
    }

    /// Skin name ("light", "dark", or the name given to `from_palette`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The palette the built-in styles were derived from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Background color for windows and the root widget.
    pub fn window_background(&self) -> Color {
        self.palette.background
    }

    /// The shared style for a widget class.
    ///
    /// Unknown classes get the skin's fallback style and a warning.
    pub fn style_for(&self, class: &str) -> Arc<Style> {
        match self.try_style_for(class) {
            Ok(style) => style,
            Err(err) => {
                tracing::warn!(target: targets::STYLE, error = %err, "using fallback style");
                self.fallback.clone()
            }
        }
    }

    /// The shared style for a widget class, or [`Error::UnknownClass`].
    pub fn try_style_for(&self, class: &str) -> Result<Arc<Style>> {
        self.styles
            .read()
            .get(class)
            .cloned()
            .ok_or_else(|| Error::UnknownClass(class.to_string()))
    }

    /// Register or replace the style for a widget class.
    ///
    /// Widgets constructed afterwards pick up the new style; existing widgets
    /// keep the `Arc` they were given.
    pub fn set_style(&self, class: impl Into<String>, style: Style) {
        self.styles.write().insert(class.into(), Arc::new(style));
    }

    /// Registered class names, sorted.
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self.styles.read().keys().cloned().collect();
        classes.sort();
        classes
    }
}

impl Default for Skin {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_classes_present() {
        let skin = Skin::light();
        for name in [
            class::BUTTON,
            class::TOGGLE_BUTTON,
            class::LABEL,
            class::ICON_PANEL,
            class::LIST_VIEW,
            class::LIST_ITEM,
            class::PANEL,
            class::SCROLL_BAR,
            class::TEXT_FIELD,
        ] {
            assert!(skin.try_style_for(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn test_styles_are_shared() {
        let skin = Skin::light();
        let a = skin.style_for(class::BUTTON);
        let b = skin.style_for(class::BUTTON);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_unknown_class_falls_back() {
        let skin = Skin::dark();
        assert!(matches!(
            skin.try_style_for("Dial"),
            Err(Error::UnknownClass(name)) if name == "Dial"
        ));
        assert_eq!(skin.style_for("Dial").foreground, Palette::dark().text);
    }

    #[test]
    fn test_from_toml_overrides() {
        let skin = Skin::from_toml_str(
            r##"
            base = "dark"

            [styles.Button]
            background = "#336699"
            padding = [2.0, 4.0]
            font_size = 18.0
            bold = true

            [styles.Dial]
            foreground = "#FF0000"
            "##,
        )
        .unwrap();

        let button = skin.style_for(class::BUTTON);
        assert_eq!(skin.name(), "dark");
        assert_eq!(button.background, Color::from_hex("#336699").unwrap());
        assert_eq!(button.padding, Insets::symmetric(2.0, 4.0));
        assert_eq!(button.font.size, 18.0);
        assert_eq!(button.font.weight, horizon_trellis_render::FontWeight::Bold);
        assert_eq!(skin.style_for("Dial").foreground, Color::from_rgba8(255, 0, 0, 255));
    }

    #[test]
    fn test_from_toml_rejects_bad_color() {
        let err = Skin::from_toml_str("[styles.Label]\nforeground = \"blue\"").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref property, .. } if property == "foreground"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_base() {
        let err = Skin::from_toml_str("base = \"sepia\"").unwrap_err();
        assert!(matches!(err, Error::UnknownBase(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[styles.Panel]\nbackground = \"#000000\"").unwrap();

        let skin = Skin::load(file.path()).unwrap();
        assert_eq!(skin.style_for(class::PANEL).background, Color::BLACK);
    }
}
