//! Toolkit-wide configuration.
//!
//! [`ToolkitConfig`] holds the input and metrics tunables that widgets and the
//! event dispatcher consult. It is plain data, passed explicitly to the UI
//! context rather than read from global state, and can be loaded from TOML:
//!
//! ```
//! use horizon_trellis_core::ToolkitConfig;
//!
//! let config = ToolkitConfig::from_toml_str(r#"
//!     double_click_interval_ms = 250
//!     scrollbar_thickness = 16.0
//! "#).unwrap();
//!
//! assert_eq!(config.double_click_interval_ms, 250);
//! assert_eq!(config.wheel_scroll_lines, 3);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::targets;

/// Input and metric settings shared by every widget in a UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Maximum delay between two presses that still counts as a double click.
    pub double_click_interval_ms: u64,
    /// Maximum pointer travel, in pixels, between the presses of a double click.
    pub double_click_distance: f32,
    /// Lines scrolled per wheel notch.
    pub wheel_scroll_lines: i32,
    /// Pixels per scrolled line.
    pub scroll_line_step: i32,
    /// Width of vertical (height of horizontal) scroll bars.
    pub scrollbar_thickness: f32,
    /// Vertical gap between list view rows.
    pub list_row_spacing: f32,
    /// Width of the text field caret.
    pub text_cursor_width: f32,
    /// Half-period of the text field caret blink. Zero keeps the caret solid.
    pub cursor_blink_ms: u64,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            double_click_interval_ms: 400,
            double_click_distance: 4.0,
            wheel_scroll_lines: 3,
            scroll_line_step: 20,
            scrollbar_thickness: 12.0,
            list_row_spacing: 0.0,
            text_cursor_width: 1.0,
            cursor_blink_ms: 500,
        }
    }
}

impl ToolkitConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded toolkit config");
        Ok(config)
    }

    /// The double-click interval as a [`Duration`].
    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_interval_ms)
    }

    /// The caret blink half-period, or `None` when blinking is off.
    pub fn cursor_blink_interval(&self) -> Option<Duration> {
        (self.cursor_blink_ms > 0).then(|| Duration::from_millis(self.cursor_blink_ms))
    }

    /// Pixels scrolled by one wheel notch.
    pub fn wheel_step(&self) -> i32 {
        self.wheel_scroll_lines.saturating_mul(self.scroll_line_step)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scrollbar_thickness <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "scrollbar_thickness",
                reason: format!("must be positive, got {}", self.scrollbar_thickness),
            });
        }
        if self.scroll_line_step <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "scroll_line_step",
                reason: format!("must be positive, got {}", self.scroll_line_step),
            });
        }
        if self.list_row_spacing < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "list_row_spacing",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = ToolkitConfig::from_toml_str("scroll_line_step = 10").unwrap();
        assert_eq!(config.scroll_line_step, 10);
        assert_eq!(config.double_click_interval(), Duration::from_millis(400));
        assert_eq!(config.wheel_step(), 30);
        assert_eq!(config.cursor_blink_interval(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_zero_blink_disables_blinking() {
        let config = ToolkitConfig::from_toml_str("cursor_blink_ms = 0").unwrap();
        assert_eq!(config.cursor_blink_interval(), None);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = ToolkitConfig::from_toml_str("scrollbar_thickness = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "scrollbar_thickness",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = ToolkitConfig::from_toml_str("double_click_interval_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wheel_scroll_lines = 5").unwrap();

        let config = ToolkitConfig::load(file.path()).unwrap();
        assert_eq!(config.wheel_scroll_lines, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ToolkitConfig::load("/nonexistent/trellis.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
