//! Error types for the styling system.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the styling system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The skin file is not valid TOML or does not match the skin schema.
    #[error("Skin parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read skin '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid property value.
    #[error("Invalid value for '{widget}.{property}': {message}")]
    InvalidValue {
        widget: String,
        property: String,
        message: String,
    },

    /// The skin names a base skin that does not exist.
    #[error("Unknown base skin '{0}' (expected \"light\" or \"dark\")")]
    UnknownBase(String),

    /// No style is registered for the widget class.
    #[error("No style registered for widget class '{0}'")]
    UnknownClass(String),
}

impl Error {
    /// Create an invalid value error.
    pub fn invalid_value(
        widget: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            widget: widget.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
