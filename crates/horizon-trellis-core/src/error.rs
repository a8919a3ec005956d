//! Error types for Horizon Trellis.

use std::fmt;
use std::path::PathBuf;

/// The main error type for Horizon Trellis core operations.
#[derive(Debug)]
pub enum TrellisError {
    /// Signal-related error.
    Signal(SignalError),
    /// Configuration-related error.
    Config(ConfigError),
}

impl fmt::Display for TrellisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(err) => write!(f, "Signal error: {err}"),
            Self::Config(err) => write!(f, "Configuration error: {err}"),
        }
    }
}

impl std::error::Error for TrellisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Signal(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<SignalError> for TrellisError {
    fn from(err: SignalError) -> Self {
        Self::Signal(err)
    }
}

impl From<ConfigError> for TrellisError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
    /// The signal has been dropped and is no longer available.
    SignalDropped,
    /// An emission was refused because slots kept re-emitting the same signal.
    RecursionLimit {
        /// The nesting depth at which emission was refused.
        depth: usize,
    },
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
            Self::SignalDropped => write!(f, "Signal has been dropped"),
            Self::RecursionLimit { depth } => {
                write!(f, "Signal emission nested {depth} levels deep, refusing to recurse further")
            }
        }
    }
}

impl std::error::Error for SignalError {}

/// Errors raised while loading a [`ToolkitConfig`](crate::ToolkitConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for the expected schema.
    Parse(toml::de::Error),
    /// A value parsed but is outside its accepted range.
    InvalidValue {
        /// The offending key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read config '{}': {source}", path.display())
            }
            Self::Parse(err) => write!(f, "Failed to parse config: {err}"),
            Self::InvalidValue { key, reason } => write!(f, "Invalid value for '{key}': {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}

/// A specialized Result type for Horizon Trellis core operations.
pub type Result<T> = std::result::Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_signal_error_display() {
        let err = SignalError::RecursionLimit { depth: 32 };
        assert!(err.to_string().contains("32"));
    }

    #[test]
    fn test_trellis_error_source() {
        let err: TrellisError = SignalError::SignalDropped.into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Signal error"));
    }
}
