//! Core systems for Horizon Trellis.
//!
//! This crate provides the foundational components shared by the rest of the
//! toolkit:
//!
//! - **Signal/Slot System**: Type-safe, synchronous notification with scoped
//!   connection guards and a re-entrancy limit
//! - **Property System**: Value holders with change detection
//! - **Logging**: Tracing targets, tree formatting, and performance spans
//! - **Configuration**: [`ToolkitConfig`], loadable from TOML
//! - **Timers**: Frame-driven one-shot and repeating [`Timer`]s
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_trellis_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let guard = value_changed.connect_scoped(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! drop(guard);
//! assert_eq!(value_changed.connection_count(), 0);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod property;
pub mod signal;
pub mod timer;

pub use config::ToolkitConfig;
pub use error::{ConfigError, Result, SignalError, TrellisError};
pub use logging::{PerfSpan, TreeDebug, TreeFormatOptions, TreeNode, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, DEFAULT_MAX_EMIT_DEPTH, Signal};
pub use timer::{Timer, TimerId, TimerManager};
