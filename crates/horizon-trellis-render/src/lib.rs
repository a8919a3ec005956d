//! Rendering boundary for Horizon Trellis.
//!
//! This crate holds the value types widgets use to describe geometry and
//! color, the [`FontMetrics`] query interface, and the [`Renderer`] drawing
//! interface. It contains no GPU code: a backend implements [`Renderer`] and
//! [`FontMetrics`], and [`RecordingRenderer`] / [`FixedMetrics`] stand in for
//! it in headless use.
//!
//! ```
//! use horizon_trellis_render::{Color, Rect, RecordingRenderer, Renderer};
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.translate(4.0, 4.0);
//! renderer.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
//! assert_eq!(renderer.commands().len(), 1);
//! ```

mod font;
mod renderer;
mod types;

pub use font::{FixedMetrics, Font, FontMetrics, FontWeight};
pub use renderer::{DrawCommand, RecordingRenderer, Renderer, Stroke};
pub use types::{Color, Point, Rect, Size};
