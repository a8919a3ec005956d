//! The rendering boundary.
//!
//! [`Renderer`] is the set of 2D drawing primitives widgets paint with. The
//! GPU backend implements it outside this workspace; [`RecordingRenderer`]
//! implements it by recording [`DrawCommand`]s in device coordinates, which
//! is what headless tools and tests inspect.

use crate::font::Font;
use crate::types::{Color, Point, Rect};

/// Stroke parameters for outlines and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    /// Create a new stroke.
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A 2D renderer with a translation stack and rectangular clipping.
pub trait Renderer {
    /// Push the current translation and clip onto the state stack.
    fn save(&mut self);

    /// Pop the most recently saved state. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Translate subsequent drawing.
    fn translate(&mut self, tx: f32, ty: f32);

    /// Intersect the clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: Rect);

    /// Current clip in device coordinates, if any.
    fn clip_bounds(&self) -> Option<Rect>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, font: &Font, color: Color);
}

/// A recorded drawing operation, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        text: String,
        position: Point,
        font: Font,
        color: Color,
    },
}

#[derive(Debug, Clone, Copy, Default)]
struct RenderState {
    offset: Point,
    clip: Option<Rect>,
}

/// A renderer that records draw commands instead of rasterizing.
///
/// Commands fully outside the current clip are dropped.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    state: RenderState,
    stack: Vec<RenderState>,
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// All text drawn so far, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn to_device(&self, rect: Rect) -> Rect {
        rect.offset(self.state.offset.x, self.state.offset.y)
    }

    fn visible(&self, device_rect: &Rect) -> bool {
        match self.state.clip {
            Some(clip) => clip.intersect(device_rect).is_some(),
            None => true,
        }
    }
}

impl Renderer for RecordingRenderer {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => tracing::warn!(
                target: "horizon_trellis_render",
                "restore() called without matching save()"
            ),
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.offset = self.state.offset + Point::new(tx, ty);
    }

    fn clip_rect(&mut self, rect: Rect) {
        let device = self.to_device(rect);
        self.state.clip = Some(match self.state.clip {
            Some(clip) => clip
                .intersect(&device)
                .unwrap_or(Rect::from_origin_size(device.origin, Default::default())),
            None => device,
        });
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.to_device(rect);
        if self.visible(&rect) {
            self.commands.push(DrawCommand::FillRect { rect, color });
        }
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let rect = self.to_device(rect);
        if self.visible(&rect) {
            self.commands.push(DrawCommand::StrokeRect {
                rect,
                stroke: *stroke,
            });
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let offset = self.state.offset;
        self.commands.push(DrawCommand::Line {
            from: from + offset,
            to: to + offset,
            stroke: *stroke,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, font: &Font, color: Color) {
        let position = position + self.state.offset;
        // Clip against a one-line box; the recorder has no real metrics.
        let extent = Rect::new(position.x, position.y, f32::MAX / 4.0, font.size);
        if self.visible(&extent) {
            self.commands.push(DrawCommand::Text {
                text: text.to_string(),
                position,
                font: font.clone(),
                color,
            });
        }
    }
}
