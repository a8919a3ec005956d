//! Core widget trait definitions.
//!
//! # Key Types
//!
//! - [`Widget`] - Base trait for all UI elements
//! - [`PaintContext`] - Rendering context passed to [`Widget::paint`]

use horizon_trellis_render::{Color, Font, FontMetrics, Point, Rect, Renderer, Size, Stroke};

use super::base::{WidgetBase, WidgetId};
use super::events::WidgetEvent;
use super::geometry::{SizeHint, SizePolicyPair};

/// Context provided during widget painting.
///
/// The renderer is already translated so that `(0, 0)` is the widget's
/// top-left corner.
pub struct PaintContext<'a> {
    renderer: &'a mut dyn Renderer,
    metrics: &'a dyn FontMetrics,
    widget_rect: Rect,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(renderer: &'a mut dyn Renderer, metrics: &'a dyn FontMetrics, widget_rect: Rect) -> Self {
        Self {
            renderer,
            metrics,
            widget_rect,
        }
    }

    /// The renderer to draw with.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Font measurement.
    #[inline]
    pub fn metrics(&self) -> &dyn FontMetrics {
        self.metrics
    }

    /// The widget's local rectangle (origin always 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    /// The widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.width()
    }

    /// The widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.height()
    }

    /// The widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.widget_rect.size
    }

    /// The renderer and font metrics at once, for painting nested trees.
    pub fn split(&mut self) -> (&mut dyn Renderer, &dyn FontMetrics) {
        (&mut *self.renderer, self.metrics)
    }

    /// A paint context for a sub-rectangle sharing this renderer.
    pub fn with_rect(&mut self, rect: Rect) -> PaintContext<'_> {
        PaintContext {
            renderer: &mut *self.renderer,
            metrics: self.metrics,
            widget_rect: rect,
        }
    }

    /// Draw `text` vertically centered in `rect`, left aligned.
    pub fn draw_text_left(&mut self, text: &str, rect: Rect, font: &Font, color: Color) {
        let y = rect.top() + (rect.height() - self.metrics.line_height(font)) / 2.0;
        self.renderer.draw_text(text, Point::new(rect.left(), y), font, color);
    }

    /// Draw `text` centered in `rect`.
    pub fn draw_text_centered(&mut self, text: &str, rect: Rect, font: &Font, color: Color) {
        let bounds = self.metrics.text_bounds(text, font);
        let x = rect.left() + (rect.width() - bounds.width()) / 2.0;
        let y = rect.top() + (rect.height() - self.metrics.line_height(font)) / 2.0;
        self.renderer.draw_text(text, Point::new(x, y), font, color);
    }

    /// Draw a focus outline inset into the widget's bounds.
    pub fn draw_focus_indicator(&mut self, inset: f32, color: Color) {
        let rect = self.widget_rect.inset(inset, inset, inset, inset);
        self.renderer.stroke_rect(rect, &Stroke::new(color, 1.0));
    }

    /// Fill the background and stroke the border described by a style.
    pub fn draw_frame(&mut self, background: Color, border: Color, border_width: f32) {
        let rect = self.widget_rect;
        if background.a > 0.0 {
            self.renderer.fill_rect(rect, background);
        }
        if border_width > 0.0 && border.a > 0.0 {
            let half = border_width / 2.0;
            self.renderer
                .stroke_rect(rect.inset(half, half, half, half), &Stroke::new(border, border_width));
        }
    }
}

/// The core trait for all widgets.
///
/// # Required Methods
///
/// - [`widget_base()`](Self::widget_base) / [`widget_base_mut()`](Self::widget_base_mut)
/// - [`size_hint()`](Self::size_hint): preferred size for layout
/// - [`paint()`](Self::paint): draw the widget (children are painted by the
///   caller afterwards)
///
/// # Children
///
/// Containers expose their children by index through
/// [`child_count`](Self::child_count), [`child_at`](Self::child_at) and
/// [`child_at_mut`](Self::child_at_mut), in paint order. Hit-testing walks
/// them in reverse so the top-most child wins.
pub trait Widget: Send + Sync {
    /// Shared widget state.
    fn widget_base(&self) -> &WidgetBase;

    /// Mutable shared widget state.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Preferred, minimum and maximum size.
    fn size_hint(&self) -> SizeHint;

    /// Draw the widget in local coordinates.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Handle a widget event.
    ///
    /// Return `true` (and accept the event) if it was handled. Unhandled
    /// input events bubble to the parent.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }

    // =========================================================================
    // Layout and children
    // =========================================================================

    /// Position children within the widget's current size.
    fn layout(&mut self) {}

    /// Whether [`layout`](Self::layout) should run on the next pass.
    fn needs_layout(&self) -> bool {
        self.widget_base().needs_layout()
    }

    /// Number of children.
    fn child_count(&self) -> usize {
        0
    }

    /// Child at `index`, in paint order.
    fn child_at(&self, _index: usize) -> Option<&dyn Widget> {
        None
    }

    /// Mutable child at `index`, in paint order.
    fn child_at_mut(&mut self, _index: usize) -> Option<&mut dyn Widget> {
        None
    }

    // =========================================================================
    // Convenience accessors
    // =========================================================================

    /// The widget's id.
    fn id(&self) -> WidgetId {
        self.widget_base().id()
    }

    /// Geometry relative to the parent.
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Set the geometry relative to the parent.
    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    /// Layout size policy.
    fn size_policy(&self) -> SizePolicyPair {
        self.widget_base().size_policy()
    }

    /// Whether the widget is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Show or hide the widget.
    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    /// Whether the widget accepts input.
    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    /// Enable or disable the widget.
    fn set_enabled(&mut self, enabled: bool) {
        self.widget_base_mut().set_enabled(enabled);
    }

    /// Whether the widget has keyboard focus.
    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }

    /// Check if a point (in local coordinates) is inside the widget.
    fn contains_point(&self, point: Point) -> bool {
        self.widget_base().contains_point(point)
    }

    /// Request a repaint.
    fn update(&mut self) {
        self.widget_base_mut().update();
    }
}
