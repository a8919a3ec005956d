//! Widget base implementation.
//!
//! `WidgetBase` holds the state every widget shares: identity, geometry,
//! size policy, visibility, focus and hover flags, invalidation flags, and
//! the widget's style.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_trellis_core::Signal;
use horizon_trellis_render::{Point, Rect, Size};
use horizon_trellis_style::Style;

use super::geometry::{SizePolicy, SizePolicyPair};
use crate::context::UiContext;

/// Process-unique widget identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a widget accepts keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPolicy {
    /// Never takes focus.
    #[default]
    NoFocus,
    /// Takes focus when clicked.
    ClickFocus,
    /// Takes focus through Tab navigation.
    TabFocus,
    /// Takes focus by click and by Tab.
    StrongFocus,
}

impl FocusPolicy {
    /// Focus on click.
    pub fn accepts_click(self) -> bool {
        matches!(self, Self::ClickFocus | Self::StrongFocus)
    }

    /// Focus through Tab navigation.
    pub fn accepts_tab(self) -> bool {
        matches!(self, Self::TabFocus | Self::StrongFocus)
    }
}

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and return it from
/// [`Widget::widget_base`](super::Widget::widget_base).
///
/// # Example
///
/// ```
/// use horizon_trellis::UiContext;
/// use horizon_trellis::widget::{PaintContext, SizeHint, Widget, WidgetBase};
///
/// struct Swatch {
///     base: WidgetBase,
/// }
///
/// impl Widget for Swatch {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///
///     fn size_hint(&self) -> SizeHint {
///         SizeHint::from_dimensions(24.0, 24.0)
///     }
///
///     fn paint(&self, ctx: &mut PaintContext<'_>) {
///         let rect = ctx.rect();
///         ctx.renderer().fill_rect(rect, self.base.style().background);
///     }
/// }
///
/// let ctx = UiContext::headless();
/// let swatch = Swatch { base: WidgetBase::new(&ctx, "Swatch") };
/// assert!(swatch.is_visible());
/// ```
pub struct WidgetBase {
    id: WidgetId,
    name: String,
    class: &'static str,
    geometry: Rect,
    size_policy: SizePolicyPair,
    visible: bool,
    enabled: bool,
    focus_policy: FocusPolicy,
    focused: bool,
    hovered: bool,
    pressed: bool,
    needs_layout: bool,
    needs_repaint: bool,
    style: Arc<Style>,

    /// Emitted when the geometry changes.
    pub geometry_changed: Signal<Rect>,

    /// Emitted when visibility changes.
    pub visible_changed: Signal<bool>,

    /// Emitted when the enabled state changes.
    pub enabled_changed: Signal<bool>,
}

impl WidgetBase {
    /// Create a widget base for a widget of `class`, styled from the
    /// context's skin.
    pub fn new(ctx: &UiContext, class: &'static str) -> Self {
        Self::with_style(class, ctx.style_for(class))
    }

    /// Create a widget base with an explicit style.
    pub fn with_style(class: &'static str, style: Arc<Style>) -> Self {
        Self {
            id: WidgetId::next(),
            name: String::new(),
            class,
            geometry: Rect::ZERO,
            size_policy: SizePolicyPair::default(),
            visible: true,
            enabled: true,
            focus_policy: FocusPolicy::NoFocus,
            focused: false,
            hovered: false,
            pressed: false,
            needs_layout: true,
            needs_repaint: true,
            style,
            geometry_changed: Signal::new(),
            visible_changed: Signal::new(),
            enabled_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The widget's id.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget's class name (also its skin key).
    #[inline]
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// The widget's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the widget's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Geometry relative to the parent.
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the geometry relative to the parent.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            let resized = self.geometry.size != rect.size;
            self.geometry = rect;
            if resized {
                self.needs_layout = true;
            }
            self.needs_repaint = true;
            self.geometry_changed.emit(rect);
        }
    }

    /// Position relative to the parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Move the widget within its parent.
    pub fn set_pos(&mut self, pos: Point) {
        self.set_geometry(Rect::from_origin_size(pos, self.geometry.size));
    }

    /// The widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Resize the widget.
    pub fn set_size(&mut self, size: Size) {
        self.set_geometry(Rect::from_origin_size(self.geometry.origin, size));
    }

    /// The widget's local rectangle (origin zero).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.geometry.at_origin()
    }

    /// Layout size policy.
    pub fn size_policy(&self) -> SizePolicyPair {
        self.size_policy
    }

    /// Set the layout size policy.
    pub fn set_size_policy(&mut self, policy: SizePolicyPair) {
        self.size_policy = policy;
        self.needs_layout = true;
    }

    /// Set the horizontal size policy.
    pub fn set_horizontal_policy(&mut self, policy: SizePolicy) {
        self.set_size_policy(SizePolicyPair::new(policy, self.size_policy.vertical));
    }

    /// Set the vertical size policy.
    pub fn set_vertical_policy(&mut self, policy: SizePolicy) {
        self.set_size_policy(SizePolicyPair::new(self.size_policy.horizontal, policy));
    }

    // =========================================================================
    // Visibility and enabled state
    // =========================================================================

    /// Whether the widget is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the widget.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.needs_repaint = true;
            self.visible_changed.emit(visible);
        }
    }

    /// Whether the widget accepts input.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the widget.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.needs_repaint = true;
            self.enabled_changed.emit(enabled);
        }
    }

    // =========================================================================
    // Focus, hover and press
    // =========================================================================

    /// How the widget accepts focus.
    pub fn focus_policy(&self) -> FocusPolicy {
        self.focus_policy
    }

    /// Set how the widget accepts focus.
    pub fn set_focus_policy(&mut self, policy: FocusPolicy) {
        self.focus_policy = policy;
    }

    /// Whether the widget has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.needs_repaint = true;
        }
    }

    /// Whether the pointer is over the widget.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Update the hover flag.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.needs_repaint = true;
        }
    }

    /// Whether a mouse button is held on the widget.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Update the pressed flag.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.needs_repaint = true;
        }
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Whether children need to be laid out again.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Mark the widget's layout dirty.
    pub fn invalidate_layout(&mut self) {
        self.needs_layout = true;
        self.needs_repaint = true;
    }

    pub(crate) fn clear_layout_flag(&mut self) {
        self.needs_layout = false;
    }

    /// Whether the widget needs to be repainted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    pub(crate) fn clear_repaint_flag(&mut self) {
        self.needs_repaint = false;
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// The widget's style.
    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The shared style handle.
    pub fn style_arc(&self) -> &Arc<Style> {
        &self.style
    }

    /// Replace the widget's style.
    pub fn set_style(&mut self, style: Arc<Style>) {
        self.style = style;
        self.invalidate_layout();
    }

    /// Whether this widget is the only holder of its style.
    pub fn has_unique_style(&self) -> bool {
        Arc::strong_count(&self.style) == 1
    }

    /// Mutable access to a style owned by this widget alone.
    ///
    /// The shared skin style is cloned on the first call; other widgets of
    /// the same class are unaffected.
    pub fn ensure_unique_style(&mut self) -> &mut Style {
        self.needs_layout = true;
        self.needs_repaint = true;
        Arc::make_mut(&mut self.style)
    }

    // =========================================================================
    // Coordinate mapping
    // =========================================================================

    /// Map a point from widget-local coordinates to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        point + self.geometry.origin
    }

    /// Map a point from parent coordinates to widget-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        point - self.geometry.origin
    }

    /// Check if a point (in local coordinates) is inside the widget.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(WidgetBase: Send, Sync);
