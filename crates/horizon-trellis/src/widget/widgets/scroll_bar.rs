//! Scroll bar widget implementation.
//!
//! A scroll bar selects an integer value in `[minimum, maximum]`. The thumb
//! length is proportional to the page step, so a scroll bar driving a view
//! should get the view's visible extent as its page step.
//!
//! # Interaction
//!
//! - Dragging the thumb moves the value proportionally.
//! - Pressing the track on either side of the thumb pages by `page_step`.
//! - The wheel scrolls by the configured wheel step.
//! - Arrow keys step by `single_step`, Page Up/Down by `page_step`,
//!   Home/End jump to the ends.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widgets::{Orientation, ScrollBar};
//!
//! let ctx = UiContext::headless();
//! let mut bar = ScrollBar::new(&ctx, Orientation::Vertical);
//! bar.set_range(0, 300);
//! bar.set_value(500);
//! assert_eq!(bar.value(), 300);
//! ```

use horizon_trellis_core::Signal;
use horizon_trellis_core::logging::targets;
use horizon_trellis_render::{Point, Rect, Size};
use horizon_trellis_style::class;

use crate::context::UiContext;
use crate::widget::{
    FocusPolicy, Key, KeyPressEvent, MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, PaintContext,
    SizeHint, SizePolicy, SizePolicyPair, WheelEvent, Widget, WidgetBase, WidgetEvent,
};

/// Direction of a scroll bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Part of the scroll bar under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollBarPart {
    None,
    TrackDecrease,
    Thumb,
    TrackIncrease,
}

/// A scroll bar.
///
/// # Signals
///
/// - `value_changed(i32)`: the value changed
/// - `range_changed((i32, i32))`: the range changed
/// - `slider_pressed()`: thumb drag started
/// - `slider_released()`: thumb drag ended
pub struct ScrollBar {
    base: WidgetBase,
    orientation: Orientation,
    minimum: i32,
    maximum: i32,
    value: i32,
    page_step: i32,
    single_step: i32,
    wheel_step: i32,
    thickness: f32,
    min_thumb_size: f32,
    dragging: bool,
    drag_start_pos: f32,
    drag_start_value: i32,
    hover_part: ScrollBarPart,

    /// Emitted when the value changes.
    pub value_changed: Signal<i32>,
    /// Emitted when the range changes.
    pub range_changed: Signal<(i32, i32)>,
    /// Emitted when a thumb drag starts.
    pub slider_pressed: Signal<()>,
    /// Emitted when a thumb drag ends.
    pub slider_released: Signal<()>,
}

impl ScrollBar {
    /// Create a scroll bar with range `[0, 100]`.
    pub fn new(ctx: &UiContext, orientation: Orientation) -> Self {
        let config = ctx.config();
        let mut base = WidgetBase::new(ctx, class::SCROLL_BAR);
        base.set_focus_policy(FocusPolicy::ClickFocus);
        base.set_size_policy(match orientation {
            Orientation::Horizontal => SizePolicyPair::new(SizePolicy::Expanding, SizePolicy::Fixed),
            Orientation::Vertical => SizePolicyPair::new(SizePolicy::Fixed, SizePolicy::Expanding),
        });

        Self {
            base,
            orientation,
            minimum: 0,
            maximum: 100,
            value: 0,
            page_step: 10,
            single_step: config.scroll_line_step.max(1),
            wheel_step: config.wheel_step().max(1),
            thickness: config.scrollbar_thickness,
            min_thumb_size: 16.0,
            dragging: false,
            drag_start_pos: 0.0,
            drag_start_value: 0,
            hover_part: ScrollBarPart::None,
            value_changed: Signal::new(),
            range_changed: Signal::new(),
            slider_pressed: Signal::new(),
            slider_released: Signal::new(),
        }
    }

    /// The orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    // =========================================================================
    // Value and range
    // =========================================================================

    /// Lower bound.
    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    /// Upper bound.
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// The range as `(minimum, maximum)`.
    pub fn range(&self) -> (i32, i32) {
        (self.minimum, self.maximum)
    }

    /// The current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Set the value, clamped to the range.
    pub fn set_value(&mut self, value: i32) {
        let clamped = value.clamp(self.minimum, self.maximum);
        if self.value != clamped {
            self.value = clamped;
            self.base.update();
            self.value_changed.emit(clamped);
        }
    }

    /// Set the range. Reversed bounds are swapped; the value is clamped into
    /// the new range.
    pub fn set_range(&mut self, minimum: i32, maximum: i32) {
        let (min, max) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };
        if self.minimum == min && self.maximum == max {
            return;
        }

        tracing::trace!(target: targets::WIDGET, scroll_bar = %self.base.id(), min, max, "range changed");
        self.minimum = min;
        self.maximum = max;
        let clamped = self.value.clamp(min, max);
        let value_changed = clamped != self.value;
        self.value = clamped;
        self.base.update();
        self.range_changed.emit((min, max));
        if value_changed {
            self.value_changed.emit(clamped);
        }
    }

    /// Builder form of [`set_range`](Self::set_range).
    pub fn with_range(mut self, minimum: i32, maximum: i32) -> Self {
        self.set_range(minimum, maximum);
        self
    }

    // =========================================================================
    // Step sizes
    // =========================================================================

    /// Amount moved by paging.
    pub fn page_step(&self) -> i32 {
        self.page_step
    }

    /// Set the page step (at least 1).
    pub fn set_page_step(&mut self, step: i32) {
        if self.page_step != step.max(1) {
            self.page_step = step.max(1);
            self.base.update();
        }
    }

    /// Amount moved by arrow keys.
    pub fn single_step(&self) -> i32 {
        self.single_step
    }

    /// Set the single step (at least 1).
    pub fn set_single_step(&mut self, step: i32) {
        self.single_step = step.max(1);
    }

    /// Amount moved by one wheel notch.
    pub fn wheel_step(&self) -> i32 {
        self.wheel_step
    }

    /// Width (vertical) or height (horizontal) of the bar.
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Whether the thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn along(&self, point: Point) -> f32 {
        match self.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    fn track_length(&self) -> f32 {
        let rect = self.base.rect();
        match self.orientation {
            Orientation::Horizontal => rect.width(),
            Orientation::Vertical => rect.height(),
        }
    }

    /// Thumb rectangle in local coordinates.
    pub fn thumb_rect(&self) -> Rect {
        let track = self.base.rect();
        let range = (self.maximum - self.minimum) as f32;
        if range <= 0.0 {
            return track;
        }

        let length = self.track_length();
        let ratio = (self.page_step as f32 / (range + self.page_step as f32)).min(1.0);
        let thumb = (length * ratio).max(self.min_thumb_size).min(length);
        let travel = length - thumb;
        let position = (self.value - self.minimum) as f32 / range * travel;

        match self.orientation {
            Orientation::Horizontal => Rect::new(position, 0.0, thumb, track.height()),
            Orientation::Vertical => Rect::new(0.0, position, track.width(), thumb),
        }
    }

    fn hit_test(&self, pos: Point) -> ScrollBarPart {
        if !self.base.rect().contains(pos) {
            return ScrollBarPart::None;
        }
        let thumb = self.thumb_rect();
        if thumb.contains(pos) {
            return ScrollBarPart::Thumb;
        }
        if self.along(pos) < self.along(thumb.origin) {
            ScrollBarPart::TrackDecrease
        } else {
            ScrollBarPart::TrackIncrease
        }
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        match self.hit_test(event.local_pos) {
            ScrollBarPart::Thumb => {
                self.dragging = true;
                self.drag_start_pos = self.along(event.local_pos);
                self.drag_start_value = self.value;
                self.base.update();
                self.slider_pressed.emit(());
                true
            }
            ScrollBarPart::TrackDecrease => {
                self.set_value(self.value - self.page_step);
                true
            }
            ScrollBarPart::TrackIncrease => {
                self.set_value(self.value + self.page_step);
                true
            }
            ScrollBarPart::None => false,
        }
    }

    fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left || !self.dragging {
            return false;
        }
        self.dragging = false;
        self.base.update();
        self.slider_released.emit(());
        true
    }

    fn handle_mouse_move(&mut self, event: &MouseMoveEvent) -> bool {
        let hover = self.hit_test(event.local_pos);
        if self.hover_part != hover {
            self.hover_part = hover;
            self.base.update();
        }
        if !self.dragging {
            return false;
        }

        let range = (self.maximum - self.minimum) as f32;
        let thumb = self.thumb_rect();
        let thumb_length = match self.orientation {
            Orientation::Horizontal => thumb.width(),
            Orientation::Vertical => thumb.height(),
        };
        let travel = self.track_length() - thumb_length;
        if travel > 0.0 && range > 0.0 {
            let delta = self.along(event.local_pos) - self.drag_start_pos;
            let delta_value = (delta / travel * range).round() as i32;
            self.set_value(self.drag_start_value + delta_value);
        }
        true
    }

    fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        let delta = match self.orientation {
            Orientation::Horizontal if event.delta_x != 0.0 => -event.delta_x,
            _ => event.delta_y,
        };
        if delta == 0.0 {
            return false;
        }
        let before = self.value;
        self.set_value(self.value - (delta * self.wheel_step as f32).round() as i32);
        self.value != before
    }

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        let (decrease, increase) = match self.orientation {
            Orientation::Horizontal => (Key::ArrowLeft, Key::ArrowRight),
            Orientation::Vertical => (Key::ArrowUp, Key::ArrowDown),
        };
        let target = match event.key {
            key if key == decrease => self.value - self.single_step,
            key if key == increase => self.value + self.single_step,
            Key::PageUp => self.value - self.page_step,
            Key::PageDown => self.value + self.page_step,
            Key::Home => self.minimum,
            Key::End => self.maximum,
            _ => return false,
        };
        self.set_value(target);
        true
    }
}

impl Widget for ScrollBar {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        let (preferred, minimum) = match self.orientation {
            Orientation::Horizontal => (
                Size::new(100.0, self.thickness),
                Size::new(self.min_thumb_size * 2.0, self.thickness),
            ),
            Orientation::Vertical => (
                Size::new(self.thickness, 100.0),
                Size::new(self.thickness, self.min_thumb_size * 2.0),
            ),
        };
        SizeHint::new(preferred).with_minimum(minimum)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        ctx.draw_frame(style.background, style.border_color, style.border_width);
        if self.maximum > self.minimum {
            let color = if self.dragging {
                style.pressed_background
            } else if self.hover_part == ScrollBarPart::Thumb {
                style.hover_background
            } else {
                style.foreground
            };
            let thumb = self.thumb_rect().inset(2.0, 2.0, 2.0, 2.0);
            ctx.renderer().fill_rect(thumb, color);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        let handled = match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::MouseMove(e) => self.handle_mouse_move(e),
            WidgetEvent::Wheel(e) => self.handle_wheel(e),
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            WidgetEvent::Leave(_) => {
                if self.hover_part != ScrollBarPart::None {
                    self.hover_part = ScrollBarPart::None;
                    self.base.update();
                }
                false
            }
            _ => false,
        };
        if handled {
            event.accept();
        }
        handled
    }
}

static_assertions::assert_impl_all!(ScrollBar: Send, Sync);
