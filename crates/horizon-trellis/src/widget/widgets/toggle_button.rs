//! Toggle button: a push button that stays down while checked.
//!
//! Clicking a toggle button flips its checked state. A checked button is
//! shown [`Armed`](ButtonState::Armed) whether or not the pointer is over
//! it; an unchecked one behaves like a push button.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widgets::{ButtonState, ToggleButton};
//!
//! let ctx = UiContext::headless();
//! let mut toggle = ToggleButton::new(&ctx, "Bold");
//! toggle.toggled.connect(|checked| println!("bold: {checked}"));
//!
//! toggle.set_checked(true);
//! assert!(toggle.is_checked());
//! assert_eq!(toggle.state(), ButtonState::Armed);
//! ```

use horizon_trellis_core::logging::targets;
use horizon_trellis_core::{Property, Signal};
use horizon_trellis_style::class;

use super::abstract_button::ButtonState;
use super::push_button::PushButton;
use crate::context::UiContext;
use crate::widget::{
    KeyPressEvent, MousePressEvent, MouseReleaseEvent, PaintContext, SizeHint, Widget, WidgetBase, WidgetEvent,
};

/// A two-state button.
///
/// # Signals
///
/// - `toggled`: the checked state changed (carries the new state)
/// - `clicked()`, `pressed()`, `released()`: as for [`PushButton`]
pub struct ToggleButton {
    inner: PushButton,
    checked: Property<bool>,

    /// Emitted with the new state when the checked state changes.
    pub toggled: Signal<bool>,
}

impl ToggleButton {
    /// Create an unchecked toggle button.
    pub fn new(ctx: &UiContext, text: impl Into<String>) -> Self {
        Self {
            inner: PushButton::with_class(ctx, class::TOGGLE_BUTTON, text),
            checked: Property::new(false),
            toggled: Signal::new(),
        }
    }

    /// Builder: start checked.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    /// The button's text.
    pub fn text(&self) -> &str {
        self.inner.text()
    }

    /// The visual state.
    pub fn state(&self) -> ButtonState {
        self.inner.state()
    }

    /// Whether the button is checked.
    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    /// Set the checked state.
    ///
    /// Setting the current value again does nothing. A change moves the
    /// button to `Armed` (checked) or `Normal` (unchecked) and emits
    /// `toggled`.
    pub fn set_checked(&mut self, checked: bool) {
        if !self.checked.set(checked) {
            return;
        }
        let state = if checked { ButtonState::Armed } else { ButtonState::Normal };
        self.inner.inner_mut().set_state(state);
        tracing::debug!(target: targets::WIDGET, button = %self.inner.id(), checked, "toggled");
        self.toggled.emit(checked);
    }

    /// Flip the checked state.
    pub fn toggle(&mut self) {
        let checked = !self.is_checked();
        self.set_checked(checked);
    }

    /// Emitted when the button is activated.
    pub fn clicked(&self) -> &Signal<()> {
        self.inner.clicked()
    }

    /// Emitted when the button is pressed down.
    pub fn pressed(&self) -> &Signal<()> {
        self.inner.pressed()
    }

    /// Emitted when the button is released.
    pub fn released(&self) -> &Signal<()> {
        self.inner.released()
    }

    // =========================================================================
    // Input handling
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if !self.inner.handle_mouse_press(event) {
            return false;
        }
        self.inner.inner_mut().set_state(ButtonState::Armed);
        true
    }

    fn handle_mouse_release(&mut self, _event: &MouseReleaseEvent) -> bool {
        if !self.inner.widget_base().is_pressed() {
            return false;
        }
        self.inner.widget_base_mut().set_pressed(false);
        self.toggle();
        if !self.is_checked() {
            self.inner.inner_mut().set_state(ButtonState::Hovered);
        }
        self.inner.inner().notify_clicked();
        self.inner.inner().notify_released();
        true
    }

    fn handle_hover(&mut self, entered: bool) {
        let state = match (self.is_checked(), entered) {
            (true, _) => ButtonState::Armed,
            (false, true) => ButtonState::Hovered,
            (false, false) => ButtonState::Normal,
        };
        self.inner.inner_mut().set_state(state);
    }

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if !self.inner.handle_key_press(event) {
            return false;
        }
        self.toggle();
        true
    }
}

impl Widget for ToggleButton {
    fn widget_base(&self) -> &WidgetBase {
        self.inner.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.inner.widget_base_mut()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        self.inner.paint(ctx);
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let handled = match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            WidgetEvent::Enter(_) => {
                self.handle_hover(true);
                true
            }
            WidgetEvent::Leave(_) => {
                self.handle_hover(false);
                true
            }
            _ => false,
        };
        if handled {
            event.accept();
        }
        handled
    }
}

static_assertions::assert_impl_all!(ToggleButton: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{EnterEvent, KeyboardModifiers, LeaveEvent, MouseButton};
    use horizon_trellis_render::{Point, Rect};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> ToggleButton {
        let ctx = UiContext::headless();
        let mut button = ToggleButton::new(&ctx, "Bold");
        button.set_geometry(Rect::new(0.0, 0.0, 80.0, 30.0));
        button
    }

    fn click(button: &mut ToggleButton) {
        let p = Point::new(5.0, 5.0);
        button.event(&mut WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            p,
            p,
            KeyboardModifiers::NONE,
        )));
        button.event(&mut WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            p,
            p,
            KeyboardModifiers::NONE,
        )));
    }

    #[test]
    fn test_set_checked_is_idempotent() {
        let mut button = setup();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        button.toggled.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        button.set_checked(true);
        button.set_checked(true);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(button.state(), ButtonState::Armed);

        button.set_checked(false);
        assert_eq!(button.state(), ButtonState::Normal);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_click_cycle() {
        let mut button = setup();
        let clicks = Arc::new(AtomicUsize::new(0));
        let c = clicks.clone();
        button.clicked().connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        click(&mut button);
        assert!(button.is_checked());
        assert_eq!(button.state(), ButtonState::Armed);

        click(&mut button);
        assert!(!button.is_checked());
        assert_eq!(button.state(), ButtonState::Hovered);
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hover_keeps_checked_armed() {
        let mut button = setup();
        button.event(&mut WidgetEvent::Enter(EnterEvent::new(Point::ZERO)));
        assert_eq!(button.state(), ButtonState::Hovered);
        button.event(&mut WidgetEvent::Leave(LeaveEvent::new()));
        assert_eq!(button.state(), ButtonState::Normal);

        button.set_checked(true);
        button.event(&mut WidgetEvent::Enter(EnterEvent::new(Point::ZERO)));
        assert_eq!(button.state(), ButtonState::Armed);
        button.event(&mut WidgetEvent::Leave(LeaveEvent::new()));
        assert_eq!(button.state(), ButtonState::Armed);
    }
}
