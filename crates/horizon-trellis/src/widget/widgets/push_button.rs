//! Push button widget implementation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widgets::PushButton;
//!
//! let ctx = UiContext::headless();
//! let button = PushButton::new(&ctx, "Click me!");
//!
//! let clicks = Arc::new(AtomicUsize::new(0));
//! let counter = clicks.clone();
//! button.clicked().connect(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! button.click();
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! ```

use horizon_trellis_core::Signal;
use horizon_trellis_style::class;

use super::abstract_button::{AbstractButton, ButtonState};
use crate::context::UiContext;
use crate::widget::{
    Key, KeyPressEvent, MouseButton, MousePressEvent, MouseReleaseEvent, PaintContext, SizeHint, Widget,
    WidgetBase, WidgetEvent,
};

/// A standard push button.
///
/// # Visual States
///
/// - **Normal**: idle
/// - **Hovered**: pointer over the button
/// - **Armed**: held down with the pointer inside
///
/// Leaving the button while it is held shows `Normal`; coming back shows
/// `Armed` again. Releasing inside emits `clicked`; `released` fires on
/// every release.
///
/// # Signals
///
/// - `clicked`: the button was activated
/// - `pressed`: the mouse button went down on the button
/// - `released`: the mouse button went up after a press
pub struct PushButton {
    inner: AbstractButton,
}

impl PushButton {
    /// Create a push button.
    pub fn new(ctx: &UiContext, text: impl Into<String>) -> Self {
        Self::with_class(ctx, class::BUTTON, text)
    }

    /// Create a push button styled as `class`.
    pub(crate) fn with_class(ctx: &UiContext, class: &'static str, text: impl Into<String>) -> Self {
        Self {
            inner: AbstractButton::new(ctx, class, text),
        }
    }

    // =========================================================================
    // Delegated accessors
    // =========================================================================

    /// The button's text.
    pub fn text(&self) -> &str {
        self.inner.text()
    }

    /// Set the button's text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.inner.set_text(text);
    }

    /// The visual state.
    pub fn state(&self) -> ButtonState {
        self.inner.state()
    }

    /// The shared button implementation.
    pub fn inner(&self) -> &AbstractButton {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut AbstractButton {
        &mut self.inner
    }

    /// Emitted when the button is activated.
    pub fn clicked(&self) -> &Signal<()> {
        &self.inner.clicked
    }

    /// Emitted when the button is pressed down.
    pub fn pressed(&self) -> &Signal<()> {
        &self.inner.pressed
    }

    /// Emitted when the button is released.
    pub fn released(&self) -> &Signal<()> {
        &self.inner.released
    }

    /// Activate the button programmatically.
    pub fn click(&self) {
        self.inner.notify_pressed();
        self.inner.notify_released();
        self.inner.notify_clicked();
    }

    // =========================================================================
    // Input handling
    // =========================================================================

    pub(crate) fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left || !self.inner.base().is_enabled() {
            return false;
        }
        self.inner.base_mut().set_pressed(true);
        self.inner.set_state(ButtonState::Armed);
        self.inner.notify_pressed();
        true
    }

    fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left || !self.inner.base().is_pressed() {
            return false;
        }
        self.inner.base_mut().set_pressed(false);
        let inside = self.inner.base().contains_point(event.local_pos);
        self.inner
            .set_state(if inside { ButtonState::Hovered } else { ButtonState::Normal });
        self.inner.notify_released();
        if inside {
            self.inner.notify_clicked();
        }
        true
    }

    fn handle_enter(&mut self) {
        let state = if self.inner.base().is_pressed() {
            ButtonState::Armed
        } else {
            ButtonState::Hovered
        };
        self.inner.set_state(state);
    }

    fn handle_leave(&mut self) {
        self.inner.set_state(ButtonState::Normal);
    }

    pub(crate) fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if event.is_repeat || !matches!(event.key, Key::Space | Key::Enter) {
            return false;
        }
        self.click();
        true
    }
}

impl Widget for PushButton {
    fn widget_base(&self) -> &WidgetBase {
        self.inner.base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.inner.base_mut()
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
                self.handle_enter();
                true
            }
            WidgetEvent::Leave(_) => {
                self.handle_leave();
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

static_assertions::assert_impl_all!(PushButton: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{EnterEvent, KeyboardModifiers, LeaveEvent};
    use horizon_trellis_render::{Point, Rect};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn setup() -> PushButton {
        let ctx = UiContext::headless();
        let mut button = PushButton::new(&ctx, "OK");
        button.set_geometry(Rect::new(0.0, 0.0, 80.0, 30.0));
        button
    }

    fn press(x: f32, y: f32) -> WidgetEvent {
        let p = Point::new(x, y);
        WidgetEvent::MousePress(MousePressEvent::new(MouseButton::Left, p, p, KeyboardModifiers::NONE))
    }

    fn release(x: f32, y: f32) -> WidgetEvent {
        let p = Point::new(x, y);
        WidgetEvent::MouseRelease(MouseReleaseEvent::new(MouseButton::Left, p, p, KeyboardModifiers::NONE))
    }

    fn record(button: &PushButton) -> Arc<Mutex<Vec<&'static str>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = log.clone();
        button.pressed().connect(move |_| l.lock().push("pressed"));
        let l = log.clone();
        button.released().connect(move |_| l.lock().push("released"));
        let l = log.clone();
        button.clicked().connect(move |_| l.lock().push("clicked"));
        log
    }

    #[test]
    fn test_press_release_inside_clicks() {
        let mut button = setup();
        let log = record(&button);

        assert!(button.event(&mut press(10.0, 10.0)));
        assert_eq!(button.state(), ButtonState::Armed);
        assert!(button.event(&mut release(10.0, 10.0)));
        assert_eq!(button.state(), ButtonState::Hovered);
        assert_eq!(*log.lock(), vec!["pressed", "released", "clicked"]);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut button = setup();
        let log = record(&button);

        button.event(&mut press(10.0, 10.0));
        button.event(&mut WidgetEvent::Leave(LeaveEvent::new()));
        assert_eq!(button.state(), ButtonState::Normal);
        button.event(&mut WidgetEvent::Enter(EnterEvent::new(Point::new(5.0, 5.0))));
        assert_eq!(button.state(), ButtonState::Armed);
        button.event(&mut WidgetEvent::Leave(LeaveEvent::new()));
        button.event(&mut release(200.0, 10.0));

        assert_eq!(button.state(), ButtonState::Normal);
        assert_eq!(*log.lock(), vec!["pressed", "released"]);
    }

    #[test]
    fn test_right_button_ignored() {
        let mut button = setup();
        let p = Point::new(1.0, 1.0);
        let mut event =
            WidgetEvent::MousePress(MousePressEvent::new(MouseButton::Right, p, p, KeyboardModifiers::NONE));
        assert!(!button.event(&mut event));
        assert!(!event.is_accepted());
    }

    #[test]
    fn test_space_activates() {
        let mut button = setup();
        let log = record(&button);
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::Space, KeyboardModifiers::NONE, " "));
        assert!(button.event(&mut event));
        assert_eq!(log.lock().last(), Some(&"clicked"));
    }
}
