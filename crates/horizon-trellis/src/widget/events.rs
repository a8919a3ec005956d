//! Widget event types.
//!
//! Every hook a widget can receive is one variant of [`WidgetEvent`]. Events
//! carry an [`EventBase`] with an accepted flag: a widget accepts an event it
//! handled, and the dispatcher stops bubbling at the first acceptance.
//!
//! Positions are in the receiving widget's local coordinates. The dispatcher
//! translates them with [`WidgetEvent::translate`] as an event moves between
//! widgets.

use horizon_trellis_render::{Point, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Keys the toolkit's widgets react to.
///
/// Printable input arrives as [`KeyPressEvent::text`]; `Character` stands in
/// for any key that only produces text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,
    A,
    Character,
}

/// Why focus moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// A mouse click.
    Mouse,
    /// The Tab key.
    Tab,
    /// Shift+Tab.
    Backtab,
    /// A programmatic or other change.
    #[default]
    Other,
}

/// Common data for all widget events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create a new, unaccepted event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

// ============================================================================
// Mouse events
// ============================================================================

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse release event.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    /// Create a new mouse release event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse double-click event, sent after the second press of a double click.
#[derive(Debug, Clone, Copy)]
pub struct MouseDoubleClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was double-clicked.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseDoubleClickEvent {
    /// Create a new double-click event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse move event.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Buttons held during the move.
    pub buttons: Option<MouseButton>,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a new mouse move event.
    pub fn new(
        local_pos: Point,
        window_pos: Point,
        buttons: Option<MouseButton>,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            window_pos,
            buttons,
            modifiers,
        }
    }
}

/// Mouse wheel event.
///
/// Deltas are in wheel notches; positive `delta_y` scrolls up (away from the user).
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Horizontal scroll delta (positive = right).
    pub delta_x: f32,
    /// Vertical scroll delta (positive = up).
    pub delta_y: f32,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl WheelEvent {
    /// Create a new wheel event.
    pub fn new(
        local_pos: Point,
        window_pos: Point,
        delta_x: f32,
        delta_y: f32,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            window_pos,
            delta_x,
            delta_y,
            modifiers,
        }
    }
}

/// The pointer entered the widget.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// The pointer left the widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Focus and keyboard events
// ============================================================================

/// The widget received keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// Why focus moved.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// The widget lost keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// Why focus moved.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Key press event.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Text produced by the key press; empty for non-printable keys.
    pub text: String,
    /// Whether this is a key repeat event.
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            text: text.into(),
            is_repeat: false,
        }
    }

    /// Key press for typed text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Key::Character, KeyboardModifiers::NONE, text)
    }
}

/// Key release event.
#[derive(Debug, Clone, Copy)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }
}

/// The widget's size changed.
#[derive(Debug, Clone, Copy)]
pub struct ResizeEvent {
    /// Base event data.
    pub base: EventBase,
    /// The old size of the widget.
    pub old_size: Size,
    /// The new size of the widget.
    pub new_size: Size,
}

impl ResizeEvent {
    /// Create a new resize event.
    pub fn new(old_size: Size, new_size: Size) -> Self {
        Self {
            base: EventBase::new(),
            old_size,
            new_size,
        }
    }
}

// ============================================================================
// WidgetEvent
// ============================================================================

/// Every event a widget can receive.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    /// Mouse press event.
    MousePress(MousePressEvent),
    /// Mouse release event.
    MouseRelease(MouseReleaseEvent),
    /// Mouse double-click event.
    DoubleClick(MouseDoubleClickEvent),
    /// Mouse move event.
    MouseMove(MouseMoveEvent),
    /// Mouse wheel event.
    Wheel(WheelEvent),
    /// Mouse enter event.
    Enter(EnterEvent),
    /// Mouse leave event.
    Leave(LeaveEvent),
    /// Focus in event.
    FocusIn(FocusInEvent),
    /// Focus out event.
    FocusOut(FocusOutEvent),
    /// Key press event.
    KeyPress(KeyPressEvent),
    /// Key release event.
    KeyRelease(KeyReleaseEvent),
    /// Resize event.
    Resize(ResizeEvent),
}

impl WidgetEvent {
    fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::DoubleClick(e) => &e.base,
            Self::MouseMove(e) => &e.base,
            Self::Wheel(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
            Self::FocusIn(e) => &e.base,
            Self::FocusOut(e) => &e.base,
            Self::KeyPress(e) => &e.base,
            Self::KeyRelease(e) => &e.base,
            Self::Resize(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::DoubleClick(e) => &mut e.base,
            Self::MouseMove(e) => &mut e.base,
            Self::Wheel(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
            Self::FocusIn(e) => &mut e.base,
            Self::FocusOut(e) => &mut e.base,
            Self::KeyPress(e) => &mut e.base,
            Self::KeyRelease(e) => &mut e.base,
            Self::Resize(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }

    /// Check if this event should propagate to the parent widget.
    ///
    /// Input events propagate until accepted. Enter, leave, focus and resize
    /// events concern one widget only.
    pub fn should_propagate(&self) -> bool {
        match self {
            Self::MousePress(_)
            | Self::MouseRelease(_)
            | Self::DoubleClick(_)
            | Self::MouseMove(_)
            | Self::Wheel(_)
            | Self::KeyPress(_)
            | Self::KeyRelease(_) => !self.is_accepted(),
            Self::Enter(_)
            | Self::Leave(_)
            | Self::FocusIn(_)
            | Self::FocusOut(_)
            | Self::Resize(_) => false,
        }
    }

    /// The local position carried by pointer events.
    pub fn local_pos(&self) -> Option<Point> {
        match self {
            Self::MousePress(e) => Some(e.local_pos),
            Self::MouseRelease(e) => Some(e.local_pos),
            Self::DoubleClick(e) => Some(e.local_pos),
            Self::MouseMove(e) => Some(e.local_pos),
            Self::Wheel(e) => Some(e.local_pos),
            Self::Enter(e) => Some(e.local_pos),
            _ => None,
        }
    }

    /// Shift the local position of pointer events by `offset`.
    ///
    /// Moving an event from a child to its parent adds the child's origin;
    /// moving it from a parent into a child subtracts it.
    pub fn translate(&mut self, offset: Point) {
        match self {
            Self::MousePress(e) => e.local_pos = e.local_pos + offset,
            Self::MouseRelease(e) => e.local_pos = e.local_pos + offset,
            Self::DoubleClick(e) => e.local_pos = e.local_pos + offset,
            Self::MouseMove(e) => e.local_pos = e.local_pos + offset,
            Self::Wheel(e) => e.local_pos = e.local_pos + offset,
            Self::Enter(e) => e.local_pos = e.local_pos + offset,
            _ => {}
        }
    }

    /// Short name of the variant, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MousePress(_) => "MousePress",
            Self::MouseRelease(_) => "MouseRelease",
            Self::DoubleClick(_) => "DoubleClick",
            Self::MouseMove(_) => "MouseMove",
            Self::Wheel(_) => "Wheel",
            Self::Enter(_) => "Enter",
            Self::Leave(_) => "Leave",
            Self::FocusIn(_) => "FocusIn",
            Self::FocusOut(_) => "FocusOut",
            Self::KeyPress(_) => "KeyPress",
            Self::KeyRelease(_) => "KeyRelease",
            Self::Resize(_) => "Resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_stops_propagation() {
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            Point::new(1.0, 2.0),
            Point::new(1.0, 2.0),
            KeyboardModifiers::NONE,
        ));
        assert!(event.should_propagate());
        event.accept();
        assert!(event.is_accepted());
        assert!(!event.should_propagate());
        event.ignore();
        assert!(event.should_propagate());
    }

    #[test]
    fn test_focus_events_do_not_propagate() {
        let event = WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Tab));
        assert!(!event.should_propagate());
    }

    #[test]
    fn test_translate_moves_pointer_events_only() {
        let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(
            Point::new(5.0, 5.0),
            Point::new(50.0, 50.0),
            None,
            KeyboardModifiers::NONE,
        ));
        event.translate(Point::new(-2.0, 3.0));
        assert_eq!(event.local_pos(), Some(Point::new(3.0, 8.0)));

        let mut key = WidgetEvent::KeyPress(KeyPressEvent::text("a"));
        key.translate(Point::new(1.0, 1.0));
        assert_eq!(key.local_pos(), None);
    }

    #[test]
    fn test_modifier_consts() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::CTRL.control);
        assert!(KeyboardModifiers::CTRL_SHIFT.any());
    }
}
