//! Event dispatching and propagation for widgets.
//!
//! # Event Flow
//!
//! 1. **Targeting**: pointer events go to the deepest visible widget under
//!    the pointer, or to the widget holding the pointer capture. Key events
//!    go to the focused widget (or the root when nothing has focus).
//!
//! 2. **Widget Handler**: the target's `event()` runs with the event in its
//!    local coordinates. Disabled widgets are skipped.
//!
//! 3. **Propagation**: if the widget didn't accept the event and the event
//!    type supports propagation, the event moves to the parent with its
//!    position translated. This continues until a widget accepts it or the
//!    root is reached.
//!
//! The dispatcher also derives the events no platform delivers directly:
//! `Enter`/`Leave` from pointer movement, double clicks from press timing,
//! and focus changes from clicks and Tab.

use std::time::{Duration, Instant};

use horizon_trellis_core::ToolkitConfig;
use horizon_trellis_core::logging::targets;
use horizon_trellis_render::Point;

use super::base::WidgetId;
use super::events::{
    EnterEvent, FocusReason, Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, LeaveEvent,
    MouseButton, MouseDoubleClickEvent, MouseMoveEvent, MousePressEvent, MouseReleaseEvent,
    WheelEvent, WidgetEvent,
};
use super::focus::FocusManager;
use super::traits::Widget;
use super::tree::{self, WidgetPath};

/// Raw input in window (root-local) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The pointer moved.
    MouseMove {
        pos: Point,
        modifiers: KeyboardModifiers,
    },
    /// A mouse button went down.
    MousePress {
        pos: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    },
    /// A mouse button went up.
    MouseRelease {
        pos: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    },
    /// The wheel turned; deltas in notches, positive `delta_y` is up.
    Wheel {
        pos: Point,
        delta_x: f32,
        delta_y: f32,
        modifiers: KeyboardModifiers,
    },
    /// A key went down.
    KeyPress {
        key: Key,
        modifiers: KeyboardModifiers,
        text: String,
    },
    /// A key went up.
    KeyRelease {
        key: Key,
        modifiers: KeyboardModifiers,
    },
    /// The pointer left the window.
    PointerLeave,
}

impl InputEvent {
    /// Left-button press without modifiers.
    pub fn press(x: f32, y: f32) -> Self {
        Self::MousePress {
            pos: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Left-button press with modifiers.
    pub fn press_with(x: f32, y: f32, modifiers: KeyboardModifiers) -> Self {
        Self::MousePress {
            pos: Point::new(x, y),
            button: MouseButton::Left,
            modifiers,
        }
    }

    /// Left-button release without modifiers.
    pub fn release(x: f32, y: f32) -> Self {
        Self::MouseRelease {
            pos: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Pointer move without modifiers.
    pub fn move_to(x: f32, y: f32) -> Self {
        Self::MouseMove {
            pos: Point::new(x, y),
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Key press without text.
    pub fn key(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::KeyPress {
            key,
            modifiers,
            text: String::new(),
        }
    }

    /// Typed text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::KeyPress {
            key: Key::Character,
            modifiers: KeyboardModifiers::NONE,
            text: text.into(),
        }
    }

    fn pos(&self) -> Option<Point> {
        match self {
            Self::MouseMove { pos, .. }
            | Self::MousePress { pos, .. }
            | Self::MouseRelease { pos, .. }
            | Self::Wheel { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// A widget accepted the event.
    Accepted(WidgetId),
    /// The event reached no widget that accepted it.
    Ignored,
    /// There was no widget to deliver to.
    NoTarget,
}

impl DispatchResult {
    /// Check if the event was handled.
    pub fn was_handled(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct LastClick {
    at: Instant,
    pos: Point,
    button: MouseButton,
    target: WidgetId,
}

/// Routes [`InputEvent`]s into a widget tree.
#[derive(Debug)]
pub struct EventDispatcher {
    double_click_interval: Duration,
    double_click_distance: f32,
    hovered: Vec<WidgetId>,
    capture: Option<(WidgetPath, WidgetId, MouseButton)>,
    last_click: Option<LastClick>,
    focus: FocusManager,
}

impl EventDispatcher {
    /// Create a dispatcher using the timing thresholds from `config`.
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            double_click_interval: config.double_click_interval(),
            double_click_distance: config.double_click_distance,
            hovered: Vec::new(),
            capture: None,
            last_click: None,
            focus: FocusManager::new(),
        }
    }

    /// The focused widget's id.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused_id()
    }

    /// Ids of the widgets under the pointer, root first.
    pub fn hovered(&self) -> &[WidgetId] {
        &self.hovered
    }

    /// The widget holding the pointer capture.
    pub fn captured(&self) -> Option<WidgetId> {
        self.capture.as_ref().map(|(_, id, _)| *id)
    }

    /// Give focus to the widget with `id`. Returns `false` if it is not in
    /// the tree.
    pub fn set_focus(&mut self, root: &mut dyn Widget, id: WidgetId) -> bool {
        match tree::find_path(root, id) {
            Some(path) => {
                self.focus.set_focus(root, Some(path), FocusReason::Other);
                true
            }
            None => false,
        }
    }

    /// Remove focus from whichever widget has it.
    pub fn clear_focus(&mut self, root: &mut dyn Widget) {
        self.focus.set_focus(root, None, FocusReason::Other);
    }

    /// Dispatch `input` using the current time.
    pub fn dispatch(&mut self, root: &mut dyn Widget, input: InputEvent) -> DispatchResult {
        self.dispatch_at(root, input, Instant::now())
    }

    /// Dispatch `input` as if it happened at `now`.
    #[tracing::instrument(
        name = "dispatch",
        target = "horizon_trellis::dispatch",
        level = "trace",
        skip_all
    )]
    pub fn dispatch_at(
        &mut self,
        root: &mut dyn Widget,
        input: InputEvent,
        now: Instant,
    ) -> DispatchResult {
        if let Some(pos) = input.pos() {
            self.update_hover(root, Some(pos));
        }

        match input {
            InputEvent::MouseMove { pos, modifiers } => {
                let buttons = self.capture.as_ref().map(|(_, _, button)| *button);
                let event = WidgetEvent::MouseMove(MouseMoveEvent::new(pos, pos, buttons, modifiers));
                self.deliver_pointer(root, pos, event)
            }
            InputEvent::MousePress {
                pos,
                button,
                modifiers,
            } => self.press(root, pos, button, modifiers, now),
            InputEvent::MouseRelease {
                pos,
                button,
                modifiers,
            } => {
                let event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(button, pos, pos, modifiers));
                let result = self.deliver_pointer(root, pos, event);
                if self
                    .capture
                    .as_ref()
                    .is_some_and(|(_, _, held)| *held == button)
                {
                    self.capture = None;
                }
                result
            }
            InputEvent::Wheel {
                pos,
                delta_x,
                delta_y,
                modifiers,
            } => {
                let event = WidgetEvent::Wheel(WheelEvent::new(pos, pos, delta_x, delta_y, modifiers));
                match tree::hit_test(root, pos) {
                    Some(path) => deliver(root, &path, pos, event),
                    None => DispatchResult::NoTarget,
                }
            }
            InputEvent::KeyPress {
                key,
                modifiers,
                text,
            } => {
                if key == Key::Tab && !modifiers.control && !modifiers.alt {
                    let moved = self.focus.focus_next(root, !modifiers.shift);
                    return match (moved, self.focus.focused_id()) {
                        (true, Some(id)) => DispatchResult::Accepted(id),
                        _ => DispatchResult::Ignored,
                    };
                }
                let event = WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers, text));
                self.deliver_key(root, event)
            }
            InputEvent::KeyRelease { key, modifiers } => {
                let event = WidgetEvent::KeyRelease(KeyReleaseEvent::new(key, modifiers));
                self.deliver_key(root, event)
            }
            InputEvent::PointerLeave => {
                self.update_hover(root, None);
                DispatchResult::Ignored
            }
        }
    }

    fn press(
        &mut self,
        root: &mut dyn Widget,
        pos: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
        now: Instant,
    ) -> DispatchResult {
        let Some(path) = tree::hit_test(root, pos) else {
            self.last_click = None;
            return DispatchResult::NoTarget;
        };
        let Some(target) = tree::resolve(root, &path).map(|w| w.id()) else {
            return DispatchResult::NoTarget;
        };

        self.focus_on_click(root, &path);

        let is_double = self.last_click.is_some_and(|last| {
            last.button == button
                && last.target == target
                && now.saturating_duration_since(last.at) <= self.double_click_interval
                && last.pos.distance_to(pos) <= self.double_click_distance
        });

        let mut result = DispatchResult::Ignored;
        if is_double {
            self.last_click = None;
            let event = WidgetEvent::DoubleClick(MouseDoubleClickEvent::new(button, pos, pos, modifiers));
            result = deliver(root, &path, pos, event);
            tracing::trace!(target: targets::DISPATCH, widget = %target, handled = result.was_handled(), "double click");
        } else {
            self.last_click = Some(LastClick {
                at: now,
                pos,
                button,
                target,
            });
        }

        // An unhandled double click is a plain press for the widgets below.
        if !result.was_handled() {
            let event = WidgetEvent::MousePress(MousePressEvent::new(button, pos, pos, modifiers));
            result = deliver(root, &path, pos, event);
        }

        if let DispatchResult::Accepted(id) = result
            && let Some(grab_path) = tree::find_path(root, id)
        {
            self.capture = Some((grab_path, id, button));
        }
        result
    }

    fn focus_on_click(&mut self, root: &mut dyn Widget, path: &[usize]) {
        for depth in (0..=path.len()).rev() {
            let Some(widget) = tree::resolve(root, &path[..depth]) else {
                continue;
            };
            if widget.is_enabled() && widget.widget_base().focus_policy().accepts_click() {
                self.focus
                    .set_focus(root, Some(path[..depth].to_vec()), FocusReason::Mouse);
                return;
            }
        }
    }

    fn deliver_pointer(&mut self, root: &mut dyn Widget, pos: Point, event: WidgetEvent) -> DispatchResult {
        if let Some((path, id, button)) = self.capture.take() {
            if let Some(path) = tree::revalidate(root, &path, id) {
                let result = deliver(root, &path, pos, event);
                self.capture = Some((path, id, button));
                return result;
            }
            tracing::debug!(target: targets::DISPATCH, widget = %id, "captured widget left the tree");
        }
        match tree::hit_test(root, pos) {
            Some(path) => deliver(root, &path, pos, event),
            None => DispatchResult::NoTarget,
        }
    }

    fn deliver_key(&mut self, root: &mut dyn Widget, event: WidgetEvent) -> DispatchResult {
        let path = self.focus.focused_path(root).unwrap_or_default();
        deliver(root, &path, Point::ZERO, event)
    }

    /// Send `Leave` to widgets no longer under the pointer (deepest first)
    /// and `Enter` to widgets newly under it (outermost first).
    fn update_hover(&mut self, root: &mut dyn Widget, pos: Option<Point>) {
        let new_path = pos.and_then(|pos| tree::hit_test(root, pos));
        let new_ids = new_path
            .as_ref()
            .and_then(|path| tree::id_chain(root, path))
            .unwrap_or_default();

        if new_ids == self.hovered {
            return;
        }

        let old_ids = std::mem::take(&mut self.hovered);
        for id in old_ids.iter().rev().filter(|id| !new_ids.contains(id)) {
            if let Some(path) = tree::find_path(root, *id)
                && let Some(widget) = tree::resolve_mut(root, &path)
            {
                widget.widget_base_mut().set_hovered(false);
                if widget.is_enabled() {
                    widget.event(&mut WidgetEvent::Leave(LeaveEvent::new()));
                }
            }
        }

        if let (Some(path), Some(pos)) = (&new_path, pos) {
            for depth in 0..=path.len() {
                let id = new_ids[depth];
                if old_ids.contains(&id) {
                    continue;
                }
                let local = tree::map_to_path(root, &path[..depth], pos).unwrap_or(pos);
                if let Some(widget) = tree::resolve_mut(root, &path[..depth]) {
                    widget.widget_base_mut().set_hovered(true);
                    if widget.is_enabled() {
                        widget.event(&mut WidgetEvent::Enter(EnterEvent::new(local)));
                    }
                }
            }
        }

        self.hovered = new_ids;
    }
}

/// Deliver `event` (positioned at root-local `pos`) to the widget at `path`
/// and bubble it towards the root until accepted.
pub fn deliver(root: &mut dyn Widget, path: &[usize], pos: Point, mut event: WidgetEvent) -> DispatchResult {
    let (Some(ids), Some(origins)) = (tree::id_chain(root, path), tree::origin_chain(root, path)) else {
        return DispatchResult::NoTarget;
    };

    let local = origins.iter().fold(pos, |p, origin| p - *origin);
    if let Some(current) = event.local_pos() {
        event.translate(local - current);
    }

    for depth in (0..=path.len()).rev() {
        let Some(widget) = tree::resolve_mut(root, &path[..depth]) else {
            return DispatchResult::NoTarget;
        };
        if widget.id() != ids[depth] {
            return DispatchResult::NoTarget;
        }

        if widget.is_enabled() && widget.event(&mut event) {
            event.accept();
        }
        if event.is_accepted() {
            tracing::trace!(
                target: targets::DISPATCH,
                event = event.name(),
                widget = %ids[depth],
                "event accepted"
            );
            return DispatchResult::Accepted(ids[depth]);
        }
        if !event.should_propagate() {
            break;
        }
        if depth > 0 {
            event.translate(origins[depth - 1]);
        }
    }
    DispatchResult::Ignored
}

static_assertions::assert_impl_all!(EventDispatcher: Send, Sync);
