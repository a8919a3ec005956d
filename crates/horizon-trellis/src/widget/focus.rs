//! Keyboard focus tracking and Tab navigation.

use super::base::WidgetId;
use super::events::{FocusInEvent, FocusOutEvent, FocusReason, WidgetEvent};
use super::traits::Widget;
use super::tree::{self, WidgetPath};

/// Tracks which widget has keyboard focus.
#[derive(Debug, Default)]
pub struct FocusManager {
    focus: Option<(WidgetPath, WidgetId)>,
}

impl FocusManager {
    /// A manager with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused widget's id.
    pub fn focused_id(&self) -> Option<WidgetId> {
        self.focus.as_ref().map(|(_, id)| *id)
    }

    /// The focused widget's current path, if it is still in the tree.
    pub fn focused_path(&mut self, root: &dyn Widget) -> Option<WidgetPath> {
        let (path, id) = self.focus.as_ref()?;
        let resolved = tree::revalidate(root, path, *id);
        match resolved {
            Some(path) => {
                if let Some((stored, _)) = self.focus.as_mut() {
                    stored.clone_from(&path);
                }
                Some(path)
            }
            None => {
                self.focus = None;
                None
            }
        }
    }

    /// Move focus to the widget at `path` (or clear it with `None`).
    ///
    /// Sends `FocusOut` to the previous widget and `FocusIn` to the new one.
    /// Returns `true` if focus changed.
    pub fn set_focus(
        &mut self,
        root: &mut dyn Widget,
        path: Option<WidgetPath>,
        reason: FocusReason,
    ) -> bool {
        let new_id = match &path {
            Some(path) => match tree::resolve(root, path) {
                Some(widget) => Some(widget.id()),
                None => return false,
            },
            None => None,
        };
        if new_id == self.focused_id() {
            return false;
        }

        if let Some(old_path) = self.focused_path(root)
            && let Some(old) = tree::resolve_mut(root, &old_path)
        {
            old.widget_base_mut().set_focused(false);
            old.event(&mut WidgetEvent::FocusOut(FocusOutEvent::new(reason)));
        }

        self.focus = match (path, new_id) {
            (Some(path), Some(id)) => {
                if let Some(widget) = tree::resolve_mut(root, &path) {
                    widget.widget_base_mut().set_focused(true);
                    widget.event(&mut WidgetEvent::FocusIn(FocusInEvent::new(reason)));
                }
                tracing::debug!(
                    target: horizon_trellis_core::logging::targets::DISPATCH,
                    widget = %id,
                    ?reason,
                    "focus changed"
                );
                Some((path, id))
            }
            _ => None,
        };
        true
    }

    /// Move focus to the next (or previous) Tab-focusable widget, wrapping.
    pub fn focus_next(&mut self, root: &mut dyn Widget, forward: bool) -> bool {
        let chain = tab_chain(root);
        if chain.is_empty() {
            return false;
        }

        let current = self
            .focused_id()
            .and_then(|id| chain.iter().position(|(_, candidate)| *candidate == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => chain.len() - 1,
            (Some(i), true) => (i + 1) % chain.len(),
            (Some(i), false) => (i + chain.len() - 1) % chain.len(),
        };

        let reason = if forward {
            FocusReason::Tab
        } else {
            FocusReason::Backtab
        };
        let (path, _) = chain[next].clone();
        self.set_focus(root, Some(path), reason)
    }

    /// Forget the focused widget without sending events.
    pub fn clear(&mut self) {
        self.focus = None;
    }
}

/// Tab-focusable widgets in pre-order.
///
/// Children of hidden or disabled widgets are skipped along with them.
pub fn tab_chain(root: &dyn Widget) -> Vec<(WidgetPath, WidgetId)> {
    fn walk(widget: &dyn Widget, path: &mut Vec<usize>, out: &mut Vec<(WidgetPath, WidgetId)>) {
        if !widget.is_visible() || !widget.is_enabled() {
            return;
        }
        if widget.widget_base().focus_policy().accepts_tab() {
            out.push((path.clone(), widget.id()));
        }
        for index in 0..widget.child_count() {
            if let Some(child) = widget.child_at(index) {
                path.push(index);
                walk(child, path, out);
                path.pop();
            }
        }
    }

    let mut out = Vec::new();
    walk(root, &mut Vec::new(), &mut out);
    out
}
