//! Abstract button base implementation.
//!
//! [`AbstractButton`] holds what every button shares: the text, the visual
//! [`ButtonState`], and the `clicked`/`pressed`/`released` signals. Concrete
//! buttons embed it and decide how input moves the state.

use std::sync::Arc;

use horizon_trellis_core::Signal;
use horizon_trellis_core::logging::targets;
use horizon_trellis_render::{Color, FontMetrics, Size};

use crate::context::UiContext;
use crate::widget::{FocusPolicy, PaintContext, SizeHint, SizePolicy, SizePolicyPair, WidgetBase};

/// Visual state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// Idle.
    #[default]
    Normal,
    /// The pointer is over the button.
    Hovered,
    /// The button is held down, or a toggle button is checked.
    Armed,
}

/// Common functionality for all button widgets.
pub struct AbstractButton {
    base: WidgetBase,
    text: String,
    state: ButtonState,
    metrics: Arc<dyn FontMetrics>,

    /// Emitted when the button is activated.
    pub clicked: Signal<()>,
    /// Emitted when the button is pressed down.
    pub pressed: Signal<()>,
    /// Emitted when the button is released, whether or not it was clicked.
    pub released: Signal<()>,
}

impl AbstractButton {
    /// Create a button base styled as `class`.
    pub fn new(ctx: &UiContext, class: &'static str, text: impl Into<String>) -> Self {
        let mut base = WidgetBase::new(ctx, class);
        base.set_focus_policy(FocusPolicy::StrongFocus);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Minimum, SizePolicy::Fixed));
        Self {
            base,
            text: text.into(),
            state: ButtonState::Normal,
            metrics: ctx.metrics().clone(),
            clicked: Signal::new(),
            pressed: Signal::new(),
            released: Signal::new(),
        }
    }

    /// The widget base.
    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    /// The widget base, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// The button's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the button's text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.base.invalidate_layout();
            self.base.update();
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The visual state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Move to `state`, requesting a repaint if it changed.
    pub fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            tracing::trace!(target: targets::WIDGET, button = %self.base.id(), from = ?self.state, to = ?state, "button state");
            self.state = state;
            self.base.update();
        }
    }

    pub(crate) fn notify_pressed(&self) {
        self.pressed.emit(());
    }

    pub(crate) fn notify_released(&self) {
        self.released.emit(());
    }

    pub(crate) fn notify_clicked(&self) {
        tracing::debug!(target: targets::WIDGET, button = %self.base.id(), text = %self.text, "clicked");
        self.clicked.emit(());
    }

    // =========================================================================
    // Size and painting
    // =========================================================================

    /// Size of the text plus the style's padding.
    pub fn size_hint(&self) -> SizeHint {
        let style = self.base.style();
        let text = self.metrics.text_bounds(&self.text, &style.font);
        let line = self.metrics.line_height(&style.font);
        let size = Size::new(
            text.width() + style.padding.horizontal(),
            line + style.padding.vertical(),
        );
        SizeHint::new(size).with_minimum(size)
    }

    /// Colors for the current state.
    pub fn colors(&self) -> (Color, Color) {
        let style = self.base.style();
        if !self.base.is_enabled() {
            return (style.background, style.disabled_foreground);
        }
        match self.state {
            ButtonState::Normal => (style.background, style.foreground),
            ButtonState::Hovered => (style.hover_background, style.foreground),
            ButtonState::Armed => (style.pressed_background, style.pressed_foreground),
        }
    }

    /// Paint the frame, centered text and focus outline.
    pub fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        let (background, foreground) = self.colors();
        ctx.draw_frame(background, style.border_color, style.border_width);
        let content = style.content_rect(ctx.rect());
        ctx.draw_text_centered(&self.text, content, &style.font, foreground);
        if self.base.has_focus() {
            ctx.draw_focus_indicator(2.0, style.focus_color);
        }
    }
}

static_assertions::assert_impl_all!(AbstractButton: Send, Sync);
