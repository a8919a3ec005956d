//! Label widget for text display.
//!
//! A label shows one line of text. It has a selected visual state so list
//! views can use labels as row widgets.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widget::Widget;
//! use horizon_trellis::widgets::Label;
//!
//! let ctx = UiContext::headless();
//! let mut label = Label::new(&ctx, "Hello, World!");
//! label.set_text("Goodbye");
//! assert_eq!(label.text(), "Goodbye");
//! assert!(label.size_hint().preferred.width > 0.0);
//! ```

use std::sync::Arc;

use horizon_trellis_core::Signal;
use horizon_trellis_render::{FontMetrics, Size};
use horizon_trellis_style::class;

use crate::context::UiContext;
use crate::widget::{PaintContext, SizeHint, SizePolicy, SizePolicyPair, Widget, WidgetBase};

/// Horizontal placement of the text inside the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// A widget that displays text.
///
/// Labels have a `Preferred` horizontal and `Fixed` vertical size policy:
/// they stretch with their container but keep one line of height.
pub struct Label {
    base: WidgetBase,
    text: String,
    align: TextAlign,
    selected: bool,
    metrics: Arc<dyn FontMetrics>,

    /// Emitted with the new text when it changes.
    pub text_changed: Signal<String>,
}

impl Label {
    /// Create a label styled as a plain label.
    pub fn new(ctx: &UiContext, text: impl Into<String>) -> Self {
        Self::with_class(ctx, class::LABEL, text)
    }

    /// Create a label styled as `class` (list rows use
    /// [`class::LIST_ITEM`]).
    pub fn with_class(ctx: &UiContext, class: &'static str, text: impl Into<String>) -> Self {
        let mut base = WidgetBase::new(ctx, class);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Preferred, SizePolicy::Fixed));
        Self {
            base,
            text: text.into(),
            align: TextAlign::Left,
            selected: false,
            metrics: ctx.metrics().clone(),
            text_changed: Signal::new(),
        }
    }

    /// Builder: set the alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text.clone();
            self.base.update();
            self.text_changed.emit(text);
        }
    }

    /// The alignment.
    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Whether the selected visual state is shown.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Show or clear the selected visual state.
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.base.update();
        }
    }
}

impl Widget for Label {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        let style = self.base.style();
        let bounds = self.metrics.text_bounds(&self.text, &style.font);
        let height = self.metrics.line_height(&style.font) + style.padding.vertical();
        let width = bounds.width() + style.padding.horizontal();
        SizeHint::new(Size::new(width, height)).with_minimum(Size::new(0.0, height))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        let (background, foreground) = if !self.base.is_enabled() {
            (style.background, style.disabled_foreground)
        } else if self.selected {
            (style.selection_background, style.selection_foreground)
        } else {
            (style.background, style.foreground)
        };

        ctx.draw_frame(background, style.border_color, style.border_width);
        let content = style.content_rect(ctx.rect());
        match self.align {
            TextAlign::Left => ctx.draw_text_left(&self.text, content, &style.font, foreground),
            TextAlign::Center => ctx.draw_text_centered(&self.text, content, &style.font, foreground),
        }
    }
}

static_assertions::assert_impl_all!(Label: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_trellis_render::{DrawCommand, Rect, RecordingRenderer};
    use parking_lot::Mutex;

    #[test]
    fn test_set_text_emits_once() {
        let ctx = UiContext::headless();
        let mut label = Label::new(&ctx, "a");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        label.text_changed.connect(move |text| seen_clone.lock().push(text.clone()));

        label.set_text("b");
        label.set_text("b");
        assert_eq!(*seen.lock(), vec!["b".to_string()]);
    }

    #[test]
    fn test_selected_paints_selection_background() {
        let ctx = UiContext::headless();
        let mut label = Label::with_class(&ctx, class::LIST_ITEM, "row");
        label.set_selected(true);

        let mut renderer = RecordingRenderer::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        {
            let mut paint = PaintContext::new(&mut renderer, ctx.metrics().as_ref(), rect);
            label.paint(&mut paint);
        }
        let selection = label.widget_base().style().selection_background;
        assert!(
            renderer
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == selection))
        );
        assert_eq!(renderer.texts(), vec!["row"]);
    }
}
