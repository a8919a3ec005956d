//! A panel that shows a single icon glyph.
//!
//! Icon fonts map pictograms to ordinary code points, so an icon is drawn
//! as text. The glyph is centred using its measured bounds rather than the
//! font's line height, which keeps tall and short glyphs visually centred.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widget::Widget;
//! use horizon_trellis::widgets::IconPanel;
//!
//! let ctx = UiContext::headless();
//! let icon = IconPanel::new(&ctx, "\u{2605}");
//! assert_eq!(icon.glyph(), "\u{2605}");
//! assert!(icon.size_hint().preferred.width > 0.0);
//! ```

use std::sync::Arc;

use horizon_trellis_render::{FontMetrics, Point, Size};
use horizon_trellis_style::class;

use crate::context::UiContext;
use crate::widget::{PaintContext, SizeHint, SizePolicy, SizePolicyPair, Widget, WidgetBase};

/// Displays one glyph centred in its bounds.
pub struct IconPanel {
    base: WidgetBase,
    glyph: String,
    metrics: Arc<dyn FontMetrics>,
}

impl IconPanel {
    /// Create a panel showing `glyph`.
    pub fn new(ctx: &UiContext, glyph: impl Into<String>) -> Self {
        let mut base = WidgetBase::new(ctx, class::ICON_PANEL);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Fixed, SizePolicy::Fixed));
        Self {
            base,
            glyph: glyph.into(),
            metrics: ctx.metrics().clone(),
        }
    }

    /// The displayed glyph.
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Replace the glyph. The size hint follows the new glyph's bounds.
    pub fn set_glyph(&mut self, glyph: impl Into<String>) {
        let glyph = glyph.into();
        if self.glyph != glyph {
            self.glyph = glyph;
            self.base.invalidate_layout();
            self.base.update();
        }
    }
}

impl Widget for IconPanel {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        let style = self.base.style();
        let bounds = self.metrics.text_bounds(&self.glyph, &style.font);
        SizeHint::new(Size::new(
            bounds.width() + style.padding.horizontal(),
            bounds.height() + style.padding.vertical(),
        ))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        ctx.draw_frame(style.background, style.border_color, style.border_width);
        if self.glyph.is_empty() {
            return;
        }

        let content = style.content_rect(ctx.rect());
        let bounds = ctx.metrics().text_bounds(&self.glyph, &style.font);
        let position = Point::new(
            content.left() + (content.width() - bounds.width()) / 2.0,
            content.top() + (content.height() - bounds.height()) / 2.0,
        );
        let color = if self.base.is_enabled() {
            style.foreground
        } else {
            style.disabled_foreground
        };
        ctx.renderer().draw_text(&self.glyph, position, &style.font, color);
    }
}

static_assertions::assert_impl_all!(IconPanel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_trellis_render::{DrawCommand, Rect, RecordingRenderer};

    #[test]
    fn test_size_hint_is_glyph_bounds_plus_padding() {
        let ctx = UiContext::headless();
        let icon = IconPanel::new(&ctx, "@");
        let style = icon.widget_base().style();
        let bounds = ctx.metrics().text_bounds("@", &style.font);

        let hint = icon.size_hint();
        assert_eq!(hint.preferred.width, bounds.width() + style.padding.horizontal());
        assert_eq!(hint.preferred.height, bounds.height() + style.padding.vertical());
    }

    #[test]
    fn test_glyph_is_centred() {
        let ctx = UiContext::headless();
        let icon = IconPanel::new(&ctx, "@");
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);

        let mut renderer = RecordingRenderer::new();
        {
            let mut paint = PaintContext::new(&mut renderer, ctx.metrics().as_ref(), rect);
            icon.paint(&mut paint);
        }

        let style = icon.widget_base().style();
        let bounds = ctx.metrics().text_bounds("@", &style.font);
        let content = style.content_rect(rect);
        let expected = Point::new(
            content.left() + (content.width() - bounds.width()) / 2.0,
            content.top() + (content.height() - bounds.height()) / 2.0,
        );
        let position = renderer.commands().iter().find_map(|command| match command {
            DrawCommand::Text { text, position, .. } if text == "@" => Some(*position),
            _ => None,
        });
        assert_eq!(position, Some(expected));
        // Symmetric padding puts the glyph's centre on the panel's centre.
        assert!((expected.x + bounds.width() / 2.0 - 50.0).abs() < 1e-4);
        assert!((expected.y + bounds.height() / 2.0 - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_glyph_invalidates_layout() {
        let ctx = UiContext::headless();
        let mut icon = IconPanel::new(&ctx, "@");
        let narrow = icon.size_hint().preferred.width;
        icon.set_glyph("@@");
        assert!(icon.widget_base().needs_layout());
        assert!(icon.size_hint().preferred.width > narrow);
    }
}
