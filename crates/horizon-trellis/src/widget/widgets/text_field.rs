//! Single-line text input widget.
//!
//! The cursor moves by grapheme cluster, so combining sequences and emoji
//! are edited as one unit.
//!
//! # Keyboard
//!
//! - Left/Right: move by one grapheme
//! - Home/End: jump to the start or end
//! - Backspace/Delete: remove the grapheme before/after the cursor
//! - Enter: emit `return_pressed`
//! - Any key with text: insert it at the cursor
//!
//! While focused, the caret blinks on a timer from the context's registry.
//! Editing keeps it solid until the next blink interval passes.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widgets::TextField;
//!
//! let ctx = UiContext::headless();
//! let mut field = TextField::new(&ctx).with_placeholder("Name");
//! field.text_changed.connect(|text| println!("now {text}"));
//!
//! field.insert_text("héllo");
//! assert_eq!(field.cursor_position(), 5);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use unicode_segmentation::UnicodeSegmentation;

use horizon_trellis_core::{Signal, Timer};
use horizon_trellis_core::logging::targets;
use horizon_trellis_render::{FontMetrics, Point, Rect, Size};
use horizon_trellis_style::class;

use crate::context::UiContext;
use crate::widget::{
    FocusPolicy, Key, KeyPressEvent, MouseButton, MousePressEvent, PaintContext, SizeHint, SizePolicy,
    SizePolicyPair, Widget, WidgetBase, WidgetEvent,
};

/// A single-line text editor.
///
/// # Signals
///
/// - `text_changed(String)`: the text changed, by typing or programmatically
/// - `return_pressed()`: Enter was pressed
pub struct TextField {
    base: WidgetBase,
    text: String,
    placeholder: String,
    /// Cursor position in graphemes.
    cursor: usize,
    max_length: Option<usize>,
    read_only: bool,
    cursor_width: f32,
    metrics: Arc<dyn FontMetrics>,
    caret_visible: Arc<AtomicBool>,
    blink: Option<Timer>,

    /// Emitted when the text changes.
    pub text_changed: Signal<String>,
    /// Emitted when Enter is pressed.
    pub return_pressed: Signal<()>,
}

impl TextField {
    /// Create an empty text field.
    pub fn new(ctx: &UiContext) -> Self {
        let mut base = WidgetBase::new(ctx, class::TEXT_FIELD);
        base.set_focus_policy(FocusPolicy::StrongFocus);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Expanding, SizePolicy::Fixed));

        let caret_visible = Arc::new(AtomicBool::new(true));
        let blink = ctx.config().cursor_blink_interval().map(|interval| {
            let timer = Timer::new(ctx.timers(), interval, interval);
            let visible = caret_visible.clone();
            timer.timeout().connect(move |_| {
                visible.fetch_xor(true, Ordering::Relaxed);
            });
            timer
        });
        Self {
            base,
            text: String::new(),
            placeholder: String::new(),
            cursor: 0,
            max_length: None,
            read_only: false,
            cursor_width: ctx.config().text_cursor_width,
            metrics: ctx.metrics().clone(),
            caret_visible,
            blink,
            text_changed: Signal::new(),
            return_pressed: Signal::new(),
        }
    }

    /// Builder: initial text, cursor at the end.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder: placeholder shown while empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, truncated to the maximum length. The cursor moves to
    /// the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = self.truncate(text.into());
        self.cursor = text.graphemes(true).count();
        if self.text != text {
            self.text = text;
            self.base.update();
            self.text_changed.emit(self.text.clone());
        }
    }

    /// Text shown while the field is empty.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
        self.base.update();
    }

    /// Maximum length in graphemes.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Limit the text to `max_length` graphemes, truncating current text.
    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
        let current = self.text.clone();
        let truncated = self.truncate(current);
        if truncated != self.text {
            self.set_text(truncated);
        }
    }

    /// Whether editing is disabled.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Enable or disable editing. Read-only fields still move the cursor.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of graphemes in the text.
    pub fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn truncate(&self, text: String) -> String {
        match self.max_length {
            Some(max) if text.graphemes(true).count() > max => text.graphemes(true).take(max).collect(),
            _ => text,
        }
    }

    /// Byte offset of grapheme `index`.
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Cursor position in graphemes.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the text.
    pub fn set_cursor_position(&mut self, position: usize) {
        let position = position.min(self.len());
        if self.cursor != position {
            self.cursor = position;
            self.base.update();
        }
    }

    /// Whether the caret is in the visible phase of its blink.
    pub fn is_caret_visible(&self) -> bool {
        self.caret_visible.load(Ordering::Relaxed)
    }

    /// Show the caret and start a fresh blink cycle.
    fn reset_blink(&self) {
        self.caret_visible.store(true, Ordering::Relaxed);
        if let Some(timer) = &self.blink {
            timer.restart();
        }
    }

    fn stop_blink(&self) {
        self.caret_visible.store(true, Ordering::Relaxed);
        if let Some(timer) = &self.blink {
            timer.stop();
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert `text` at the cursor. Text beyond the maximum length is
    /// dropped. Returns `false` if nothing was inserted.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if self.read_only || text.is_empty() {
            return false;
        }
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        let room = self.max_length.map(|max| max.saturating_sub(self.len()));
        let inserted: String = match room {
            Some(room) => text.graphemes(true).take(room).collect(),
            None => text,
        };
        if inserted.is_empty() {
            return false;
        }

        let offset = self.byte_offset(self.cursor);
        let before = self.len();
        self.text.insert_str(offset, &inserted);
        // Insertion can merge with neighbouring graphemes; count the growth.
        self.cursor += self.len() - before;
        self.changed();
        true
    }

    /// Remove the grapheme before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.read_only || self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        self.changed();
        true
    }

    /// Remove the grapheme after the cursor.
    pub fn delete(&mut self) -> bool {
        if self.read_only || self.cursor >= self.len() {
            return false;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.replace_range(start..end, "");
        self.changed();
        true
    }

    fn changed(&mut self) {
        tracing::trace!(target: targets::WIDGET, field = %self.base.id(), len = self.text.len(), "text edited");
        self.base.update();
        self.text_changed.emit(self.text.clone());
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        match event.key {
            Key::ArrowLeft => {
                self.set_cursor_position(self.cursor.saturating_sub(1));
                true
            }
            Key::ArrowRight => {
                self.set_cursor_position(self.cursor + 1);
                true
            }
            Key::Home => {
                self.set_cursor_position(0);
                true
            }
            Key::End => {
                self.set_cursor_position(self.len());
                true
            }
            Key::Backspace => {
                self.backspace();
                true
            }
            Key::Delete => {
                self.delete();
                true
            }
            Key::Enter => {
                self.return_pressed.emit(());
                true
            }
            Key::Tab | Key::Escape => false,
            _ if !event.text.is_empty() && !event.modifiers.control && !event.modifiers.alt => {
                self.insert_text(&event.text);
                true
            }
            _ => false,
        }
    }

    fn text_rect(&self) -> Rect {
        self.base.style().content_rect(self.base.rect())
    }

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let rect = self.text_rect();
        let x = event.local_pos.x - rect.left();
        let index = self.metrics.hit_test_text(&self.text, &self.base.style().font, x);
        self.set_cursor_position(index);
        true
    }
}

impl Widget for TextField {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        let style = self.base.style();
        let line = self.metrics.line_height(&style.font);
        let sample = self.metrics.text_bounds("MMMMMMMMMMMM", &style.font);
        let height = line + style.padding.vertical();
        SizeHint::new(Size::new(sample.width() + style.padding.horizontal(), height))
            .with_minimum(Size::new(style.padding.horizontal() + self.cursor_width, height))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        let border = if self.base.has_focus() {
            style.focus_color
        } else {
            style.border_color
        };
        ctx.draw_frame(style.background, border, style.border_width);

        let rect = self.text_rect();
        if self.text.is_empty() {
            if !self.placeholder.is_empty() {
                ctx.draw_text_left(&self.placeholder, rect, &style.font, style.placeholder_foreground);
            }
        } else {
            let color = if self.base.is_enabled() {
                style.foreground
            } else {
                style.disabled_foreground
            };
            ctx.draw_text_left(&self.text, rect, &style.font, color);
        }

        if self.base.has_focus() && !self.read_only && self.is_caret_visible() {
            let x = rect.left() + ctx.metrics().caret_offset(&self.text, &style.font, self.cursor);
            let line = ctx.metrics().line_height(&style.font);
            let y = rect.top() + (rect.height() - line) / 2.0;
            ctx.renderer()
                .fill_rect(Rect::from_origin_size(Point::new(x, y), Size::new(self.cursor_width, line)), style.foreground);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        if !self.base.is_enabled() {
            return false;
        }
        let handled = match event {
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::FocusIn(_) => {
                self.reset_blink();
                return false;
            }
            WidgetEvent::FocusOut(_) => {
                self.stop_blink();
                return false;
            }
            _ => false,
        };
        if handled && self.base.has_focus() {
            self.reset_blink();
        }
        if handled {
            event.accept();
        }
        handled
    }
}

static_assertions::assert_impl_all!(TextField: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{FocusInEvent, FocusOutEvent, FocusReason, KeyboardModifiers};
    use horizon_trellis_core::ToolkitConfig;
    use horizon_trellis_render::{DrawCommand, RecordingRenderer};
    use parking_lot::Mutex;
    use std::time::Duration;

    fn setup() -> TextField {
        TextField::new(&UiContext::headless())
    }

    fn key(field: &mut TextField, key: Key) -> bool {
        field.event(&mut WidgetEvent::KeyPress(KeyPressEvent::new(key, KeyboardModifiers::NONE, "")))
    }

    #[test]
    fn test_typing_and_cursor_movement() {
        let mut field = setup();
        field.event(&mut WidgetEvent::KeyPress(KeyPressEvent::text("ac")));
        key(&mut field, Key::ArrowLeft);
        field.event(&mut WidgetEvent::KeyPress(KeyPressEvent::text("b")));
        assert_eq!(field.text(), "abc");
        assert_eq!(field.cursor_position(), 2);

        key(&mut field, Key::Home);
        key(&mut field, Key::Delete);
        assert_eq!(field.text(), "bc");
        key(&mut field, Key::End);
        key(&mut field, Key::Backspace);
        assert_eq!(field.text(), "b");
    }

    #[test]
    fn test_graphemes_edit_as_units() {
        let mut field = setup().with_text("e\u{301}x");
        assert_eq!(field.len(), 2);
        key(&mut field, Key::ArrowLeft);
        key(&mut field, Key::Backspace);
        assert_eq!(field.text(), "x");
        assert_eq!(field.cursor_position(), 0);
    }

    #[test]
    fn test_max_length() {
        let mut field = setup();
        field.set_max_length(Some(3));
        field.insert_text("abcdef");
        assert_eq!(field.text(), "abc");
        assert!(!field.insert_text("z"));

        field.set_max_length(Some(2));
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn test_read_only_and_signals() {
        let mut field = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = log.clone();
        field.text_changed.connect(move |t| l.lock().push(t.clone()));
        let l = log.clone();
        field.return_pressed.connect(move |_| l.lock().push("<return>".to_string()));

        field.insert_text("hi");
        field.set_read_only(true);
        assert!(!field.insert_text("!"));
        key(&mut field, Key::Enter);
        assert_eq!(*log.lock(), vec!["hi".to_string(), "<return>".to_string()]);
    }

    #[test]
    fn test_click_places_cursor() {
        let ctx = UiContext::headless();
        let mut field = TextField::new(&ctx).with_text("abcdef");
        field.set_geometry(Rect::new(0.0, 0.0, 200.0, 30.0));
        let left = field.text_rect().left();
        let advance = ctx.metrics().caret_offset("abcdef", &field.widget_base().style().font, 1);

        let p = Point::new(left + advance * 3.0 + 0.1, 10.0);
        field.event(&mut WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            p,
            p,
            KeyboardModifiers::NONE,
        )));
        assert_eq!(field.cursor_position(), 3);
    }

    fn focus(field: &mut TextField) {
        field.widget_base_mut().set_focused(true);
        field.event(&mut WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Other)));
    }

    fn caret_drawn(field: &TextField, ctx: &UiContext) -> bool {
        let mut renderer = RecordingRenderer::new();
        let mut paint = PaintContext::new(&mut renderer, ctx.metrics().as_ref(), field.geometry().at_origin());
        field.paint(&mut paint);
        let caret_width = field.cursor_width;
        renderer
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::FillRect { rect, .. } if rect.width() == caret_width))
    }

    #[test]
    fn test_caret_blinks_while_focused() {
        let ctx = UiContext::headless();
        let mut field = TextField::new(&ctx).with_text("abc");
        field.set_geometry(Rect::new(0.0, 0.0, 200.0, 30.0));
        focus(&mut field);
        assert!(caret_drawn(&field, &ctx));

        ctx.timers().update(Duration::from_millis(501));
        assert!(!field.is_caret_visible());
        assert!(!caret_drawn(&field, &ctx));

        ctx.timers().update(Duration::from_millis(501));
        assert!(field.is_caret_visible());
    }

    #[test]
    fn test_typing_and_focus_loss_reset_the_blink() {
        let ctx = UiContext::headless();
        let mut field = TextField::new(&ctx);
        focus(&mut field);
        ctx.timers().update(Duration::from_millis(501));
        assert!(!field.is_caret_visible());

        field.event(&mut WidgetEvent::KeyPress(KeyPressEvent::text("a")));
        assert!(field.is_caret_visible());

        field.widget_base_mut().set_focused(false);
        field.event(&mut WidgetEvent::FocusOut(FocusOutEvent::new(FocusReason::Other)));
        assert_eq!(ctx.timers().active_count(), 0);
    }

    #[test]
    fn test_zero_blink_interval_keeps_caret_solid() {
        let config = ToolkitConfig {
            cursor_blink_ms: 0,
            ..ToolkitConfig::default()
        };
        let ctx = UiContext::headless().with_config(config);
        let mut field = TextField::new(&ctx);
        focus(&mut field);
        assert_eq!(ctx.timers().active_count(), 0);
        ctx.timers().update(Duration::from_secs(5));
        assert!(field.is_caret_visible());
    }
}
