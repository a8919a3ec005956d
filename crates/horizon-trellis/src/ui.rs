//! The root of a widget tree.
//!
//! A [`Ui`] owns the root widget, the [`EventDispatcher`] that routes input
//! into it, and the [`UiContext`] the tree was built with. A host (a
//! windowing backend, a test, a headless tool) drives it with
//! [`dispatch`](Ui::dispatch) for input, [`update`](Ui::update) once per
//! frame to advance timers, and [`paint`](Ui::paint) to draw a frame.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::{Ui, UiContext};
//! use horizon_trellis::widget::InputEvent;
//! use horizon_trellis::widget::layout::FlowLayout;
//! use horizon_trellis::widgets::{Panel, PushButton};
//! use horizon_trellis_render::{RecordingRenderer, Size};
//!
//! let ctx = UiContext::headless();
//! let mut panel = Panel::new(&ctx).with_layout(FlowLayout::new());
//! panel.add_child(Box::new(PushButton::new(&ctx, "OK")));
//!
//! let mut ui = Ui::new(ctx, panel);
//! ui.resize(Size::new(320.0, 240.0));
//!
//! let mut renderer = RecordingRenderer::new();
//! ui.paint(&mut renderer);
//! assert!(renderer.texts().contains(&"OK"));
//!
//! let result = ui.dispatch(InputEvent::press(10.0, 10.0));
//! assert!(result.was_handled());
//! ```

use std::time::{Duration, Instant};

use horizon_trellis_core::logging::{span_names, targets};
use horizon_trellis_core::{PerfSpan, TreeFormatOptions};
use horizon_trellis_render::{Point, Rect, Renderer, Size};

use crate::context::UiContext;
use crate::widget::{
    DispatchResult, EventDispatcher, InputEvent, ResizeEvent, Widget, WidgetEvent, WidgetId, WidgetPath,
    WidgetSnapshot, find_path, layout_tree, paint_tree, tree_needs_layout, tree_needs_repaint,
};

/// A widget tree together with its input routing.
pub struct Ui {
    ctx: UiContext,
    root: Box<dyn Widget>,
    dispatcher: EventDispatcher,
    timers_fired: bool,
}

impl Ui {
    /// Wrap `root` as the root of a tree.
    pub fn new(ctx: UiContext, root: impl Widget + 'static) -> Self {
        Self::from_boxed(ctx, Box::new(root))
    }

    /// Wrap an already boxed root widget.
    pub fn from_boxed(ctx: UiContext, root: Box<dyn Widget>) -> Self {
        let dispatcher = EventDispatcher::new(ctx.config());
        Self {
            ctx,
            root,
            dispatcher,
            timers_fired: false,
        }
    }

    /// The context the tree was built with.
    pub fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// The root widget.
    pub fn root(&self) -> &dyn Widget {
        self.root.as_ref()
    }

    /// The root widget, mutably.
    pub fn root_mut(&mut self) -> &mut dyn Widget {
        self.root.as_mut()
    }

    /// The widget at `path`.
    pub fn widget(&self, path: &[usize]) -> Option<&dyn Widget> {
        crate::widget::resolve(self.root.as_ref(), path)
    }

    /// The widget at `path`, mutably.
    pub fn widget_mut(&mut self, path: &[usize]) -> Option<&mut dyn Widget> {
        crate::widget::resolve_mut(self.root.as_mut(), path)
    }

    /// Path of the widget with `id`.
    pub fn path_of(&self, id: WidgetId) -> Option<WidgetPath> {
        find_path(self.root.as_ref(), id)
    }

    /// Path of the first widget, in pre-order, named `name`.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetPath> {
        let mut found = None;
        crate::widget::visit(self.root.as_ref(), &mut |widget: &dyn Widget, path: &[usize]| {
            if found.is_none() && widget.widget_base().name() == name {
                found = Some(path.to_vec());
            }
        });
        found
    }

    // =========================================================================
    // Frame cycle
    // =========================================================================

    /// Resize the root widget.
    pub fn resize(&mut self, size: Size) {
        let old = self.root.geometry().size;
        if old == size {
            return;
        }
        self.root.set_geometry(Rect::from_origin_size(Point::ZERO, size));
        let mut event = WidgetEvent::Resize(ResizeEvent::new(old, size));
        self.root.event(&mut event);
        tracing::debug!(target: targets::WIDGET, width = size.width, height = size.height, "ui resized");
    }

    /// Lay out every invalidated widget. Returns how many were laid out.
    pub fn layout(&mut self) -> usize {
        if !tree_needs_layout(self.root.as_ref()) {
            return 0;
        }
        let _span = PerfSpan::new(span_names::LAYOUT);
        let count = layout_tree(self.root.as_mut());
        tracing::trace!(target: targets::LAYOUT, count, "layout pass");
        count
    }

    /// Advance the context's timers by the time since the previous frame.
    ///
    /// Returns how many timers fired. Any firing makes
    /// [`needs_repaint`](Self::needs_repaint) true until the next paint.
    pub fn update(&mut self, delta: Duration) -> usize {
        let fired = self.ctx.timers().update(delta);
        if fired > 0 {
            tracing::trace!(target: targets::WIDGET, fired, "frame update");
            self.timers_fired = true;
        }
        fired
    }

    /// Whether any widget asked to be repainted, or a timer fired since the
    /// last paint.
    pub fn needs_repaint(&self) -> bool {
        self.timers_fired || tree_needs_repaint(self.root.as_ref())
    }

    /// Lay out if needed, then paint the whole tree into `renderer`.
    pub fn paint(&mut self, renderer: &mut dyn Renderer) {
        self.layout();
        let _span = PerfSpan::new(span_names::PAINT);
        self.timers_fired = false;
        let metrics = self.ctx.metrics().clone();
        paint_tree(self.root.as_mut(), renderer, metrics.as_ref());
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route `input` into the tree, laying out first so hit-testing sees
    /// current geometry.
    pub fn dispatch(&mut self, input: InputEvent) -> DispatchResult {
        self.dispatch_at(input, Instant::now())
    }

    /// Route `input` as if it happened at `now`.
    pub fn dispatch_at(&mut self, input: InputEvent, now: Instant) -> DispatchResult {
        self.layout();
        self.dispatcher.dispatch_at(self.root.as_mut(), input, now)
    }

    /// The focused widget.
    pub fn focused(&self) -> Option<WidgetId> {
        self.dispatcher.focused()
    }

    /// Focus the widget with `id`. Returns `false` if it is not in the tree.
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        self.dispatcher.set_focus(self.root.as_mut(), id)
    }

    /// Remove keyboard focus.
    pub fn clear_focus(&mut self) {
        self.dispatcher.clear_focus(self.root.as_mut());
    }

    /// The event dispatcher.
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// The widget tree as indented text.
    pub fn debug_tree(&self) -> String {
        self.debug_tree_with(TreeFormatOptions::default())
    }

    /// The widget tree as indented text, formatted with `options`.
    pub fn debug_tree_with(&self, options: TreeFormatOptions) -> String {
        WidgetSnapshot::capture(self.root.as_ref()).format(options)
    }

    /// Log the widget tree at debug level.
    pub fn log_tree(&self) {
        tracing::debug!(target: targets::WIDGET, tree = %self.debug_tree(), "widget tree");
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("root", &self.root.id())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::layout::FlowLayout;
    use crate::widget::widgets::{Label, Panel, PushButton};
    use horizon_trellis_core::{Timer, TreeStyle};
    use horizon_trellis_render::RecordingRenderer;

    fn setup() -> Ui {
        let ctx = UiContext::headless();
        let mut panel = Panel::new(&ctx).with_layout(FlowLayout::new());
        panel.widget_base_mut().set_name("root");
        let mut label = Label::new(&ctx, "Name");
        label.widget_base_mut().set_name("caption");
        panel.add_child(Box::new(label));
        panel.add_child(Box::new(PushButton::new(&ctx, "OK")));
        let mut ui = Ui::new(ctx, panel);
        ui.resize(Size::new(300.0, 200.0));
        ui
    }

    #[test]
    fn test_layout_runs_once() {
        let mut ui = setup();
        assert!(ui.layout() > 0);
        assert_eq!(ui.layout(), 0);
    }

    #[test]
    fn test_find_by_name() {
        let ui = setup();
        assert_eq!(ui.find_by_name("caption"), Some(vec![0]));
        assert_eq!(ui.find_by_name("root"), Some(vec![]));
        assert_eq!(ui.find_by_name("missing"), None);
    }

    #[test]
    fn test_debug_tree_lists_children() {
        let ui = setup();
        let text = ui.debug_tree_with(TreeFormatOptions {
            style: TreeStyle::Ascii,
            show_ids: false,
            show_types: false,
            ..TreeFormatOptions::default()
        });
        assert_eq!(text, "root\n+-- caption\n`-- (unnamed)\n");
    }

    #[test]
    fn test_set_focus_by_id() {
        let mut ui = setup();
        let button = ui.widget(&[1]).map(|w| w.id()).unwrap();
        assert!(ui.set_focus(button));
        assert_eq!(ui.focused(), Some(button));
        assert!(ui.widget(&[1]).unwrap().has_focus());

        ui.clear_focus();
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn test_update_advances_context_timers() {
        let mut ui = setup();
        let mut renderer = RecordingRenderer::new();
        ui.paint(&mut renderer);
        assert!(!ui.needs_repaint());

        let timer = Timer::single_shot(ui.context().timers(), Duration::from_millis(100));
        timer.start();
        assert_eq!(ui.update(Duration::from_millis(50)), 0);
        assert!(!ui.needs_repaint());
        assert_eq!(ui.update(Duration::from_millis(60)), 1);
        assert!(ui.needs_repaint());

        ui.paint(&mut renderer);
        assert!(!ui.needs_repaint());
    }
}
