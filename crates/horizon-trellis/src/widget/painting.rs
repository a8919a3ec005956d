//! Tree-wide layout and paint passes.

use horizon_trellis_core::logging::targets;
use horizon_trellis_render::{FontMetrics, Renderer};

use super::traits::{PaintContext, Widget};

/// Run [`Widget::layout`] on every widget that needs it, parents before
/// children. Returns the number of widgets laid out.
pub fn layout_tree(widget: &mut dyn Widget) -> usize {
    let mut count = 0;
    if widget.needs_layout() {
        widget.layout();
        widget.widget_base_mut().clear_layout_flag();
        count += 1;
    }
    for index in 0..widget.child_count() {
        if let Some(child) = widget.child_at_mut(index) {
            count += layout_tree(child);
        }
    }
    count
}

/// Whether any widget in the tree needs layout.
pub fn tree_needs_layout(widget: &dyn Widget) -> bool {
    widget.needs_layout()
        || (0..widget.child_count())
            .filter_map(|index| widget.child_at(index))
            .any(tree_needs_layout)
}

/// Whether any widget in the tree needs repainting.
pub fn tree_needs_repaint(widget: &dyn Widget) -> bool {
    widget.widget_base().needs_repaint()
        || (0..widget.child_count())
            .filter_map(|index| widget.child_at(index))
            .any(tree_needs_repaint)
}

/// Paint `widget` and its visible children.
///
/// `renderer` must already be translated to the widget's parent
/// coordinates. Each widget is clipped to its own bounds.
pub fn paint_tree(widget: &mut dyn Widget, renderer: &mut dyn Renderer, metrics: &dyn FontMetrics) {
    if !widget.is_visible() {
        return;
    }
    let geometry = widget.geometry();
    if geometry.is_empty() {
        widget.widget_base_mut().clear_repaint_flag();
        return;
    }

    renderer.save();
    renderer.translate(geometry.left(), geometry.top());
    renderer.clip_rect(geometry.at_origin());

    {
        let mut ctx = PaintContext::new(&mut *renderer, metrics, geometry.at_origin());
        widget.paint(&mut ctx);
    }
    widget.widget_base_mut().clear_repaint_flag();

    for index in 0..widget.child_count() {
        if let Some(child) = widget.child_at_mut(index) {
            paint_tree(child, renderer, metrics);
        }
    }

    renderer.restore();
    tracing::trace!(target: targets::WIDGET, widget = %widget.id(), "painted");
}
