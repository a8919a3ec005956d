//! Panel: a container that owns child widgets.
//!
//! A panel exclusively owns its children. With a [`Layout`] set, children
//! are positioned by the layout whenever the panel is laid out; without
//! one, children keep whatever geometry they were given.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widget::Widget;
//! use horizon_trellis::widget::layout::FlowLayout;
//! use horizon_trellis::widgets::{Panel, PushButton};
//! use horizon_trellis_render::Rect;
//!
//! let ctx = UiContext::headless();
//! let mut panel = Panel::new(&ctx).with_layout(FlowLayout::new());
//! panel.add_child(Box::new(PushButton::new(&ctx, "One")));
//! panel.add_child(Box::new(PushButton::new(&ctx, "Two")));
//!
//! panel.set_geometry(Rect::new(0.0, 0.0, 400.0, 100.0));
//! panel.layout();
//! assert!(panel.child_at(1).unwrap().geometry().left() > 0.0);
//! ```

use horizon_trellis_core::Signal;
use horizon_trellis_core::logging::targets;
use horizon_trellis_render::Size;
use horizon_trellis_style::class;

use crate::context::UiContext;
use crate::widget::layout::{CellConstraint, Layout, LayoutItem};
use crate::widget::{PaintContext, SizeHint, SizePolicy, SizePolicyPair, Widget, WidgetBase, WidgetId};

struct PanelChild {
    widget: Box<dyn Widget>,
    constraint: Option<CellConstraint>,
}

/// A container widget with an optional layout strategy.
///
/// # Signals
///
/// - `children_changed`: emitted after a child is added or removed
pub struct Panel {
    base: WidgetBase,
    children: Vec<PanelChild>,
    layout: Option<Box<dyn Layout>>,

    /// Emitted when children are added or removed.
    pub children_changed: Signal<()>,
}

impl Panel {
    /// Create an empty panel without a layout.
    pub fn new(ctx: &UiContext) -> Self {
        let mut base = WidgetBase::new(ctx, class::PANEL);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Expanding, SizePolicy::Expanding));
        Self {
            base,
            children: Vec::new(),
            layout: None,
            children_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Layout Management
    // =========================================================================

    /// Set the layout strategy.
    pub fn set_layout(&mut self, layout: impl Layout + 'static) {
        self.layout = Some(Box::new(layout));
        self.base.invalidate_layout();
    }

    /// Builder form of [`set_layout`](Self::set_layout).
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.set_layout(layout);
        self
    }

    /// Remove the layout, returning it.
    pub fn take_layout(&mut self) -> Option<Box<dyn Layout>> {
        self.base.invalidate_layout();
        self.layout.take()
    }

    /// Whether a layout is set.
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    // =========================================================================
    // Child Management
    // =========================================================================

    /// Append a child. Returns its index.
    pub fn add_child(&mut self, widget: Box<dyn Widget>) -> usize {
        self.push_child(widget, None)
    }

    /// Append a child with a placement constraint for constraint-based
    /// layouts. Returns its index.
    pub fn add_child_with(&mut self, widget: Box<dyn Widget>, constraint: CellConstraint) -> usize {
        self.push_child(widget, Some(constraint))
    }

    fn push_child(&mut self, widget: Box<dyn Widget>, constraint: Option<CellConstraint>) -> usize {
        tracing::trace!(target: targets::WIDGET, panel = %self.base.id(), child = %widget.id(), "child added");
        self.children.push(PanelChild { widget, constraint });
        self.base.invalidate_layout();
        self.children_changed.emit(());
        self.children.len() - 1
    }

    /// Remove the child at `index`, handing ownership back to the caller.
    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Widget>> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        self.base.invalidate_layout();
        self.children_changed.emit(());
        Some(child.widget)
    }

    /// Remove the child with `id`.
    pub fn remove_child_by_id(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.children.iter().position(|c| c.widget.id() == id)?;
        self.remove_child(index)
    }

    /// Remove every child.
    pub fn clear(&mut self) -> Vec<Box<dyn Widget>> {
        let removed: Vec<_> = self.children.drain(..).map(|c| c.widget).collect();
        if !removed.is_empty() {
            self.base.invalidate_layout();
            self.children_changed.emit(());
        }
        removed
    }

    /// Iterate the children in paint order.
    pub fn children(&self) -> impl Iterator<Item = &dyn Widget> {
        self.children.iter().map(|c| c.widget.as_ref())
    }

    /// Placement constraint of the child at `index`.
    pub fn constraint(&self, index: usize) -> Option<CellConstraint> {
        self.children.get(index).and_then(|c| c.constraint)
    }

    fn layout_items(&self) -> Vec<LayoutItem> {
        self.children
            .iter()
            .map(|c| LayoutItem {
                hint: c.widget.size_hint(),
                policy: c.widget.size_policy(),
                visible: c.widget.is_visible(),
                constraint: c.constraint,
            })
            .collect()
    }

    /// Preferred height at `width`, when the layout supports it.
    pub fn height_for_width(&self, width: f32) -> Option<f32> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.height_for_width(&self.layout_items(), width))
    }
}

impl Widget for Panel {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        match &self.layout {
            Some(layout) => layout.size_hint(&self.layout_items()),
            None => {
                let extent = self
                    .children
                    .iter()
                    .filter(|c| c.widget.is_visible())
                    .map(|c| c.widget.geometry())
                    .fold(Size::ZERO, |acc, r| Size::new(acc.width.max(r.right()), acc.height.max(r.bottom())));
                SizeHint::new(extent)
            }
        }
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        ctx.draw_frame(style.background, style.border_color, style.border_width);
    }

    fn layout(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        let items = self.layout_items();
        let rects = layout.calculate(&items, self.base.rect());
        for (child, rect) in self.children.iter_mut().zip(rects) {
            if child.widget.is_visible() && child.widget.geometry() != rect {
                child.widget.set_geometry(rect);
            }
        }
        tracing::trace!(target: targets::LAYOUT, panel = %self.base.id(), children = items.len(), "panel laid out");
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<&dyn Widget> {
        self.children.get(index).map(|c| c.widget.as_ref())
    }

    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Widget> {
        match self.children.get_mut(index) {
            Some(child) => Some(child.widget.as_mut()),
            None => None,
        }
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.base.id())
            .field("children", &self.children.len())
            .field("layout", &self.layout)
            .finish()
    }
}

static_assertions::assert_impl_all!(Panel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::layout::{FlowLayout, GridBagLayout};
    use crate::widget::widgets::Label;
    use horizon_trellis_render::Rect;

    fn setup() -> UiContext {
        UiContext::headless()
    }

    #[test]
    fn test_add_remove_transfers_ownership() {
        let ctx = setup();
        let mut panel = Panel::new(&ctx);
        let label = Label::new(&ctx, "x");
        let id = label.id();
        panel.add_child(Box::new(label));
        assert_eq!(panel.child_count(), 1);

        let removed = panel.remove_child_by_id(id).unwrap();
        assert_eq!(removed.id(), id);
        assert_eq!(panel.child_count(), 0);
        assert!(panel.remove_child(0).is_none());
    }

    #[test]
    fn test_layout_positions_children() {
        let ctx = setup();
        let mut panel = Panel::new(&ctx).with_layout(FlowLayout::new().with_spacing(0.0, 0.0));
        panel.add_child(Box::new(Label::new(&ctx, "aaaa")));
        panel.add_child(Box::new(Label::new(&ctx, "bbbb")));
        panel.set_geometry(Rect::new(0.0, 0.0, 500.0, 100.0));
        panel.layout();

        let first = panel.child_at(0).unwrap().geometry();
        let second = panel.child_at(1).unwrap().geometry();
        assert_eq!(second.left(), first.right());
    }

    #[test]
    fn test_grid_constraints_reach_layout() {
        let ctx = setup();
        let mut panel = Panel::new(&ctx).with_layout(GridBagLayout::new().with_spacing(0.0, 0.0));
        panel.add_child_with(Box::new(Label::new(&ctx, "a")), CellConstraint::at(0, 1));
        panel.add_child_with(Box::new(Label::new(&ctx, "b")), CellConstraint::at(0, 0));
        panel.set_geometry(Rect::new(0.0, 0.0, 200.0, 200.0));
        panel.layout();

        assert!(panel.child_at(0).unwrap().geometry().top() > panel.child_at(1).unwrap().geometry().top());
        assert_eq!(panel.constraint(1), Some(CellConstraint::at(0, 0)));
    }
}
