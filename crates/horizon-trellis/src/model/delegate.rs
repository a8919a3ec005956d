//! Item delegates: the per-row widgets of data-backed views.
//!
//! A view never draws rows itself. For every row it asks an
//! [`ItemRenderer`] for an [`ItemDelegate`], which owns exactly one widget
//! showing that row. The view tells delegates when their row enters or
//! leaves the selection and otherwise treats them as opaque.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use horizon_trellis::UiContext;
//! use horizon_trellis::model::{
//!     DefaultItemDelegate, ItemDelegate, ItemModel, ItemRenderer, ListModel, ModelIndex,
//! };
//!
//! let ctx = UiContext::headless();
//! let model = ListModel::new(vec!["Alpha".to_string(), "Beta".to_string()]);
//!
//! // Closures are renderers.
//! let renderer = move |index: ModelIndex, model: &dyn ItemModel| -> Box<dyn ItemDelegate> {
//!     let text = format!("{}. {}", index.row() + 1, model.display_text(index));
//!     Box::new(DefaultItemDelegate::with_text(&ctx, index, text))
//! };
//!
//! let delegate = renderer.create_delegate(ModelIndex::new(1), &model);
//! assert_eq!(delegate.index(), ModelIndex::new(1));
//! assert!(!delegate.is_selected());
//! ```

use horizon_trellis_style::class;

use super::index::ModelIndex;
use super::traits::ItemModel;
use crate::context::UiContext;
use crate::widget::Widget;
use crate::widget::widgets::Label;

/// Associates one model row with the widget that displays it.
pub trait ItemDelegate: Send + Sync {
    /// The row this delegate shows.
    fn index(&self) -> ModelIndex;

    /// Show or clear the selected state.
    fn set_selected(&mut self, selected: bool);

    /// Whether the delegate currently shows the selected state.
    fn is_selected(&self) -> bool;

    /// The display widget.
    fn widget(&self) -> &dyn Widget;

    /// The display widget, mutably. Views position it through this.
    fn widget_mut(&mut self) -> &mut dyn Widget;
}

/// Creates delegates for rows.
///
/// This is the only customization point for row appearance. Any
/// `Fn(ModelIndex, &dyn ItemModel) -> Box<dyn ItemDelegate>` closure is a
/// renderer.
pub trait ItemRenderer: Send + Sync {
    /// Build the delegate for `index` of `model`.
    fn create_delegate(&self, index: ModelIndex, model: &dyn ItemModel) -> Box<dyn ItemDelegate>;
}

impl<F> ItemRenderer for F
where
    F: Fn(ModelIndex, &dyn ItemModel) -> Box<dyn ItemDelegate> + Send + Sync,
{
    fn create_delegate(&self, index: ModelIndex, model: &dyn ItemModel) -> Box<dyn ItemDelegate> {
        self(index, model)
    }
}

/// A delegate showing the row's display text in a [`Label`].
pub struct DefaultItemDelegate {
    index: ModelIndex,
    label: Label,
}

impl DefaultItemDelegate {
    /// A delegate for `index` showing the model's display text.
    pub fn new(ctx: &UiContext, index: ModelIndex, model: &dyn ItemModel) -> Self {
        Self::with_text(ctx, index, model.display_text(index))
    }

    /// A delegate for `index` showing `text`.
    pub fn with_text(ctx: &UiContext, index: ModelIndex, text: impl Into<String>) -> Self {
        let mut label = Label::with_class(ctx, class::LIST_ITEM, text);
        label.widget_base_mut().set_name(format!("row {}", index.row()));
        Self { index, label }
    }

    /// The label.
    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl ItemDelegate for DefaultItemDelegate {
    fn index(&self) -> ModelIndex {
        self.index
    }

    fn set_selected(&mut self, selected: bool) {
        self.label.set_selected(selected);
    }

    fn is_selected(&self) -> bool {
        self.label.is_selected()
    }

    fn widget(&self) -> &dyn Widget {
        &self.label
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        &mut self.label
    }
}

/// Renderer producing [`DefaultItemDelegate`]s.
#[derive(Debug, Clone)]
pub struct DefaultItemRenderer {
    ctx: UiContext,
}

impl DefaultItemRenderer {
    /// Create a renderer whose labels are styled from `ctx`.
    pub fn new(ctx: &UiContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl ItemRenderer for DefaultItemRenderer {
    fn create_delegate(&self, index: ModelIndex, model: &dyn ItemModel) -> Box<dyn ItemDelegate> {
        Box::new(DefaultItemDelegate::new(&self.ctx, index, model))
    }
}

static_assertions::assert_impl_all!(DefaultItemDelegate: Send, Sync);
static_assertions::assert_impl_all!(DefaultItemRenderer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListModel;

    #[test]
    fn test_default_delegate_shows_display_text() {
        let ctx = UiContext::headless();
        let model = ListModel::new(vec!["one", "two"]);
        let renderer = DefaultItemRenderer::new(&ctx);

        let mut delegate = renderer.create_delegate(ModelIndex::new(1), &model);
        assert_eq!(delegate.index().row(), 1);

        delegate.set_selected(true);
        assert!(delegate.is_selected());
        assert!(delegate.widget().widget_base().needs_repaint());
    }

    #[test]
    fn test_default_delegate_text() {
        let ctx = UiContext::headless();
        let model = ListModel::new(vec!["one", "two"]);
        let delegate = DefaultItemDelegate::new(&ctx, ModelIndex::new(0), &model);
        assert_eq!(delegate.label().text(), "one");
        assert_eq!(delegate.label().widget_base().class(), class::LIST_ITEM);
    }
}
