//! Horizon Trellis - a retained-mode widget toolkit.
//!
//! Widgets form an owned tree under a [`Ui`]. Input enters through the
//! [`EventDispatcher`](widget::EventDispatcher), is hit-tested to the
//! deepest widget under the pointer and bubbles up until a widget accepts
//! it. Containers place their children through an opaque
//! [`Layout`](widget::Layout) strategy. Data-backed views read rows from an
//! [`ItemModel`](model::ItemModel) and keep selection in a
//! [`SelectionModel`](model::SelectionModel).
//!
//! Nothing is global: styles, font metrics and configuration travel in a
//! [`UiContext`] handed to every widget constructor.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_trellis::prelude::*;
//! use horizon_trellis_render::Size;
//!
//! let ctx = UiContext::headless();
//! let model = Arc::new(ListModel::new(vec!["Red", "Green", "Blue"]));
//!
//! let list = ListView::new(&ctx)
//!     .with_model(model)
//!     .with_selection_mode(SelectionMode::Extended);
//!
//! let mut ui = Ui::new(ctx, list);
//! ui.resize(Size::new(200.0, 120.0));
//! ui.layout();
//! println!("{}", ui.debug_tree());
//! ```

pub mod context;
pub mod model;
pub mod prelude;
pub mod ui;
pub mod widget;

pub use context::UiContext;
pub use ui::Ui;
pub use widget::widgets;
