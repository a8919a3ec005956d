//! Widget system for Horizon Trellis.
//!
//! This module provides the foundational widget architecture including:
//!
//! - [`Widget`] trait: The base trait for all UI elements
//! - [`WidgetBase`]: Common implementation for widget functionality
//! - Size hints and policies for layout negotiation
//! - A single [`WidgetEvent`] enum for everything a widget can receive
//! - [`EventDispatcher`]: hit-testing, bubbling, capture, hover and focus
//!
//! # Creating a Widget
//!
//! To create a custom widget:
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement the `Widget` trait
//! 3. Provide `size_hint()` for layout
//! 4. Implement `paint()` for rendering
//!
//! ```
//! use horizon_trellis::UiContext;
//! use horizon_trellis::widget::*;
//! use horizon_trellis_render::Color;
//!
//! struct Swatch {
//!     base: WidgetBase,
//!     clicks: u32,
//! }
//!
//! impl Swatch {
//!     fn new(ctx: &UiContext) -> Self {
//!         Self { base: WidgetBase::new(ctx, "Swatch"), clicks: 0 }
//!     }
//! }
//!
//! impl Widget for Swatch {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn size_hint(&self) -> SizeHint {
//!         SizeHint::from_dimensions(40.0, 40.0)
//!     }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>) {
//!         let rect = ctx.rect();
//!         ctx.renderer().fill_rect(rect, Color::BLACK);
//!     }
//!
//!     fn event(&mut self, event: &mut WidgetEvent) -> bool {
//!         match event {
//!             WidgetEvent::MousePress(_) => {
//!                 self.clicks += 1;
//!                 event.accept();
//!                 true
//!             }
//!             _ => false,
//!         }
//!     }
//! }
//!
//! let swatch = Swatch::new(&UiContext::headless());
//! assert_eq!(swatch.clicks, 0);
//! ```
//!
//! # Widget Tree
//!
//! Parents own their children as `Box<dyn Widget>` and expose them by index
//! through [`Widget::child_at`]. Code outside the tree addresses a widget by
//! its [`WidgetPath`] together with its [`WidgetId`].
//!
//! # Coordinate Systems
//!
//! - **Local coordinates**: Origin at widget's top-left corner
//! - **Parent coordinates**: Relative to parent widget's top-left
//! - **Window coordinates**: Relative to the root widget's top-left
//!
//! Events arrive in local coordinates; the dispatcher translates them on
//! the way down and back up while bubbling.

mod base;
mod dispatcher;
mod events;
mod focus;
mod geometry;
pub mod layout;
mod painting;
mod traits;
mod tree;
mod tree_debug;
pub mod widgets;

pub use base::{FocusPolicy, WidgetBase, WidgetId};
pub use dispatcher::{DispatchResult, EventDispatcher, InputEvent};
pub use events::{
    EnterEvent, EventBase, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent, KeyReleaseEvent,
    KeyboardModifiers, LeaveEvent, MouseButton, MouseDoubleClickEvent, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, ResizeEvent, WheelEvent, WidgetEvent,
};
pub use focus::FocusManager;
pub use geometry::{SizeHint, SizePolicy, SizePolicyPair};
pub use layout::{CellConstraint, Layout, LayoutItem};
pub use painting::{layout_tree, paint_tree, tree_needs_layout, tree_needs_repaint};
pub use traits::{PaintContext, Widget};
pub use tree::{WidgetPath, find_path, hit_test, resolve, resolve_mut, visit};
pub use tree_debug::WidgetSnapshot;
