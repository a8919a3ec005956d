//! Model/View types for data-backed widgets.
//!
//! Data lives in an [`ItemModel`]; views observe its [`ModelSignals`] and
//! build one [`ItemDelegate`] per row through an [`ItemRenderer`]. Which rows
//! are chosen is held separately in a [`SelectionModel`] as an immutable
//! [`Selection`] value.
//!
//! # Core Types
//!
//! - [`ModelIndex`]: identifies a row
//! - [`ItemRole`] / [`ItemData`]: role-keyed row data
//! - [`ItemModel`]: the trait models implement
//! - [`ListModel`]: a vector-backed model
//! - [`Selection`] / [`SelectionModel`] / [`SelectionMode`]
//! - [`ItemDelegate`] / [`ItemRenderer`]: per-row display widgets
//!
//! # Example
//!
//! ```
//! use horizon_trellis::model::{ItemModel, ListModel, ModelChange, ModelIndex};
//!
//! let model = ListModel::new(vec!["Apple".to_string(), "Banana".to_string()]);
//! assert_eq!(model.display_text(ModelIndex::new(1)), "Banana");
//!
//! let _guard = model.signals().changed.connect_scoped(|change| {
//!     if let ModelChange::RowsInserted { first, .. } = change {
//!         println!("row {first} inserted");
//!     }
//! });
//! model.push("Cherry".to_string());
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  changed   ┌─────────────┐  create_delegate  ┌──────────────┐
//! │  ItemModel  │──────────> │  ListView   │─────────────────> │ ItemRenderer │
//! └─────────────┘            └─────────────┘                   └──────────────┘
//!                              │        ^
//!          selection_changed   │        │ press / keys
//!                              v        │
//!                          ┌────────────────┐
//!                          │ SelectionModel │
//!                          └────────────────┘
//! ```

mod delegate;
mod error;
mod index;
mod list_model;
mod role;
mod selection;
mod traits;

pub use delegate::{DefaultItemDelegate, DefaultItemRenderer, ItemDelegate, ItemRenderer};
pub use error::ModelError;
pub use index::ModelIndex;
pub use list_model::{DataExtractor, ListItem, ListModel};
pub use role::{ItemData, ItemRole};
pub use selection::{Selection, SelectionMode, SelectionModel};
pub use traits::{ItemModel, ModelChange, ModelSignals};
