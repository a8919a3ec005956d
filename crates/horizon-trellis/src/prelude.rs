//! Prelude module for Horizon Trellis.
//!
//! ```
//! use horizon_trellis::prelude::*;
//! ```

// ============================================================================
// Context and root
// ============================================================================

pub use crate::context::UiContext;
pub use crate::ui::Ui;

// ============================================================================
// Signals and properties
// ============================================================================

pub use horizon_trellis_core::{ConnectionGuard, ConnectionId, Property, Signal, ToolkitConfig};

// ============================================================================
// Widget foundation
// ============================================================================

pub use crate::widget::{
    InputEvent, PaintContext, SizeHint, SizePolicy, SizePolicyPair, Widget, WidgetBase, WidgetEvent,
};

// ============================================================================
// Widgets and layouts
// ============================================================================

pub use crate::widget::layout::{CellConstraint, FlowLayout, GridBagLayout, Layout};
pub use crate::widget::widgets::{
    ButtonState, IconPanel, Label, ListView, Orientation, Panel, PushButton, ScrollBar, TextField, ToggleButton,
};

// ============================================================================
// Models
// ============================================================================

pub use crate::model::{
    DefaultItemRenderer, ItemDelegate, ItemModel, ItemRenderer, ListModel, ModelIndex, Selection,
    SelectionMode, SelectionModel,
};
