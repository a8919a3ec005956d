//! Standard widgets for Horizon Trellis.
//!
//! This module provides common UI widgets:
//!
//! - [`Label`]: Text display widget
//! - [`IconPanel`]: A single centred icon glyph
//! - [`PushButton`]: Standard clickable button
//! - [`ToggleButton`]: Button with a checked state
//! - [`AbstractButton`]: Base for all button widgets
//! - [`Panel`]: Container with an optional layout strategy
//! - [`ScrollBar`]: Integer range selector
//! - [`TextField`]: Single-line text input
//! - [`ListView`]: Scrollable, selectable view of an item model

mod abstract_button;
mod icon_panel;
mod label;
mod list_view;
mod panel;
mod push_button;
mod scroll_bar;
mod text_field;
mod toggle_button;

pub use abstract_button::{AbstractButton, ButtonState};
pub use icon_panel::IconPanel;
pub use label::{Label, TextAlign};
pub use list_view::ListView;
pub use panel::Panel;
pub use push_button::PushButton;
pub use scroll_bar::{Orientation, ScrollBar};
pub use text_field::TextField;
pub use toggle_button::ToggleButton;
