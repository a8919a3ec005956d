//! Data roles for item models.
//!
//! Each row can expose several pieces of data, distinguished by role.

use std::fmt;

/// Standard roles for accessing different aspects of item data.
///
/// - **Display**: The primary text to show
/// - **ToolTip**: Text shown when hovering over the item
/// - **Edit**: Value for editing (may differ from display text)
/// - **User(n)**: Application-defined data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    Display,
    ToolTip,
    Edit,
    User(u32),
}

impl ItemRole {
    /// Returns `true` if this is a user-defined role.
    #[inline]
    pub fn is_user_role(&self) -> bool {
        matches!(self, ItemRole::User(_))
    }
}

/// A value returned by [`ItemModel::data`](super::ItemModel::data).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemData {
    /// No data for this role.
    #[default]
    None,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ItemData {
    /// Returns `true` if there is no data.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemData::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemData::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text for display; empty for `None`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ItemData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemData::None => Ok(()),
            ItemData::String(s) => f.write_str(s),
            ItemData::Int(v) => write!(f, "{v}"),
            ItemData::Float(v) => write!(f, "{v}"),
            ItemData::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ItemData {
    fn from(value: &str) -> Self {
        ItemData::String(value.to_string())
    }
}

impl From<String> for ItemData {
    fn from(value: String) -> Self {
        ItemData::String(value)
    }
}

impl From<&String> for ItemData {
    fn from(value: &String) -> Self {
        ItemData::String(value.clone())
    }
}

impl From<i64> for ItemData {
    fn from(value: i64) -> Self {
        ItemData::Int(value)
    }
}

impl From<i32> for ItemData {
    fn from(value: i32) -> Self {
        ItemData::Int(value.into())
    }
}

impl From<f64> for ItemData {
    fn from(value: f64) -> Self {
        ItemData::Float(value)
    }
}

impl From<bool> for ItemData {
    fn from(value: bool) -> Self {
        ItemData::Bool(value)
    }
}

impl<T: Into<ItemData>> From<Option<T>> for ItemData {
    fn from(value: Option<T>) -> Self {
        value.map_or(ItemData::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings() {
        assert_eq!(ItemData::from("a").to_display_string(), "a");
        assert_eq!(ItemData::from(7).to_display_string(), "7");
        assert_eq!(ItemData::None.to_display_string(), "");
        assert_eq!(ItemData::from(None::<bool>), ItemData::None);
    }
}
