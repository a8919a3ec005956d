//! Errors reported by models and data-backed views.

use thiserror::Error;

/// An operation addressed a row the model does not have, or needed a model
/// that was not set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// `row` is not in `0..row_count`.
    #[error("row {row} is out of range for a model with {row_count} rows")]
    RowOutOfRange { row: usize, row_count: usize },

    /// The view has no model.
    #[error("no model is set")]
    NoModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ModelError::RowOutOfRange { row: 7, row_count: 3 };
        assert_eq!(err.to_string(), "row 7 is out of range for a model with 3 rows");
    }
}
