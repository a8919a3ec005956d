//! Model index for addressing rows in an item model.

use std::fmt;

/// Identifies one row (and optionally a column) of an [`ItemModel`](super::ItemModel).
///
/// `ModelIndex` is a plain value: it does not borrow the model and is not
/// updated when the model changes. An index obtained before rows were
/// inserted or removed may name a different row, or no row, afterwards.
/// "No index" is expressed as `Option<ModelIndex>::None`.
///
/// Two indexes are equal when both row and column are equal. List models
/// only use column 0, so for them equality is equality by row.
///
/// # Example
///
/// ```
/// use horizon_trellis::model::ModelIndex;
///
/// let index = ModelIndex::new(3);
/// assert_eq!(index.row(), 3);
/// assert_eq!(index.column(), 0);
/// assert_eq!(index.sibling(4), ModelIndex::new(4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ModelIndex {
    row: usize,
    column: usize,
}

impl ModelIndex {
    /// Index of `row` in column 0.
    #[inline]
    pub const fn new(row: usize) -> Self {
        Self { row, column: 0 }
    }

    /// Index of a specific cell.
    #[inline]
    pub const fn with_column(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// The row.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// The column.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Index of another row in the same column.
    #[inline]
    pub const fn sibling(&self, row: usize) -> Self {
        Self {
            row,
            column: self.column,
        }
    }
}

impl fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelIndex({}, {})", self.row, self.column)
    }
}

impl fmt::Display for ModelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<usize> for ModelIndex {
    fn from(row: usize) -> Self {
        Self::new(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_includes_column() {
        assert_eq!(ModelIndex::new(2), ModelIndex::with_column(2, 0));
        assert_ne!(ModelIndex::new(2), ModelIndex::with_column(2, 1));
        assert_ne!(ModelIndex::new(2), ModelIndex::new(3));
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", ModelIndex::with_column(1, 2)), "ModelIndex(1, 2)");
    }
}
