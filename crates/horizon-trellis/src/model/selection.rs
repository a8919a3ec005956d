//! Selection values and the selection model for item views.
//!
//! A [`Selection`] is an immutable, ordered list of [`ModelIndex`] values.
//! Every change produces a new `Selection`; the [`SelectionModel`] holds the
//! current one and reports each replacement as an `(old, new)` pair.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::model::{ModelIndex, Selection, SelectionModel};
//!
//! let mut model = SelectionModel::new();
//! model.selection_changed.connect(|(old, new)| {
//!     println!("selection: {} -> {} items", old.len(), new.len());
//! });
//!
//! model.add(ModelIndex::new(2));
//! model.add(ModelIndex::new(5));
//!
//! // Newest first.
//! assert_eq!(
//!     model.selection(),
//!     &Selection::from_indexes([ModelIndex::new(5), ModelIndex::new(2)])
//! );
//! ```

use std::fmt;

use horizon_trellis_core::Signal;
use horizon_trellis_core::logging::targets;

use super::index::ModelIndex;

/// How presses on a view translate into selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Nothing can be selected by the user.
    None,
    /// At most one item is selected; Ctrl+press on the selected item clears it.
    Single,
    /// Ctrl+press toggles items in and out of a multi-item selection.
    #[default]
    Extended,
}

impl SelectionMode {
    /// Returns `true` if user interaction may change the selection.
    #[inline]
    pub fn allows_selection(&self) -> bool {
        !matches!(self, SelectionMode::None)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// An immutable, ordered collection of selected indexes.
///
/// Insertion order is the selection order: [`expand`](Self::expand) puts the
/// new index first. Equality compares contents and order.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    indexes: Vec<ModelIndex>,
}

impl Selection {
    /// The empty selection.
    pub const EMPTY: Selection = Selection {
        indexes: Vec::new(),
    };

    /// A selection holding `index`, or [`EMPTY`](Self::EMPTY) for `None`.
    pub fn of(index: Option<ModelIndex>) -> Self {
        match index {
            Some(index) => Self {
                indexes: vec![index],
            },
            None => Self::EMPTY,
        }
    }

    /// A selection holding `indexes` in the given order.
    pub fn from_indexes(indexes: impl IntoIterator<Item = ModelIndex>) -> Self {
        Self {
            indexes: indexes.into_iter().collect(),
        }
    }

    /// A new selection with `index` prepended.
    ///
    /// Duplicates are not filtered; check [`contains`](Self::contains) first.
    #[must_use]
    pub fn expand(&self, index: ModelIndex) -> Self {
        let mut indexes = Vec::with_capacity(self.indexes.len() + 1);
        indexes.push(index);
        indexes.extend_from_slice(&self.indexes);
        Self { indexes }
    }

    /// A new selection with every index equal to `index` removed.
    #[must_use]
    pub fn shrink(&self, index: ModelIndex) -> Self {
        Self {
            indexes: self
                .indexes
                .iter()
                .copied()
                .filter(|i| *i != index)
                .collect(),
        }
    }

    /// Returns `true` if `index` is selected.
    pub fn contains(&self, index: ModelIndex) -> bool {
        self.indexes.contains(&index)
    }

    /// Returns `true` if any selected index is on `row`.
    pub fn contains_row(&self, row: usize) -> bool {
        self.indexes.iter().any(|i| i.row() == row)
    }

    /// Number of indexes, counting duplicates.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns `true` for the empty selection.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// The first (most recently added) index.
    pub fn first(&self) -> Option<ModelIndex> {
        self.indexes.first().copied()
    }

    /// Iterates the indexes in selection order.
    pub fn iter(&self) -> impl Iterator<Item = ModelIndex> + '_ {
        self.indexes.iter().copied()
    }

    /// The indexes in selection order.
    pub fn indexes(&self) -> &[ModelIndex] {
        &self.indexes
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.indexes.iter().map(|i| i.row()))
            .finish()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = ModelIndex;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ModelIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indexes.iter().copied()
    }
}

impl FromIterator<ModelIndex> for Selection {
    fn from_iter<I: IntoIterator<Item = ModelIndex>>(iter: I) -> Self {
        Self::from_indexes(iter)
    }
}

// ============================================================================
// SelectionModel
// ============================================================================

/// Holds the current [`Selection`] and notifies listeners of replacements.
///
/// # Signals
///
/// - `selection_changed`: emitted with `(old, new)` whenever the selection
///   is replaced by a different value. Setting a selection equal to the
///   current one changes nothing and emits nothing.
pub struct SelectionModel {
    current: Selection,

    /// Emitted when the selection changes. Args: (old, new)
    pub selection_changed: Signal<(Selection, Selection)>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// Creates a selection model with the empty selection.
    pub fn new() -> Self {
        Self {
            current: Selection::EMPTY,
            selection_changed: Signal::new(),
        }
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.current
    }

    /// Returns `true` if `index` is selected.
    pub fn is_selected(&self, index: ModelIndex) -> bool {
        self.current.contains(index)
    }

    /// Returns `true` if any index on `row` is selected.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.current.contains_row(row)
    }

    /// Returns `true` if anything is selected.
    pub fn has_selection(&self) -> bool {
        !self.current.is_empty()
    }

    /// Replaces the selection and notifies listeners with `(old, new)`.
    ///
    /// Returns `false` (without notifying) if `selection` equals the current
    /// selection.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        if selection == self.current {
            return false;
        }
        let old = std::mem::replace(&mut self.current, selection);
        tracing::debug!(
            target: targets::SELECTION,
            old = ?old,
            new = ?self.current,
            "selection changed"
        );
        self.selection_changed.emit((old, self.current.clone()));
        true
    }

    /// Adds `index` to the front of the selection unless already present.
    pub fn add(&mut self, index: ModelIndex) -> bool {
        if self.current.contains(index) {
            return false;
        }
        let next = self.current.expand(index);
        self.set_selection(next)
    }

    /// Removes every occurrence of `index` from the selection.
    pub fn remove(&mut self, index: ModelIndex) -> bool {
        let next = self.current.shrink(index);
        self.set_selection(next)
    }

    /// Adds `index` if absent, removes it if present.
    pub fn toggle(&mut self, index: ModelIndex) -> bool {
        if self.current.contains(index) {
            self.remove(index)
        } else {
            self.add(index)
        }
    }

    /// Replaces the selection with `index` alone, or with nothing.
    pub fn replace(&mut self, index: Option<ModelIndex>) -> bool {
        self.set_selection(Selection::of(index))
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) -> bool {
        self.set_selection(Selection::EMPTY)
    }
}

impl fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionModel")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Selection: Send, Sync);
static_assertions::assert_impl_all!(SelectionModel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn idx(row: usize) -> ModelIndex {
        ModelIndex::new(row)
    }

    fn sel(rows: &[usize]) -> Selection {
        rows.iter().map(|r| idx(*r)).collect()
    }

    #[test]
    fn test_of_none_is_empty() {
        assert_eq!(Selection::of(None), Selection::EMPTY);
        assert_eq!(Selection::of(Some(idx(3))), sel(&[3]));
        assert!(Selection::EMPTY.is_empty());
    }

    #[test]
    fn test_expand_prepends() {
        let base = sel(&[1, 2]);
        let expanded = base.expand(idx(7));

        assert_eq!(expanded, sel(&[7, 1, 2]));
        assert_eq!(base, sel(&[1, 2]));
    }

    #[test]
    fn test_expand_grows_by_one() {
        let samples = [sel(&[]), sel(&[0]), sel(&[4, 2, 9]), sel(&[3, 3])];
        for s in samples {
            for row in [1, 5, 8] {
                let i = idx(row);
                if s.contains(i) {
                    continue;
                }
                let expanded = s.expand(i);
                assert!(expanded.contains(i));
                assert_eq!(expanded.len(), s.len() + 1);
            }
        }
    }

    #[test]
    fn test_shrink_removes_every_occurrence() {
        let samples = [sel(&[1]), sel(&[1, 2, 1]), sel(&[2, 1, 1, 3])];
        for s in samples {
            let i = idx(1);
            let count = s.iter().filter(|x| *x == i).count();
            let shrunk = s.shrink(i);
            assert!(!shrunk.contains(i));
            assert_eq!(shrunk.len(), s.len() - count);
        }
        assert_eq!(sel(&[4, 1, 5]).shrink(idx(1)), sel(&[4, 5]));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert_ne!(sel(&[1, 2]), sel(&[2, 1]));
        assert!(sel(&[1, 2]).contains_row(2));
        assert!(!sel(&[1, 2]).contains_row(3));
    }

    #[test]
    fn test_model_notifies_old_and_new() {
        let mut model = SelectionModel::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_clone = log.clone();
        model.selection_changed.connect(move |(old, new)| {
            log_clone.lock().push((old.clone(), new.clone()));
        });

        assert!(model.add(idx(1)));
        assert!(model.add(idx(2)));
        assert!(!model.add(idx(2)));
        assert!(model.remove(idx(1)));
        assert!(model.clear_selection());

        assert_eq!(
            *log.lock(),
            vec![
                (sel(&[]), sel(&[1])),
                (sel(&[1]), sel(&[2, 1])),
                (sel(&[2, 1]), sel(&[2])),
                (sel(&[2]), sel(&[])),
            ]
        );
    }

    #[test]
    fn test_setting_equal_selection_is_silent() {
        let mut model = SelectionModel::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        model.selection_changed.connect(move |_| *count_clone.lock() += 1);

        model.replace(Some(idx(4)));
        model.replace(Some(idx(4)));
        model.clear_selection();
        model.clear_selection();

        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_toggle() {
        let mut model = SelectionModel::new();
        model.toggle(idx(1));
        model.toggle(idx(2));
        model.toggle(idx(1));
        assert_eq!(model.selection(), &sel(&[2]));
        assert!(model.is_row_selected(2));
        assert!(!model.is_selected(idx(1)));
    }
}
