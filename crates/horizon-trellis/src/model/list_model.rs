//! Generic list model implementation.
//!
//! `ListModel<T>` exposes a `Vec<T>` as an [`ItemModel`]. Row data comes
//! either from the items themselves ([`ListItem`]) or from an extractor
//! closure supplied at construction.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemModel, ModelSignals};

/// Items that can provide their own display data.
///
/// # Example
///
/// ```
/// use horizon_trellis::model::{ItemData, ListItem};
///
/// struct Person {
///     name: String,
///     email: String,
/// }
///
/// impl ListItem for Person {
///     fn display(&self) -> ItemData {
///         ItemData::from(&self.name)
///     }
///
///     fn tooltip(&self) -> ItemData {
///         ItemData::from(&self.email)
///     }
/// }
/// ```
pub trait ListItem: Send + Sync {
    /// Returns the primary display text for this item.
    fn display(&self) -> ItemData;

    /// Returns the tooltip text for this item.
    fn tooltip(&self) -> ItemData {
        ItemData::None
    }

    /// Returns the edit value for this item.
    fn edit(&self) -> ItemData {
        self.display()
    }

    /// Returns data for a custom role.
    fn data(&self, _role: ItemRole) -> ItemData {
        ItemData::None
    }
}

impl ListItem for String {
    fn display(&self) -> ItemData {
        ItemData::from(self.as_str())
    }
}

impl ListItem for &'static str {
    fn display(&self) -> ItemData {
        ItemData::from(*self)
    }
}

/// Type alias for a data extractor function.
pub type DataExtractor<T> = Arc<dyn Fn(&T, ItemRole) -> ItemData + Send + Sync>;

/// A list model backed by a vector.
///
/// Every mutation updates the vector under a write lock, releases the lock,
/// and then emits [`ModelSignals::changed`], so slots may read the model.
///
/// # Example
///
/// ```
/// use horizon_trellis::model::{ItemModel, ItemRole, ItemData, ListModel};
///
/// let model = ListModel::with_extractor(vec![(1, "one"), (2, "two")], |item, role| match role {
///     ItemRole::Display => ItemData::from(item.1),
///     ItemRole::User(0) => ItemData::from(item.0),
///     _ => ItemData::None,
/// });
///
/// model.push((3, "three"));
/// assert_eq!(model.row_count(), 3);
/// ```
pub struct ListModel<T> {
    items: RwLock<Vec<T>>,
    extractor: DataExtractor<T>,
    signals: ModelSignals,
}

impl<T: ListItem + 'static> ListModel<T> {
    /// Creates a list model whose items provide their own data.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_extractor(items, |item: &T, role| match role {
            ItemRole::Display => item.display(),
            ItemRole::ToolTip => item.tooltip(),
            ItemRole::Edit => item.edit(),
            ItemRole::User(_) => item.data(role),
        })
    }

    /// Creates an empty list model.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Send + Sync + 'static> ListModel<T> {
    /// Creates a list model with a data extractor.
    pub fn with_extractor<F>(items: Vec<T>, extractor: F) -> Self
    where
        F: Fn(&T, ItemRole) -> ItemData + Send + Sync + 'static,
    {
        Self {
            items: RwLock::new(items),
            extractor: Arc::new(extractor),
            signals: ModelSignals::new(),
        }
    }

    /// Returns the number of items in the model.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: T) {
        // Row is computed under the same lock that performs the insert.
        let row = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.signals.emit_rows_inserted(row, row, || {});
    }

    /// Inserts an item at `row`, clamped to the end of the list.
    pub fn insert(&self, row: usize, item: T) {
        let row = {
            let mut items = self.items.write();
            let row = row.min(items.len());
            items.insert(row, item);
            row
        };
        self.signals.emit_rows_inserted(row, row, || {});
    }

    /// Removes and returns the item at `row`, or `None` if out of range.
    pub fn remove(&self, row: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.write();
            (row < items.len()).then(|| items.remove(row))
        };
        if removed.is_some() {
            self.signals.emit_rows_removed(row, row, || {});
        }
        removed
    }

    /// Removes all items from the model.
    pub fn clear(&self) {
        self.signals.emit_reset(|| {
            self.items.write().clear();
        });
    }

    /// Replaces all items in the model.
    pub fn set_items(&self, items: Vec<T>) {
        self.signals.emit_reset(|| {
            *self.items.write() = items;
        });
    }

    /// Read access to the items.
    pub fn items(&self) -> impl Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Mutate the item at `row` through a closure and report it as changed.
    ///
    /// Returns `None` if the row does not exist.
    pub fn modify<F, R>(&self, row: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut items = self.items.write();
            let item = items.get_mut(row)?;
            f(item)
        };
        self.signals.emit_data_changed(row, row);
        Some(result)
    }

    /// Swaps two items and reports both rows as changed.
    pub fn swap(&self, a: usize, b: usize) {
        {
            let mut items = self.items.write();
            if a >= items.len() || b >= items.len() {
                return;
            }
            items.swap(a, b);
        }
        self.signals.emit_data_changed(a.min(b), a.max(b));
    }

    /// Sorts the list using the provided comparator and reports a reset.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.signals.emit_reset(|| {
            self.items.write().sort_by(compare);
        });
    }
}

impl<T: Send + Sync + 'static> ItemModel for ListModel<T> {
    fn row_count(&self) -> usize {
        self.items.read().len()
    }

    fn data(&self, index: ModelIndex, role: ItemRole) -> ItemData {
        if index.column() != 0 {
            return ItemData::None;
        }
        let items = self.items.read();
        match items.get(index.row()) {
            Some(item) => (self.extractor)(item, role),
            None => ItemData::None,
        }
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

static_assertions::assert_impl_all!(ListModel<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelChange;
    use parking_lot::Mutex;

    fn recorder(model: &ListModel<String>) -> Arc<Mutex<Vec<ModelChange>>> {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        model.signals().changed.connect(move |change| {
            changes_clone.lock().push(change.clone());
        });
        changes
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_model_basic() {
        let model = ListModel::new(strings(&["Apple", "Banana", "Cherry"]));

        assert_eq!(model.row_count(), 3);
        assert_eq!(model.display_text(ModelIndex::new(1)), "Banana");
        assert_eq!(model.data(ModelIndex::new(5), ItemRole::Display), ItemData::None);
        assert_eq!(model.data(ModelIndex::with_column(0, 1), ItemRole::Display), ItemData::None);
    }

    #[test]
    fn test_mutations_emit_changes() {
        let model = ListModel::new(strings(&["a", "b"]));
        let changes = recorder(&model);

        model.push("c".to_string());
        model.insert(99, "d".to_string());
        assert_eq!(model.remove(0).as_deref(), Some("a"));
        assert_eq!(model.remove(10), None);
        model.modify(0, |s| s.push('!'));
        model.clear();

        assert_eq!(
            *changes.lock(),
            vec![
                ModelChange::RowsInserted { first: 2, last: 2 },
                ModelChange::RowsInserted { first: 3, last: 3 },
                ModelChange::RowsRemoved { first: 0, last: 0 },
                ModelChange::DataChanged { first: 0, last: 0 },
                ModelChange::Reset,
            ]
        );
        assert!(model.is_empty());
    }

    #[test]
    fn test_slot_can_read_model_during_emit() {
        let model = Arc::new(ListModel::new(strings(&["a"])));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let model_clone = model.clone();
        let seen_clone = seen.clone();
        model.signals().changed.connect(move |_| {
            seen_clone.lock().push(model_clone.row_count());
        });

        model.push("b".to_string());
        model.set_items(Vec::new());
        assert_eq!(*seen.lock(), vec![2, 0]);
    }

    #[test]
    fn test_sort_and_swap() {
        let model = ListModel::new(strings(&["c", "a", "b"]));
        model.sort_by(|a, b| a.cmp(b));
        assert_eq!(*model.items(), strings(&["a", "b", "c"]));

        model.swap(0, 2);
        assert_eq!(*model.items(), strings(&["c", "b", "a"]));
    }
}
