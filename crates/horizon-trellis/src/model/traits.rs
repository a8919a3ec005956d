//! The item model trait and its change notifications.

use horizon_trellis_core::Signal;
use horizon_trellis_core::logging::targets;

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};

/// What changed in a model.
///
/// Views may treat every variant as "data changed"; the row ranges are
/// informative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChange {
    /// Rows `first..=last` were inserted.
    RowsInserted { first: usize, last: usize },
    /// Rows `first..=last` were removed.
    RowsRemoved { first: usize, last: usize },
    /// The data of rows `first..=last` changed in place.
    DataChanged { first: usize, last: usize },
    /// The whole model was replaced.
    Reset,
}

/// Signals emitted by item models.
///
/// Models call the `emit_*` helpers after their storage is updated and any
/// internal locks are released, so connected slots can read the model.
pub struct ModelSignals {
    /// Emitted after every change to the model.
    pub changed: Signal<ModelChange>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            changed: Signal::new(),
        }
    }

    /// Runs `insert_fn`, then reports rows `first..=last` as inserted.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        insert_fn();
        self.emit(ModelChange::RowsInserted { first, last });
    }

    /// Runs `remove_fn`, then reports rows `first..=last` as removed.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        remove_fn();
        self.emit(ModelChange::RowsRemoved { first, last });
    }

    /// Reports rows `first..=last` as changed in place.
    pub fn emit_data_changed(&self, first: usize, last: usize) {
        self.emit(ModelChange::DataChanged { first, last });
    }

    /// Runs `reset_fn`, then reports a reset.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        reset_fn();
        self.emit(ModelChange::Reset);
    }

    fn emit(&self, change: ModelChange) {
        tracing::trace!(target: targets::MODEL, ?change, "model changed");
        self.changed.emit(change);
    }
}

/// A source of rows for data-backed views.
///
/// Implementors provide the row count and per-row data on demand, and own a
/// [`ModelSignals`] that they notify whenever the underlying data changes.
///
/// # Example
///
/// ```
/// use horizon_trellis::model::{ItemData, ItemModel, ItemRole, ModelIndex, ModelSignals};
///
/// struct Squares {
///     signals: ModelSignals,
/// }
///
/// impl ItemModel for Squares {
///     fn row_count(&self) -> usize {
///         10
///     }
///
///     fn data(&self, index: ModelIndex, role: ItemRole) -> ItemData {
///         match role {
///             ItemRole::Display => ItemData::from((index.row() * index.row()) as i64),
///             _ => ItemData::None,
///         }
///     }
///
///     fn signals(&self) -> &ModelSignals {
///         &self.signals
///     }
/// }
///
/// let model = Squares { signals: ModelSignals::new() };
/// assert_eq!(model.display_text(ModelIndex::new(3)), "9");
/// assert_eq!(model.index(10), None);
/// ```
pub trait ItemModel: Send + Sync {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Data for `index` in `role`. Out-of-range indexes yield [`ItemData::None`].
    fn data(&self, index: ModelIndex, role: ItemRole) -> ItemData;

    /// The model's change signals.
    fn signals(&self) -> &ModelSignals;

    /// Index of `row`, or `None` if the row does not exist.
    fn index(&self, row: usize) -> Option<ModelIndex> {
        (row < self.row_count()).then(|| ModelIndex::new(row))
    }

    /// Display text for `index`.
    fn display_text(&self, index: ModelIndex) -> String {
        self.data(index, ItemRole::Display).to_display_string()
    }

    /// Returns `true` when the model has no rows.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_emit_helpers_run_closure_first() {
        let signals = ModelSignals::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_clone = log.clone();
        signals.changed.connect(move |change| {
            log_clone.lock().push(format!("{change:?}"));
        });

        let log_clone = log.clone();
        signals.emit_rows_inserted(2, 4, || log_clone.lock().push("insert".to_string()));
        signals.emit_reset(|| {});

        assert_eq!(
            *log.lock(),
            vec![
                "insert".to_string(),
                "RowsInserted { first: 2, last: 4 }".to_string(),
                "Reset".to_string(),
            ]
        );
    }
}
