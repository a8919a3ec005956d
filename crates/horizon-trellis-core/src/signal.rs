//! Signal/slot system for Horizon Trellis.
//!
//! Signals are emitted by objects when their state changes, and connected
//! slots (callbacks) are invoked in response. All slots run synchronously on
//! the emitting thread, in the order they were connected.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII handle that disconnects when dropped
//!
//! # Re-entrancy
//!
//! Slots may connect, disconnect, or emit while an emission is in progress.
//! The set of slots is snapshotted when emission starts; a slot disconnected
//! by an earlier slot in the same emission is skipped. Nested emission of the
//! same signal is limited to [`DEFAULT_MAX_EMIT_DEPTH`] levels (configurable
//! per signal); deeper emissions are refused with
//! [`SignalError::RecursionLimit`].
//!
//! # Example
//!
//! ```
//! use horizon_trellis_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::SignalError;
use crate::logging::targets;

/// Nesting depth at which a signal refuses to emit again from inside its own slots.
pub const DEFAULT_MAX_EMIT_DEPTH: usize = 32;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    /// Registration order; slot map keys do not preserve it once slots are reused.
    seq: u64,
}

struct SignalInner<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    next_seq: AtomicU64,
    blocked: AtomicBool,
    depth: AtomicUsize,
    max_depth: AtomicUsize,
}

/// Type-erased view of a signal used by [`ConnectionGuard`].
trait Disconnect: Send + Sync {
    fn disconnect(&self, id: ConnectionId) -> bool;
    fn is_connected(&self, id: ConnectionId) -> bool;
}

impl<Args: 'static> Disconnect for SignalInner<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.lock().contains_key(id)
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`ConnectionGuard`] - Returned by [`connect_scoped`](Self::connect_scoped)
/// - [`crate::Property`] - Often paired with signals for change notification
pub struct Signal<Args> {
    inner: Arc<SignalInner<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                connections: Mutex::new(SlotMap::with_key()),
                next_seq: AtomicU64::new(0),
                blocked: AtomicBool::new(false),
                depth: AtomicUsize::new(0),
                max_depth: AtomicUsize::new(DEFAULT_MAX_EMIT_DEPTH),
            }),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    /// The slot stays connected until [`disconnect`](Self::disconnect) is
    /// called or the signal is dropped; use
    /// [`connect_scoped`](Self::connect_scoped) to tie it to a handle instead.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::Relaxed);
        let connection = Connection {
            slot: Arc::new(slot),
            seq,
        };
        self.inner.connections.lock().insert(connection)
    }

    /// Connect a slot and return a guard that disconnects it when dropped.
    ///
    /// The guard only holds a weak reference to the signal, so it is safe to
    /// drop after the signal itself is gone.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_trellis_core::Signal;
    ///
    /// let signal = Signal::<i32>::new();
    /// {
    ///     let _guard = signal.connect_scoped(|n| println!("{n}"));
    ///     assert_eq!(signal.connection_count(), 1);
    /// }
    /// assert_eq!(signal.connection_count(), 0);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let signal: Weak<dyn Disconnect> = Arc::downgrade(&self.inner) as Weak<dyn Disconnect>;
        ConnectionGuard {
            id,
            signal: Some(signal),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.disconnect(id)
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.inner.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.lock().len()
    }

    /// Whether the given connection is still attached to this signal.
    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.inner.is_connected(id)
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.inner.blocked.load(Ordering::SeqCst)
    }

    /// Set how deeply this signal may be re-emitted from within its own slots.
    pub fn set_max_depth(&self, depth: usize) {
        self.inner.max_depth.store(depth.max(1), Ordering::SeqCst);
    }

    /// The current re-emission limit.
    pub fn max_depth(&self) -> usize {
        self.inner.max_depth.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// A refused emission (see [`try_emit`](Self::try_emit)) is logged at
    /// `warn` level and otherwise ignored.
    #[tracing::instrument(skip_all, target = "horizon_trellis_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if let Err(err) = self.try_emit(args) {
            tracing::warn!(target: targets::SIGNAL, error = %err, "signal emission refused");
        }
    }

    /// Emit the signal and report how many slots ran.
    ///
    /// Returns [`SignalError::RecursionLimit`] without invoking anything when
    /// the signal is already being emitted [`max_depth`](Self::max_depth)
    /// levels deep on the call stack.
    pub fn try_emit(&self, args: Args) -> Result<usize, SignalError> {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return Ok(0);
        }

        let _depth = DepthGuard::enter(&self.inner.depth, self.max_depth())?;

        let slots = self.snapshot();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        let mut invoked = 0;
        for (id, slot) in slots {
            // An earlier slot in this emission may have disconnected this one.
            if !self.inner.is_connected(id) {
                continue;
            }
            slot(&args);
            invoked += 1;
        }
        Ok(invoked)
    }

    /// Clone the current slots out of the lock, ordered by registration.
    fn snapshot(&self) -> Vec<(ConnectionId, Slot<Args>)> {
        let connections = self.inner.connections.lock();
        let mut slots: Vec<(u64, ConnectionId, Slot<Args>)> = connections
            .iter()
            .map(|(id, conn)| (conn.seq, id, conn.slot.clone()))
            .collect();
        drop(connections);
        slots.sort_by_key(|(seq, _, _)| *seq);
        slots.into_iter().map(|(_, id, slot)| (id, slot)).collect()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.inner.connections.lock().len())
            .field("blocked", &self.inner.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// Tracks emission nesting for one signal for the duration of a call.
struct DepthGuard<'a> {
    depth: &'a AtomicUsize,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a AtomicUsize, max: usize) -> Result<Self, SignalError> {
        let previous = depth.fetch_add(1, Ordering::SeqCst);
        if previous >= max {
            depth.fetch_sub(1, Ordering::SeqCst);
            return Err(SignalError::RecursionLimit { depth: previous });
        }
        Ok(Self { depth })
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A connection handle that disconnects its slot when dropped.
///
/// Holding guards in a widget ties listener lifetime to the widget: when the
/// widget is dropped, every slot it registered is removed. The guard does not
/// keep the signal alive.
#[must_use = "dropping a ConnectionGuard disconnects the slot immediately"]
pub struct ConnectionGuard {
    id: ConnectionId,
    signal: Option<Weak<dyn Disconnect>>,
}

impl ConnectionGuard {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether the guarded slot is still attached to a live signal.
    pub fn is_connected(&self) -> bool {
        self.signal
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|signal| signal.is_connected(self.id))
    }

    /// Disconnect now instead of waiting for drop.
    ///
    /// Returns [`SignalError::SignalDropped`] if the signal no longer exists
    /// and [`SignalError::InvalidConnection`] if the slot was already removed.
    pub fn disconnect(mut self) -> Result<(), SignalError> {
        self.release()
    }

    /// Give up the guard without disconnecting, returning the raw ID.
    pub fn detach(mut self) -> ConnectionId {
        self.signal = None;
        self.id
    }

    fn release(&mut self) -> Result<(), SignalError> {
        let signal = self
            .signal
            .take()
            .and_then(|weak| weak.upgrade())
            .ok_or(SignalError::SignalDropped)?;
        if signal.disconnect(self.id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.signal.is_some() {
            let _ = self.release();
        }
    }
}

impl fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let ids: Vec<_> = (0..4)
            .map(|n| {
                let order = order.clone();
                signal.connect(move |_| order.lock().push(n))
            })
            .collect();

        // Free a slot so the next insert reuses its key.
        signal.disconnect(ids[1]);
        let order_clone = order.clone();
        signal.connect(move |_| order_clone.lock().push(99));

        signal.emit(());
        assert_eq!(*order.lock(), vec![0, 2, 3, 99]);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();
        for _ in 0..5 {
            signal.connect(|_| {});
        }

        assert_eq!(signal.connection_count(), 5);
        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let guard = signal.connect_scoped(move |&value| {
                received_clone.lock().push(value);
            });
            assert!(guard.is_connected());
            signal.emit(1);
        }

        signal.emit(2);
        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard_outlives_signal() {
        let signal = Signal::<i32>::new();
        let guard = signal.connect_scoped(|_| {});
        drop(signal);

        assert!(!guard.is_connected());
        assert_eq!(guard.disconnect(), Err(SignalError::SignalDropped));
    }

    #[test]
    fn test_connection_guard_explicit_disconnect() {
        let signal = Signal::<i32>::new();
        let guard = signal.connect_scoped(|_| {});
        let id = guard.id();
        signal.disconnect(id);

        assert_eq!(guard.disconnect(), Err(SignalError::InvalidConnection));
    }

    #[test]
    fn test_connection_guard_detach() {
        let signal = Signal::<i32>::new();
        let id = signal.connect_scoped(|_| {}).detach();
        assert!(signal.is_connected(id));
    }

    #[test]
    fn test_slot_disconnecting_later_slot() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let victim = Arc::new(Mutex::new(None::<ConnectionId>));
        let signal_clone = signal.clone();
        let victim_clone = victim.clone();
        signal.connect(move |_| {
            if let Some(id) = victim_clone.lock().take() {
                signal_clone.disconnect(id);
            }
        });
        let calls_clone = calls.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        *victim.lock() = Some(id);

        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reentrant_emit_is_bounded() {
        let signal = Arc::new(Signal::<u32>::new());
        signal.set_max_depth(5);
        let calls = Arc::new(AtomicUsize::new(0));

        let signal_clone = signal.clone();
        let calls_clone = calls.clone();
        signal.connect(move |&n| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            signal_clone.emit(n + 1);
        });

        assert_eq!(signal.try_emit(0), Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_try_emit_reports_recursion_limit() {
        let signal = Arc::new(Signal::<()>::new());
        signal.set_max_depth(1);
        let nested = Arc::new(Mutex::new(None));

        let signal_clone = signal.clone();
        let nested_clone = nested.clone();
        signal.connect(move |_| {
            *nested_clone.lock() = Some(signal_clone.try_emit(()));
        });

        signal.emit(());
        assert_eq!(
            *nested.lock(),
            Some(Err(SignalError::RecursionLimit { depth: 1 }))
        );
    }

    #[test]
    fn test_slot_connecting_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let signal_clone = signal.clone();
        signal.connect(move |_| {
            signal_clone.connect(|_| {});
        });

        assert_eq!(signal.try_emit(()), Ok(1));
        assert_eq!(signal.connection_count(), 2);
    }
}
