//! Frame-driven timers.
//!
//! A [`TimerManager`] owns the state of every [`Timer`] created against it
//! and advances them when the host calls [`TimerManager::update`] with the
//! time that passed since the previous frame. No thread or clock is
//! involved, so timers are deterministic under test.
//!
//! A timer first fires once its delay has passed. With a zero period it then
//! stops; otherwise it keeps firing every period until stopped. At most one
//! periodic fire happens per update.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_trellis_core::{Timer, TimerManager};
//!
//! let timers = Arc::new(TimerManager::new());
//! let blink = Timer::new(&timers, Duration::from_millis(500), Duration::from_millis(500));
//! blink.timeout().connect(|_| println!("blink"));
//! blink.start();
//!
//! timers.update(Duration::from_millis(600));
//! assert!(blink.is_active());
//! ```

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;
use crate::signal::Signal;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

#[derive(Debug)]
struct TimerData {
    delay: Duration,
    period: Duration,
    elapsed: Duration,
    passed_delay: bool,
    active: bool,
    timeout: Arc<Signal<()>>,
}

impl TimerData {
    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.passed_delay = false;
    }

    /// Advance by `delta`; returns whether the timer fires.
    fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;

        if !self.passed_delay {
            if self.elapsed <= self.delay {
                return false;
            }
            self.passed_delay = true;
            if self.period.is_zero() {
                self.active = false;
            } else {
                self.elapsed -= self.delay;
            }
            return true;
        }

        if self.elapsed > self.period {
            self.elapsed -= self.period;
            return true;
        }
        false
    }
}

/// Registry of timers advanced by frame updates.
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: Mutex<SlotMap<TimerId, TimerData>>,
}

impl TimerManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every running timer by `delta` and notify the ones that fire.
    ///
    /// Returns the number of timers that fired. Slots run after the registry
    /// lock is released, so they may start or stop timers.
    pub fn update(&self, delta: Duration) -> usize {
        let fired: Vec<Arc<Signal<()>>> = {
            let mut timers = self.timers.lock();
            timers
                .values_mut()
                .filter(|timer| timer.active)
                .filter_map(|timer| timer.advance(delta).then(|| timer.timeout.clone()))
                .collect()
        };
        if !fired.is_empty() {
            tracing::trace!(target: targets::CORE, fired = fired.len(), "timers fired");
        }
        for timeout in &fired {
            timeout.emit(());
        }
        fired.len()
    }

    /// Number of running timers.
    pub fn active_count(&self) -> usize {
        self.timers.lock().values().filter(|timer| timer.active).count()
    }

    fn insert(&self, data: TimerData) -> TimerId {
        self.timers.lock().insert(data)
    }

    fn with_timer<R>(&self, id: TimerId, f: impl FnOnce(&mut TimerData) -> R) -> Option<R> {
        self.timers.lock().get_mut(id).map(f)
    }

    fn remove(&self, id: TimerId) {
        self.timers.lock().remove(id);
    }
}

/// A handle to one timer in a [`TimerManager`].
///
/// The timer is created stopped. Dropping the handle removes it from the
/// manager.
pub struct Timer {
    id: TimerId,
    manager: Weak<TimerManager>,
    timeout: Arc<Signal<()>>,
}

impl Timer {
    /// Register a stopped timer that fires after `delay`, then every
    /// `period` (never again if `period` is zero).
    pub fn new(manager: &Arc<TimerManager>, delay: Duration, period: Duration) -> Self {
        let timeout = Arc::new(Signal::new());
        let id = manager.insert(TimerData {
            delay,
            period,
            elapsed: Duration::ZERO,
            passed_delay: false,
            active: false,
            timeout: timeout.clone(),
        });
        Self {
            id,
            manager: Arc::downgrade(manager),
            timeout,
        }
    }

    /// A timer that fires once after `delay`.
    pub fn single_shot(manager: &Arc<TimerManager>, delay: Duration) -> Self {
        Self::new(manager, delay, Duration::ZERO)
    }

    /// The signal emitted each time the timer fires.
    pub fn timeout(&self) -> &Signal<()> {
        &self.timeout
    }

    /// The timer's id within its manager.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Start counting from zero. Starting a running timer restarts it.
    pub fn start(&self) {
        self.update_data(|timer| {
            timer.reset();
            timer.active = true;
        });
    }

    /// Stop the timer. Elapsed time is discarded.
    pub fn stop(&self) {
        self.update_data(|timer| {
            timer.active = false;
            timer.reset();
        });
    }

    /// Stop, then start again.
    pub fn restart(&self) {
        self.stop();
        self.start();
    }

    /// Whether the timer is running.
    pub fn is_active(&self) -> bool {
        self.manager
            .upgrade()
            .and_then(|manager| manager.with_timer(self.id, |timer| timer.active))
            .unwrap_or(false)
    }

    fn update_data(&self, f: impl FnOnce(&mut TimerData)) {
        if let Some(manager) = self.manager.upgrade() {
            manager.with_timer(self.id, f);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(manager) = self.manager.upgrade() {
            manager.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Timer: Send, Sync);
static_assertions::assert_impl_all!(TimerManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn counting(timer: &Timer) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        timer.timeout().connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_delay_then_period() {
        let timers = Arc::new(TimerManager::new());
        let timer = Timer::new(&timers, ms(100), ms(50));
        let count = counting(&timer);
        timer.start();

        timers.update(ms(60));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        timers.update(ms(60));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // 20ms carried over from the delay.
        timers.update(ms(20));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        timers.update(ms(20));
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(timer.is_active());
    }

    #[test]
    fn test_single_shot_stops_after_firing() {
        let timers = Arc::new(TimerManager::new());
        let timer = Timer::single_shot(&timers, ms(100));
        let count = counting(&timer);
        timer.start();

        assert_eq!(timers.update(ms(150)), 1);
        assert!(!timer.is_active());
        assert_eq!(timers.update(ms(500)), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stopped_timer_does_not_fire() {
        let timers = Arc::new(TimerManager::new());
        let timer = Timer::new(&timers, ms(10), ms(10));
        let count = counting(&timer);

        timers.update(ms(100));
        timer.start();
        timer.stop();
        timers.update(ms(100));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_restart_resets_elapsed_time() {
        let timers = Arc::new(TimerManager::new());
        let timer = Timer::single_shot(&timers, ms(100));
        let count = counting(&timer);
        timer.start();

        timers.update(ms(90));
        timer.restart();
        timers.update(ms(90));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        timers.update(ms(20));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_may_stop_its_timer() {
        let timers = Arc::new(TimerManager::new());
        let timer = Arc::new(Timer::new(&timers, ms(10), ms(10)));
        let weak = Arc::downgrade(&timer);
        timer.timeout().connect(move |_| {
            if let Some(timer) = weak.upgrade() {
                timer.stop();
            }
        });
        timer.start();

        assert_eq!(timers.update(ms(20)), 1);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_drop_unregisters() {
        let timers = Arc::new(TimerManager::new());
        let timer = Timer::new(&timers, ms(10), ms(10));
        timer.start();
        assert_eq!(timers.active_count(), 1);
        drop(timer);
        assert_eq!(timers.active_count(), 0);
    }
}
