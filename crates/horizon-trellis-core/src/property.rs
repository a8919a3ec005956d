//! Reactive value holders.
//!
//! A [`Property`] stores a value and reports whether a write actually changed
//! it, so owners can emit their notification signal only on real changes.
//!
//! ```
//! use horizon_trellis_core::{Property, Signal};
//!
//! struct Switch {
//!     on: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl Switch {
//!     fn set_on(&self, on: bool) {
//!         if self.on.set(on) {
//!             self.toggled.emit(on);
//!         }
//!     }
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value holder with change detection.
///
/// # Example
///
/// ```
/// use horizon_trellis_core::Property;
///
/// let prop = Property::new(42);
/// assert!(!prop.set(42));
/// assert!(prop.set(100));
/// assert_eq!(prop.get(), 100);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// If the new value equals the current one, nothing is written and
    /// `false` is returned. The caller emits its notification signal when
    /// this returns `true`.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_change_detection() {
        let prop = Property::new(false);
        assert!(!prop.set(false));
        assert!(prop.set(true));
        assert!(prop.get());
    }

    #[test]
    fn test_property_replace_returns_old() {
        let prop = Property::new(String::from("a"));
        assert_eq!(prop.replace("b".into()), Some("a".to_string()));
        assert_eq!(prop.replace("b".into()), None);
    }

    #[test]
    fn test_property_with_and_silent() {
        let prop = Property::new(vec![1, 2, 3]);
        assert_eq!(prop.with(|v| v.len()), 3);
        prop.set_silent(vec![]);
        assert!(prop.with(Vec::is_empty));
    }
}
