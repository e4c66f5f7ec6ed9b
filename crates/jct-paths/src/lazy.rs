//! Resettable lazily built values.
//!
//! # Examples
//!
//! ```
//! use jct_paths::Lazy;
//! use std::sync::Arc;
//!
//! let cache = Lazy::new();
//! let first = cache.get_or_init(|| String::from("built"));
//! let again = cache.get_or_init(|| String::from("rebuilt"));
//! assert!(Arc::ptr_eq(&first, &again));
//!
//! cache.invalidate();
//! let rebuilt = cache.get_or_init(|| String::from("rebuilt"));
//! assert_eq!(*rebuilt, "rebuilt");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A value built on first access and dropped again by [`Lazy::invalidate`].
///
/// # Thread Safety
///
/// Initialization happens while holding a `Mutex`, so concurrent first
/// accesses build exactly one instance. Holders of a previously returned
/// `Arc` keep their instance after invalidation.
pub struct Lazy<T> {
    value: Mutex<Option<Arc<T>>>,
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Lazy<T> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        // The slot holds no invariant a panicking initializer could break.
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value, building it with `init` if absent.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        let mut slot = self.slot();
        if let Some(value) = slot.as_ref() {
            return Arc::clone(value);
        }
        let value = Arc::new(init());
        *slot = Some(Arc::clone(&value));
        value
    }

    /// Returns the cached value without building it.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot().clone()
    }

    /// Drops the cached value. The next access rebuilds it.
    pub fn invalidate(&self) {
        self.slot().take();
    }

    /// Returns `true` if a value is cached.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot().is_some()
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
