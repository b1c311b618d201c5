//! Observer types for the reactive core.
//!
//! An Observer is a sink capability: it accepts a value and may fail. It owns
//! nothing about the signal it is attached to; the signal owns the
//! registration. The observer's closure may own references to external
//! accumulator state (a counter, a captured `Vec`) for as long as it lives.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::ObserverError;

/// Unique identifier for an observer registration.
///
/// Each registration gets a fresh ID; disposal removes exactly that entry,
/// so subscribing the same closure twice yields two independent deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Generate a new unique observer ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

/// A callback capability receiving emitted values.
///
/// Cloning an `Observer` clones the handle, not the closure: both handles
/// invoke the same underlying callback.
pub struct Observer<T> {
    callback: Arc<dyn Fn(&T) -> Result<(), ObserverError> + Send + Sync>,
}

impl<T> Observer<T> {
    /// Create an observer from an infallible closure.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(move |value| {
                callback(value);
                Ok(())
            }),
        }
    }

    /// Create an observer from a closure that can fail.
    ///
    /// A returned error aborts the emission that delivered the value and
    /// surfaces at the production call.
    pub fn fallible<F>(callback: F) -> Self
    where
        F: Fn(&T) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Deliver a value to this observer.
    pub fn receive(&self, value: &T) -> Result<(), ObserverError> {
        (self.callback)(value)
    }
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}
