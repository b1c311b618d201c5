//! Disposable subscription handles.
//!
//! Every subscribe operation returns a `Disposable` that owns the
//! registration entry in the signal's observer list. Disposing removes that
//! entry; disposing twice is a no-op. Dropping the handle does *not* dispose:
//! a subscription stays live until it is explicitly disposed or the signal it
//! is attached to is torn down.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

type Detach = Box<dyn FnOnce() + Send>;

/// A handle to cancel a subscription.
///
/// Cloning shares the underlying registration: disposing any clone disposes
/// the subscription.
#[derive(Clone)]
pub struct Disposable {
    detach: Arc<Mutex<Option<Detach>>>,
}

impl Disposable {
    /// Create a disposable that runs `detach` on first disposal.
    pub(crate) fn new<F>(detach: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            detach: Arc::new(Mutex::new(Some(Box::new(detach)))),
        }
    }

    /// Cancel the subscription.
    ///
    /// Idempotent: the detach action runs at most once, and calling this on
    /// an already-disposed handle does nothing.
    pub fn dispose(&self) {
        let detach = self.detach.lock().take();
        if let Some(detach) = detach {
            detach();
        }
    }

    /// Whether this handle has already been disposed.
    pub fn is_disposed(&self) -> bool {
        self.detach.lock().is_none()
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn dispose_runs_detach_once() {
        let detached = Arc::new(AtomicI32::new(0));
        let detached_clone = detached.clone();

        let disposable = Disposable::new(move || {
            detached_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!disposable.is_disposed());
        disposable.dispose();
        assert!(disposable.is_disposed());
        assert_eq!(detached.load(Ordering::SeqCst), 1);

        // Second disposal is a no-op.
        disposable.dispose();
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_does_not_detach() {
        let detached = Arc::new(AtomicI32::new(0));
        let detached_clone = detached.clone();

        {
            let _disposable = Disposable::new(move || {
                detached_clone.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(detached.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clones_share_disposal_state() {
        let detached = Arc::new(AtomicI32::new(0));
        let detached_clone = detached.clone();

        let disposable = Disposable::new(move || {
            detached_clone.fetch_add(1, Ordering::SeqCst);
        });
        let clone = disposable.clone();

        clone.dispose();
        assert!(disposable.is_disposed());
        disposable.dispose();
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }
}
