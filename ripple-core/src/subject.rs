//! Subject implementation.
//!
//! A Subject is a stateful signal: it holds its latest value and replays it,
//! exactly once and synchronously, to every observer that subscribes after
//! construction. Setting the value is the only way it emits.
//!
//! Because the replay happens before `subscribe` returns, a subsequent `set`
//! is observed only by subscribers registered strictly before that call, in
//! registration order like any other signal.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::disposable::Disposable;
use crate::error::ObserverError;
use crate::observer::Observer;
use crate::signal::{Emitter, Signal};

/// A signal that also holds and replays its latest value.
///
/// # Example
///
/// ```rust,ignore
/// let subject = Subject::new(0);
///
/// // Replays 0 immediately, then sees every set.
/// let _sub = subject.subscribe(|value: &i64| println!("got {value}"));
///
/// subject.set(5)?; // prints "got 5"
/// ```
pub struct Subject<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// The held value, replayed to new subscribers.
    value: Arc<RwLock<T>>,

    /// Fan-out core carrying future emissions.
    signal: Signal<T>,
    emitter: Emitter<T>,
}

impl<T> Subject<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a subject holding `initial`.
    pub fn new(initial: T) -> Self {
        let (signal, emitter) = Signal::pipe();
        Self {
            value: Arc::new(RwLock::new(initial)),
            signal,
            emitter,
        }
    }

    /// Get the current held value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Replace the held value and emit it to every subscriber.
    ///
    /// The value lock is released before delivery, so observers may read the
    /// subject reentrantly. Fail-fast: the first observer error aborts the
    /// remaining deliveries and is returned.
    pub fn set(&self, value: T) -> Result<(), ObserverError> {
        *self.value.write() = value.clone();
        self.emitter.send(value)
    }

    /// Subscribe an infallible callback.
    ///
    /// The current value is replayed to it, exactly once, before this call
    /// returns; the registration then receives every subsequent `set`.
    pub fn subscribe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let observer = Observer::new(callback);
        // Replay of an infallible observer cannot fail.
        let current = self.get();
        let _ = observer.receive(&current);
        self.signal.subscribe_observer(observer)
    }

    /// Subscribe an observer capability.
    ///
    /// If the replay fails, nothing is registered and the error is returned:
    /// a subscriber never observes a push without having observed the replay.
    pub fn subscribe_observer(
        &self,
        observer: Observer<T>,
    ) -> Result<Disposable, ObserverError> {
        let current = self.get();
        observer.receive(&current)?;
        Ok(self.signal.subscribe_observer(observer))
    }

    /// The subject's fan-out signal: future values only, no replay.
    ///
    /// This is the bridge into the operators, which compose over `Signal`.
    pub fn to_signal(&self) -> Signal<T> {
        self.signal.clone()
    }

    /// Number of currently registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.signal.subscriber_count()
    }
}

impl<T> Clone for Subject<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            signal: self.signal.clone(),
            emitter: self.emitter.clone(),
        }
    }
}

impl<T> Debug for Subject<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("value", &self.get())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[test]
    fn subject_replays_current_value_on_subscribe() {
        let subject = Subject::new(7);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        let _sub = subject.subscribe(move |value: &i64| {
            seen_clone.lock().push(*value);
        });

        // Replay happened before subscribe returned.
        assert_eq!(*seen.lock(), vec![7]);

        subject.set(8).unwrap();
        assert_eq!(*seen.lock(), vec![7, 8]);
    }

    #[test]
    fn set_updates_held_value() {
        let subject = Subject::new(0);
        assert_eq!(subject.get(), 0);

        subject.set(42).unwrap();
        assert_eq!(subject.get(), 42);
    }

    #[test]
    fn late_subscriber_sees_latest_not_history() {
        let subject = Subject::new(1);
        subject.set(2).unwrap();
        subject.set(3).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = subject.subscribe(move |value: &i64| {
            seen_clone.lock().push(*value);
        });

        assert_eq!(*seen.lock(), vec![3]);
    }

    #[test]
    fn to_signal_skips_replay() {
        let subject = Subject::new(9);
        let count = Arc::new(AtomicI64::new(0));
        let count_clone = count.clone();

        let _sub = subject.to_signal().subscribe(move |_: &i64| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        // No replay through the raw signal.
        assert_eq!(count.load(Ordering::SeqCst), 0);

        subject.set(10).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_replay_registers_nothing() {
        let subject = Subject::new(0);

        let result = subject.subscribe_observer(Observer::fallible(|_: &i64| {
            Err(ObserverError::msg("replay rejected"))
        }));

        assert!(result.is_err());
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn clone_shares_value_and_subscribers() {
        let subject = Subject::new(0);
        let clone = subject.clone();
        let count = Arc::new(AtomicI64::new(0));

        let count_clone = count.clone();
        let _sub = subject.to_signal().subscribe(move |_: &i64| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        clone.set(1).unwrap();
        assert_eq!(subject.get(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
