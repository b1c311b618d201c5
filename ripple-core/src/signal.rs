//! Signal implementation.
//!
//! A Signal is the push-based event source at the center of the crate. It
//! owns an ordered list of observer registrations and delivers every accepted
//! value to each of them synchronously, in registration order, before the
//! producing call returns.
//!
//! # How emission works
//!
//! 1. The producer calls `Emitter::send` (or, for derived signals, an
//!    upstream delivery arrives through a forwarding observer).
//!
//! 2. The observer list is snapshotted. Disposals or subscriptions triggered
//!    *by* an observer mid-emission therefore take effect for future
//!    emissions only; every observer present when the emission started still
//!    receives the value.
//!
//! 3. Observers are invoked in registration order. The first failure aborts
//!    delivery to the remaining observers and surfaces at the producer
//!    (fail-fast).
//!
//! # Ownership
//!
//! `Signal` and `Emitter` are cheap handles over a shared inner. A derived
//! signal (built by an operator) additionally owns the disposables of its
//! upstream subscriptions; dropping the last handle to it detaches the whole
//! pipeline from its sources. The forwarding closures hold the derived inner
//! weakly, so an upstream source never keeps a dead pipeline alive.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;
use tracing::trace;

use crate::disposable::Disposable;
use crate::error::ObserverError;
use crate::observer::{Observer, ObserverId};
use crate::operators;

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique signal ID.
fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// One entry in a signal's observer list.
struct Registration<T> {
    id: ObserverId,
    observer: Observer<T>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            observer: self.observer.clone(),
        }
    }
}

/// Shared state behind `Signal` and `Emitter` handles.
pub(crate) struct SignalInner<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique identifier for this signal.
    id: u64,

    /// Registered observers, in subscription order. Insertion order is
    /// delivery order.
    observers: RwLock<Vec<Registration<T>>>,

    /// Subscriptions this signal holds on its upstream sources. Empty for a
    /// plain pipe; operators push one entry per input. Disposed on drop so a
    /// torn-down pipeline leaves no registrations behind.
    upstream: Mutex<Vec<Disposable>>,
}

impl<T> SignalInner<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            id: next_signal_id(),
            observers: RwLock::new(Vec::new()),
            upstream: Mutex::new(Vec::new()),
        }
    }

    /// Record a subscription to an upstream source, tying its lifetime to
    /// this signal's.
    pub(crate) fn push_upstream(&self, subscription: Disposable) {
        self.upstream.lock().push(subscription);
    }

    /// Register an observer and return the disposable owning the entry.
    ///
    /// The detach closure captures the inner strongly. That makes the
    /// disposable the keep-alive edge of a pipeline: a derived signal stores
    /// the disposables of its upstream subscriptions, which keeps each
    /// upstream inner alive until the derived signal is torn down. Strong
    /// edges only ever point upstream (forwarding observers point downstream
    /// weakly), so no cycles form.
    fn attach(self: &Arc<Self>, observer: Observer<T>) -> Disposable {
        let id = ObserverId::new();
        self.observers.write().push(Registration { id, observer });
        trace!(signal = self.id, observer = ?id, "observer attached");

        let inner = Arc::clone(self);
        Disposable::new(move || {
            inner.observers.write().retain(|entry| entry.id != id);
            trace!(signal = inner.id, observer = ?id, "observer detached");
        })
    }

    /// Deliver a value to every registered observer, in registration order.
    ///
    /// The observer list is snapshotted before the first callback runs; no
    /// lock is held while callbacks execute, so observers may subscribe or
    /// dispose reentrantly.
    pub(crate) fn emit(&self, value: &T) -> Result<(), ObserverError> {
        let snapshot: SmallVec<[Registration<T>; 8]> =
            self.observers.read().iter().cloned().collect();

        for entry in &snapshot {
            entry.observer.receive(value)?;
        }
        Ok(())
    }

    fn observer_count(&self) -> usize {
        self.observers.read().len()
    }
}

impl<T> Drop for SignalInner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        for subscription in self.upstream.get_mut().drain(..) {
            subscription.dispose();
        }
    }
}

/// A push-based event source notifying registered observers synchronously.
///
/// # Type Parameters
///
/// - `T`: The type of value flowing through the signal. Must be
///   Clone + Send + Sync.
///
/// # Example
///
/// ```rust,ignore
/// let (signal, emitter) = Signal::pipe();
///
/// let sub = signal.subscribe(|value: &i64| println!("got {value}"));
///
/// emitter.send(1)?; // prints "got 1" before returning
/// sub.dispose();
/// ```
pub struct Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a paired consumable signal and production handle.
    ///
    /// Values pushed through the `Emitter` are delivered to every observer
    /// subscribed to the `Signal`.
    pub fn pipe() -> (Signal<T>, Emitter<T>) {
        let inner = Arc::new(SignalInner::new());
        trace!(signal = inner.id, "pipe created");
        (
            Signal {
                inner: Arc::clone(&inner),
            },
            Emitter { inner },
        )
    }

    pub(crate) fn from_inner(inner: Arc<SignalInner<T>>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Arc<SignalInner<T>> {
        &self.inner
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Subscribe an infallible callback. Returns the handle owning the
    /// registration.
    ///
    /// Subscribing twice yields two independent deliveries per emission.
    pub fn subscribe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_observer(Observer::new(callback))
    }

    /// Subscribe an observer capability.
    pub fn subscribe_observer(&self, observer: Observer<T>) -> Disposable {
        self.inner.attach(observer)
    }

    /// Number of currently registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.observer_count()
    }

    /// Derive a signal that forwards only values matching `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Signal<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        operators::filter(self, predicate)
    }

    /// Derive a signal that forwards `transform(value)` for every value.
    pub fn map<U, F>(&self, transform: F) -> Signal<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        operators::map(self, transform)
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.inner.id)
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// Production handle paired with a `Signal`.
///
/// Keeps the signal alive: observers stay registered for as long as either
/// the emitter or any `Signal` clone exists.
pub struct Emitter<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<SignalInner<T>>,
}

impl<T> Emitter<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Push a value into the signal.
    ///
    /// Delivers to every observer registered at the start of the call, in
    /// registration order, before returning. The first observer failure
    /// aborts the remaining deliveries and is returned.
    pub fn send(&self, value: T) -> Result<(), ObserverError> {
        self.inner.emit(&value)
    }
}

impl<T> Clone for Emitter<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for Emitter<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").field("id", &self.inner.id).finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
