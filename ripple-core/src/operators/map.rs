//! Map operator.

use std::sync::Arc;

use crate::observer::Observer;
use crate::signal::{Signal, SignalInner};

/// Derive a signal emitting `transform(value)` for every incoming value.
///
/// Arrival order and cardinality are preserved: one emission in, exactly one
/// out. The transform may change the value's type.
pub fn map<T, U, F>(source: &Signal<T>, transform: F) -> Signal<U>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(&T) -> U + Send + Sync + 'static,
{
    let inner = Arc::new(SignalInner::new());

    let downstream = Arc::downgrade(&inner);
    let forward = Observer::fallible(move |value: &T| {
        let Some(downstream) = downstream.upgrade() else {
            return Ok(());
        };
        downstream.emit(&transform(value))
    });

    inner.push_upstream(source.subscribe_observer(forward));
    Signal::from_inner(inner)
}
