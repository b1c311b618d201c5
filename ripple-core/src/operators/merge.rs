//! Merge operator.

use std::sync::Arc;

use crate::error::ConstructError;
use crate::observer::Observer;
use crate::signal::{Signal, SignalInner};

/// Derive a signal re-emitting every value from every input.
///
/// Values are interleaved in the order the inputs actually deliver them: no
/// deduplication, no buffering, no ordering guarantee across inputs beyond
/// arrival order within each one.
///
/// Fails eagerly with zero inputs (such a signal could never emit).
pub fn merge<T>(sources: &[Signal<T>]) -> Result<Signal<T>, ConstructError>
where
    T: Clone + Send + Sync + 'static,
{
    if sources.is_empty() {
        return Err(ConstructError::TooFewInputs {
            operator: "merge",
            min: 1,
            got: 0,
        });
    }

    let inner = Arc::new(SignalInner::new());

    for source in sources {
        let downstream = Arc::downgrade(&inner);
        let forward = Observer::fallible(move |value: &T| {
            match downstream.upgrade() {
                Some(downstream) => downstream.emit(value),
                None => Ok(()),
            }
        });
        inner.push_upstream(source.subscribe_observer(forward));
    }

    Ok(Signal::from_inner(inner))
}
