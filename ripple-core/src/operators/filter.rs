//! Filter operator.

use std::sync::Arc;

use crate::observer::Observer;
use crate::signal::{Signal, SignalInner};

/// Derive a signal forwarding only the values for which `predicate` holds.
///
/// Dropped values produce no downstream emission and no error. The predicate
/// is called once per incoming value, in arrival order; it should be a pure
/// function of the value.
pub fn filter<T, P>(source: &Signal<T>, predicate: P) -> Signal<T>
where
    T: Clone + Send + Sync + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let inner = Arc::new(SignalInner::new());

    let downstream = Arc::downgrade(&inner);
    let forward = Observer::fallible(move |value: &T| {
        let Some(downstream) = downstream.upgrade() else {
            return Ok(());
        };
        if predicate(value) {
            downstream.emit(value)
        } else {
            Ok(())
        }
    });

    inner.push_upstream(source.subscribe_observer(forward));
    Signal::from_inner(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn filter_drops_non_matching_values() {
        let (signal, emitter) = Signal::pipe();
        let evens = signal.filter(|value: &i64| value % 2 == 0);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = evens.subscribe(move |value: &i64| {
            seen_clone.lock().push(*value);
        });

        for value in [1, 2, 3, 4] {
            emitter.send(value).unwrap();
        }
        assert_eq!(*seen.lock(), vec![2, 4]);
    }

    #[test]
    fn dropping_filtered_signal_detaches_from_source() {
        let (signal, _emitter) = Signal::<i64>::pipe();

        {
            let _evens = signal.filter(|value| value % 2 == 0);
            assert_eq!(signal.subscriber_count(), 1);
        }

        assert_eq!(signal.subscriber_count(), 0);
    }
}
