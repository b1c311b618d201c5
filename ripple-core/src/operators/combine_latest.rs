//! Combine-latest operator.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ConstructError;
use crate::observer::Observer;
use crate::signal::{Signal, SignalInner};

/// Derive a signal emitting the latest value of every input.
///
/// Keeps one latest-value slot per input. Nothing is emitted downstream
/// until every input has fired at least once; from then on, every emission
/// from any input produces one downstream emission of the full current
/// tuple, with that input's slot updated and the others unchanged. Inputs
/// firing back-to-back each trigger their own downstream emission; there is
/// no batching. An input that never fires means the combination never fires.
///
/// Fails eagerly with fewer than two inputs.
pub fn combine_latest<T>(sources: &[Signal<T>]) -> Result<Signal<Vec<T>>, ConstructError>
where
    T: Clone + Send + Sync + 'static,
{
    if sources.len() < 2 {
        return Err(ConstructError::TooFewInputs {
            operator: "combine_latest",
            min: 2,
            got: sources.len(),
        });
    }

    let inner = Arc::new(SignalInner::new());
    let latest: Arc<RwLock<Vec<Option<T>>>> =
        Arc::new(RwLock::new(vec![None; sources.len()]));

    for (index, source) in sources.iter().enumerate() {
        let downstream = Arc::downgrade(&inner);
        let latest = Arc::clone(&latest);
        let forward = Observer::fallible(move |value: &T| {
            let Some(downstream) = downstream.upgrade() else {
                return Ok(());
            };
            // Update this input's slot and, once every slot has fired,
            // assemble the tuple. The slot lock is released before delivery.
            let combined = {
                let mut slots = latest.write();
                slots[index] = Some(value.clone());
                slots.iter().cloned().collect::<Option<Vec<T>>>()
            };
            match combined {
                Some(combined) => downstream.emit(&combined),
                None => Ok(()),
            }
        });
        inner.push_upstream(source.subscribe_observer(forward));
    }

    Ok(Signal::from_inner(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn no_emission_until_every_input_fires() {
        let (a, a_tx) = Signal::pipe();
        let (b, b_tx) = Signal::pipe();
        let combined = combine_latest(&[a, b]).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = combined.subscribe(move |tuple: &Vec<i64>| {
            seen_clone.lock().push(tuple.clone());
        });

        a_tx.send(1).unwrap();
        assert!(seen.lock().is_empty());

        b_tx.send(1).unwrap();
        assert_eq!(*seen.lock(), vec![vec![1, 1]]);

        a_tx.send(2).unwrap();
        assert_eq!(*seen.lock(), vec![vec![1, 1], vec![2, 1]]);
    }

    #[test]
    fn back_to_back_inputs_each_trigger_an_emission() {
        let (a, a_tx) = Signal::pipe();
        let (b, b_tx) = Signal::pipe();
        let combined = combine_latest(&[a, b]).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = combined.subscribe(move |tuple: &Vec<i64>| {
            seen_clone.lock().push(tuple.clone());
        });

        // Synchronous driver setting both inputs per round, as the
        // benchmark scenarios do.
        for round in 1..=2 {
            a_tx.send(round).unwrap();
            b_tx.send(round).unwrap();
        }

        // Round 1: gated until b fires. Round 2: one emission per input.
        assert_eq!(
            *seen.lock(),
            vec![vec![1, 1], vec![2, 1], vec![2, 2]]
        );
    }

    #[test]
    fn three_inputs_combine() {
        let (a, a_tx) = Signal::pipe();
        let (b, b_tx) = Signal::pipe();
        let (c, c_tx) = Signal::pipe();
        let combined = combine_latest(&[a, b, c]).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = combined.subscribe(move |tuple: &Vec<i64>| {
            seen_clone.lock().push(tuple.clone());
        });

        a_tx.send(1).unwrap();
        b_tx.send(2).unwrap();
        assert!(seen.lock().is_empty());

        c_tx.send(3).unwrap();
        assert_eq!(*seen.lock(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn too_few_inputs_fail_eagerly() {
        let (a, _a_tx) = Signal::<i64>::pipe();

        let err = combine_latest::<i64>(&[]).unwrap_err();
        assert_eq!(
            err,
            ConstructError::TooFewInputs {
                operator: "combine_latest",
                min: 2,
                got: 0,
            }
        );
        assert!(combine_latest(&[a]).is_err());
    }

    #[test]
    fn dropping_combined_signal_detaches_all_inputs() {
        let (a, _a_tx) = Signal::<i64>::pipe();
        let (b, _b_tx) = Signal::<i64>::pipe();

        {
            let _combined = combine_latest(&[a.clone(), b.clone()]).unwrap();
            assert_eq!(a.subscriber_count(), 1);
            assert_eq!(b.subscriber_count(), 1);
        }

        assert_eq!(a.subscriber_count(), 0);
        assert_eq!(b.subscriber_count(), 0);
    }
}
