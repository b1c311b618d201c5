//! Benchmark workload definitions.
//!
//! The five pipeline shapes the benchmark suite drives: single producer,
//! multi-subscriber fan-out, chained filter/map, combine-latest, and merge.
//! Each scenario constructs its pipeline, drives the configured number of
//! values through it synchronously, and returns an explicit accumulator
//! (never process-wide state), so tests can assert exact totals and the
//! bench harness can `black_box` the result.
//!
//! The timing boundary is external: the harness wraps a whole scenario call
//! (construction + drive) in its timing closure.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::ObserverError;
use crate::operators::{combine_latest, merge};
use crate::signal::Signal;
use crate::subject::Subject;

/// Workload sizes for one scenario run.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioParams {
    /// Values driven through producer-shaped pipelines (`1..=n`).
    pub producer_values: i64,
    /// Independent subscribers or pipelines attached to the source.
    pub subscribers: usize,
    /// Rounds driven through the two-input composition pipelines; each round
    /// sends one value on every input.
    pub compose_rounds: i64,
}

impl ScenarioParams {
    /// The original suite's sizes (half-open ranges `1..<100_000`,
    /// `1..<100`, `1..<1_000`).
    pub const REFERENCE: Self = Self {
        producer_values: 99_999,
        subscribers: 99,
        compose_rounds: 999,
    };
}

/// Predicate shared by the filter pipelines.
pub fn is_even(value: &i64) -> bool {
    value % 2 == 0
}

/// One producer, one summing subscriber. Returns the sum of all delivered
/// values.
pub fn produce(params: &ScenarioParams) -> Result<i64, ObserverError> {
    let (signal, tx) = Signal::pipe();
    let total = Arc::new(AtomicI64::new(0));

    let sink = total.clone();
    let _sub = signal.subscribe(move |value: &i64| {
        sink.fetch_add(*value, Ordering::Relaxed);
    });

    for value in 1..=params.producer_values {
        tx.send(value)?;
    }
    Ok(total.load(Ordering::Relaxed))
}

/// One subject fanned out to `subscribers` summing subscribers. Each
/// subscriber replays the initial value (zero) on attach, then sees every
/// push. Returns the grand total across subscribers.
pub fn fan_out(params: &ScenarioParams) -> Result<i64, ObserverError> {
    let subject = Subject::new(0_i64);
    let total = Arc::new(AtomicI64::new(0));

    let subs: Vec<_> = (0..params.subscribers)
        .map(|_| {
            let sink = total.clone();
            subject.subscribe(move |value: &i64| {
                sink.fetch_add(*value, Ordering::Relaxed);
            })
        })
        .collect();

    for value in 1..=params.producer_values {
        subject.set(value)?;
    }

    drop(subs);
    Ok(total.load(Ordering::Relaxed))
}

/// One pipe with `subscribers` independent `filter(is_even).map(to_string)`
/// chains, each ending in a counting subscriber. Returns the total number of
/// downstream deliveries.
pub fn filter_map(params: &ScenarioParams) -> Result<u64, ObserverError> {
    let (signal, tx) = Signal::pipe();
    let delivered = Arc::new(AtomicU64::new(0));

    // The derived signals must outlive the drive loop; dropping one tears
    // its chain down.
    let pipelines: Vec<_> = (0..params.subscribers)
        .map(|_| {
            let derived = signal.filter(is_even).map(|value: &i64| value.to_string());
            let sink = delivered.clone();
            let sub = derived.subscribe(move |_: &String| {
                sink.fetch_add(1, Ordering::Relaxed);
            });
            (derived, sub)
        })
        .collect();

    for value in 1..=params.producer_values {
        tx.send(value)?;
    }

    drop(pipelines);
    Ok(delivered.load(Ordering::Relaxed))
}

/// Two pipes combined with `combine_latest`, `subscribers` times over.
/// Each round sends the round number on both inputs. Returns the total
/// number of downstream deliveries (per pipeline: gated to one emission in
/// the first round, two in every later round).
pub fn combine_latest_rounds(params: &ScenarioParams) -> Result<u64, ObserverError> {
    let (a, a_tx) = Signal::pipe();
    let (b, b_tx) = Signal::pipe();
    let delivered = Arc::new(AtomicU64::new(0));

    let pipelines: Vec<_> = (0..params.subscribers)
        .map(|_| {
            let combined = combine_latest(&[a.clone(), b.clone()])
                .map_err(ObserverError::new)?;
            let sink = delivered.clone();
            let sub = combined.subscribe(move |_: &Vec<i64>| {
                sink.fetch_add(1, Ordering::Relaxed);
            });
            Ok((combined, sub))
        })
        .collect::<Result<_, ObserverError>>()?;

    for round in 1..=params.compose_rounds {
        a_tx.send(round)?;
        b_tx.send(round)?;
    }

    drop(pipelines);
    Ok(delivered.load(Ordering::Relaxed))
}

/// Two pipes merged, `subscribers` times over. Each round sends the round
/// number on both inputs. Returns the total number of downstream deliveries
/// (two per round per pipeline).
pub fn merge_rounds(params: &ScenarioParams) -> Result<u64, ObserverError> {
    let (a, a_tx) = Signal::pipe();
    let (b, b_tx) = Signal::pipe();
    let delivered = Arc::new(AtomicU64::new(0));

    let pipelines: Vec<_> = (0..params.subscribers)
        .map(|_| {
            let merged = merge(&[a.clone(), b.clone()]).map_err(ObserverError::new)?;
            let sink = delivered.clone();
            let sub = merged.subscribe(move |_: &i64| {
                sink.fetch_add(1, Ordering::Relaxed);
            });
            Ok((merged, sub))
        })
        .collect::<Result<_, ObserverError>>()?;

    for round in 1..=params.compose_rounds {
        a_tx.send(round)?;
        b_tx.send(round)?;
    }

    drop(pipelines);
    Ok(delivered.load(Ordering::Relaxed))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
