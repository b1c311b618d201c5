//! Ripple Core
//!
//! A minimal synchronous reactive-stream engine: push-based value
//! propagation, composable operators, and multi-subscriber fan-out with
//! deterministic ordering.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `signal`: the push core — `Signal`/`Emitter` pipe pairs and synchronous,
//!   registration-ordered delivery
//! - `subject`: stateful signals that hold and replay their latest value
//! - `operators`: `filter`, `map`, `combine_latest`, `merge`
//! - `disposable` / `observer`: subscription handles and sink capabilities
//! - `scenario`: the benchmark workload shapes driven by `benches/`
//!
//! Everything is single-process and synchronous: a `send`/`set` walks the
//! downstream observer graph depth-first and returns only after every
//! reachable observer ran. There is no scheduler, no queue, and no
//! time-based operator.
//!
//! # Example
//!
//! ```rust,ignore
//! use ripple_core::Signal;
//!
//! let (signal, emitter) = Signal::pipe();
//!
//! let evens = signal.filter(|v: &i64| v % 2 == 0).map(|v| v.to_string());
//! let _sub = evens.subscribe(|s: &String| println!("{s}"));
//!
//! for v in 1..=4 {
//!     emitter.send(v)?; // prints "2" and "4"
//! }
//! ```

pub mod disposable;
pub mod error;
pub mod observer;
pub mod operators;
pub mod scenario;
pub mod signal;
pub mod subject;

pub use disposable::Disposable;
pub use error::{ConstructError, ObserverError};
pub use observer::{Observer, ObserverId};
pub use operators::{combine_latest, filter, map, merge};
pub use signal::{Emitter, Signal};
pub use subject::Subject;
