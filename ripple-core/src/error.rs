//! Error types for the reactive core.
//!
//! There are exactly two failure surfaces:
//!
//! - Construction: an operator is handed too few input signals. This fails
//!   eagerly, at the call site, never lazily at first emission.
//!
//! - Emission: an observer callback fails while a value is being delivered.
//!   Delivery is fail-fast: the first error aborts delivery to the remaining
//!   observers of that emission and is returned to the caller of the
//!   production call (`Emitter::send` or `Subject::set`).
//!
//! Disposing an already-disposed handle is a no-op, not an error.

use std::fmt;

use thiserror::Error;

/// Failure raised by an observer callback during emission.
///
/// Wraps whatever error the callback produced. The emission that triggered
/// it is aborted: observers later in registration order do not see the value.
#[derive(Debug, Error)]
#[error("observer failed: {source}")]
pub struct ObserverError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl ObserverError {
    /// Wrap an arbitrary error as an observer failure.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            source: source.into(),
        }
    }

    /// Wrap a plain message as an observer failure.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::new(message.to_string())
    }
}

/// Failure raised when an operator is constructed with too few inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstructError {
    /// The operator needs more input signals than it was given.
    #[error("`{operator}` requires at least {min} input signal(s), got {got}")]
    TooFewInputs {
        operator: &'static str,
        min: usize,
        got: usize,
    },
}
