//! Signal combinators.
//!
//! Each operator builds a new derived signal from one or more existing ones
//! without mutating the sources. The derived signal subscribes to its
//! upstream(s) at construction; those subscriptions live exactly as long as
//! the derived signal and are disposed, transitively, when it is dropped.
//!
//! Operators are free functions; `filter` and `map` are additionally exposed
//! as chaining methods on `Signal`.

mod combine_latest;
mod filter;
mod map;
mod merge;

pub use combine_latest::combine_latest;
pub use filter::filter;
pub use map::map;
pub use merge::merge;
