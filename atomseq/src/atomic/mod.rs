//! A shared, lock-free mutable cell over [`Sequence`](crate::Sequence).

mod backoff;
mod cell;

pub use backoff::BackoffPolicy;
pub use cell::AtomicSequence;
