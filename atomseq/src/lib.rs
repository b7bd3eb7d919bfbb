//! Persistent sequences with lock-free in-place updates.
//!
//! [`Sequence`] is an immutable, structurally shared sequence backed by one
//! of four representations: empty, a strict block, a lazily materialized
//! source, or a flat concatenation of other sequences. Concatenation picks
//! the cheapest representation for the pair it is given, and no lazy source
//! is pulled until something reads it.
//!
//! [`AtomicSequence`] wraps a sequence in an atomic cell. Any number of
//! threads can read consistent snapshots of it and update it through a
//! compare-and-swap retry loop, without taking a lock.
//!
//! ```
//! use atomseq::{AtomicSequence, Sequence};
//!
//! let cell = AtomicSequence::from(vec!["a", "b"]);
//! let before = cell.snapshot();
//! cell.append(&Sequence::lazy(vec!["c"]));
//! assert_eq!(before.to_vec(), vec!["a", "b"]);
//! assert_eq!(cell.to_vec(), vec!["a", "b", "c"]);
//! ```

mod atomic;
pub mod error;
mod sequence;

pub use atomic::{AtomicSequence, BackoffPolicy};
pub use error::{Error, Result};
pub use sequence::{Element, Iter, NodeKind, Preview, Sequence, TryIter, DISPLAY_LIMIT};
