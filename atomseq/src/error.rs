use std::sync::Arc;

use thiserror::Error;

/// Errors reported by sequence operations.
///
/// Contention inside [`AtomicSequence`](crate::AtomicSequence) is never an
/// error; these only describe the outcome of the call that produced them.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Indexed access past the end of the sequence.
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The length of the sequence at the time of access
        len: usize,
    },
    /// The sequence has no elements.
    #[error("sequence is empty")]
    Empty,
    /// A lazy source failed while producing elements.
    ///
    /// The failure is memoized: the source is never polled again, and this
    /// same error is reported by every later attempt to force the sequence.
    #[error("lazy source failed: {0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn source_failure<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Source(Arc::new(error))
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Error::IndexOutOfRange { index, len },
                Error::IndexOutOfRange {
                    index: other_index,
                    len: other_len,
                },
            ) => index == other_index && len == other_len,
            (Error::Empty, Error::Empty) => true,
            // a memoized failure is the same failure wherever it surfaces
            (Error::Source(a), Error::Source(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
