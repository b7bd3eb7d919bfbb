use crate::error;
use crate::sequence::traits::SequenceCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Empty;

impl<T> SequenceCore<T, std::iter::Empty<error::Result<T>>> for Empty {
    #[inline]
    fn is_empty(&self) -> bool {
        true
    }

    #[inline]
    fn len(&self) -> usize {
        0
    }

    #[inline]
    fn get(&self, _index: usize) -> Option<T> {
        None
    }

    #[inline]
    fn iter(&self) -> std::iter::Empty<error::Result<T>> {
        std::iter::empty()
    }
}
