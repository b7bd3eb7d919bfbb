use std::sync::Arc;

use crate::error;
use crate::sequence::iter::StrictIter;
use crate::sequence::traits::SequenceCore;
use crate::sequence::Element;

/// A window onto a shared, already materialized block of elements.
///
/// Slicing produces a new window onto the same block, so `skip`, `take` and
/// friends on strict data never copy.
#[derive(Debug, Clone)]
pub(crate) struct Strict<T> {
    items: Arc<[T]>,
    start: usize,
    len: usize,
}

impl<T> Strict<T> {
    pub(crate) fn from_block(items: Arc<[T]>) -> Self {
        let len = items.len();
        Strict {
            items,
            start: 0,
            len,
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items[self.start..self.start + self.len]
    }

    /// A window relative to this one. The caller keeps it within bounds.
    pub(crate) fn window(&self, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= self.len);
        Strict {
            items: Arc::clone(&self.items),
            start: self.start + start,
            len,
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items) && self.start == other.start && self.len == other.len
    }
}

impl<T: Element> Strict<T> {
    /// Copy both windows into one new block.
    pub(crate) fn merge(&self, other: &Self) -> Self {
        let mut items = Vec::with_capacity(self.len + other.len);
        items.extend_from_slice(self.as_slice());
        items.extend_from_slice(other.as_slice());
        items.into()
    }
}

impl<T> From<Vec<T>> for Strict<T> {
    fn from(items: Vec<T>) -> Self {
        Strict::from_block(items.into())
    }
}

impl<T: Element> SequenceCore<T, StrictIter<T>> for Strict<T> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }

    #[inline]
    fn iter(&self) -> StrictIter<T> {
        StrictIter::new(Arc::clone(&self.items), self.start, self.start + self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_shares_block() {
        let strict: Strict<i32> = vec![1, 2, 3, 4].into();
        let window = strict.window(1, 2);
        assert_eq!(window.as_slice(), &[2, 3]);
        assert!(Arc::ptr_eq(&strict.items, &window.items));
        assert!(!strict.ptr_eq(&window));
    }

    #[test]
    fn test_nested_window() {
        let strict: Strict<i32> = vec![1, 2, 3, 4, 5].into();
        let window = strict.window(1, 4).window(1, 2);
        assert_eq!(window.as_slice(), &[3, 4]);
        assert_eq!(window.get(1), Some(4));
        assert_eq!(window.get(2), None);
    }

    #[test]
    fn test_merge() {
        let a: Strict<i32> = vec![1, 2, 3].into();
        let b: Strict<i32> = vec![4, 5].into();
        let merged = a.window(1, 2).merge(&b);
        assert_eq!(merged.as_slice(), &[2, 3, 4, 5]);
        assert_eq!(merged.start, 0);
    }
}
