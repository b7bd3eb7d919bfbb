use std::iter::Peekable;
use std::sync::Arc;

use crate::error;

use super::node::Node;
use super::traits::SequenceCore;
use super::variant::{Lazy, Pulled};
use super::Element;

/// Iterating over a window of a strict block.
pub(crate) struct StrictIter<T> {
    items: Arc<[T]>,
    front: usize,
    back: usize,
}

impl<T> StrictIter<T> {
    pub(crate) fn new(items: Arc<[T]>, front: usize, back: usize) -> Self {
        StrictIter { items, front, back }
    }
}

impl<T: Clone> Iterator for StrictIter<T> {
    type Item = error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let item = self.items[self.front].clone();
            self.front += 1;
            Some(Ok(item))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> DoubleEndedIterator for StrictIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(Ok(self.items[self.back].clone()))
        } else {
            None
        }
    }
}

impl<T: Clone> ExactSizeIterator for StrictIter<T> {}

/// Iterating over a lazy node, pulling from its source as needed.
pub(crate) struct LazyIter<T> {
    lazy: Lazy<T>,
    index: usize,
    done: bool,
}

impl<T> LazyIter<T> {
    pub(crate) fn new(lazy: Lazy<T>) -> Self {
        LazyIter {
            lazy,
            index: 0,
            done: false,
        }
    }
}

impl<T: Element> Iterator for LazyIter<T> {
    type Item = error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lazy.pull(self.index) {
            Pulled::Item(item) => {
                self.index += 1;
                Some(Ok(item))
            }
            Pulled::End => {
                self.done = true;
                None
            }
            Pulled::Failed(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

/// Iterating over the children of a concat node in order.
pub(crate) struct ConcatIter<T> {
    children: Arc<[Node<T>]>,
    next_child: usize,
    current: Option<Box<NodeIter<T>>>,
}

impl<T> ConcatIter<T> {
    pub(crate) fn new(children: Arc<[Node<T>]>) -> Self {
        ConcatIter {
            children,
            next_child: 0,
            current: None,
        }
    }
}

impl<T: Element> Iterator for ConcatIter<T> {
    type Item = error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = &mut self.current {
                match current.next() {
                    Some(Ok(item)) => return Some(Ok(item)),
                    Some(Err(error)) => {
                        // nothing after a failure is observable
                        self.current = None;
                        self.next_child = self.children.len();
                        return Some(Err(error));
                    }
                    None => self.current = None,
                }
            }
            let child = self.children.get(self.next_child)?;
            self.next_child += 1;
            self.current = Some(Box::new(child.iter()));
        }
    }
}

/// Iterator over any node, statically dispatched on the variant.
pub(crate) enum NodeIter<T> {
    Empty(std::iter::Empty<error::Result<T>>),
    Strict(StrictIter<T>),
    Lazy(LazyIter<T>),
    Concat(ConcatIter<T>),
}

impl<T: Element> Iterator for NodeIter<T> {
    type Item = error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            NodeIter::Empty(iter) => iter.next(),
            NodeIter::Strict(iter) => iter.next(),
            NodeIter::Lazy(iter) => iter.next(),
            NodeIter::Concat(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            NodeIter::Empty(iter) => iter.size_hint(),
            NodeIter::Strict(iter) => iter.size_hint(),
            NodeIter::Lazy(iter) => iter.size_hint(),
            NodeIter::Concat(iter) => iter.size_hint(),
        }
    }
}

/// An iterator over the elements of a [`Sequence`](crate::Sequence).
///
/// The iterator owns a snapshot of the sequence: nothing that happens to the
/// sequence or to the [`AtomicSequence`](crate::AtomicSequence) it was taken
/// from is visible through it.
///
/// If the sequence is backed by a lazy source that failed, iteration stops at
/// the failure. Use [`TryIter`] to observe the failure itself.
pub struct Iter<T> {
    inner: NodeIter<T>,
}

impl<T> Iter<T> {
    pub(crate) fn new(inner: NodeIter<T>) -> Self {
        Iter { inner }
    }
}

impl<T: Element> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.inner.next()? {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::warn!(%error, "iteration stopped at a failed lazy source");
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A fallible iterator over the elements of a [`Sequence`](crate::Sequence).
///
/// Yields `Err` once, as the last item, if a lazy source backing the
/// sequence failed.
pub struct TryIter<T> {
    inner: NodeIter<T>,
}

impl<T> TryIter<T> {
    pub(crate) fn new(inner: NodeIter<T>) -> Self {
        TryIter { inner }
    }
}

impl<T: Element> Iterator for TryIter<T> {
    type Item = error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Yields everything except the last item of the underlying iterator.
pub(crate) struct DropLast<I: Iterator> {
    iter: Peekable<I>,
}

impl<I: Iterator> DropLast<I> {
    pub(crate) fn new(iter: I) -> Self {
        DropLast {
            iter: iter.peekable(),
        }
    }
}

impl<T, I> Iterator for DropLast<I>
where
    I: Iterator<Item = error::Result<T>>,
{
    type Item = error::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        // a failure is always passed on, even when it comes last
        if item.is_err() || self.iter.peek().is_some() {
            Some(item)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_iter_both_ends() {
        let mut iter = StrictIter::new(Arc::from(vec![1, 2, 3, 4]), 1, 4);
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().unwrap().unwrap(), 4);
        assert_eq!(iter.next().unwrap().unwrap(), 2);
        assert_eq!(iter.next().unwrap().unwrap(), 3);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_drop_last() {
        let items = vec![Ok(1), Ok(2), Ok(3)];
        let kept = DropLast::new(items.into_iter())
            .collect::<error::Result<Vec<i32>>>()
            .unwrap();
        assert_eq!(kept, vec![1, 2]);
    }

    #[test]
    fn test_drop_last_keeps_trailing_failure() {
        let items = vec![Ok(1), Err(error::Error::Empty)];
        let kept = DropLast::new(items.into_iter()).collect::<Vec<_>>();
        assert_eq!(kept, vec![Ok(1), Err(error::Error::Empty)]);
    }
}
