// Derived nodes. Strict data is transformed eagerly, where the result can
// often share the original block; anything involving a lazy source stays
// lazy, with the new node's source reading from a snapshot of the old one.
//
// Each transform returns a node that is `ptr_eq` to its input when it would
// not change anything, which lets the atomic cell skip the swap entirely.

use super::iter::DropLast;
use super::node::Node;
use super::traits::SequenceCore;
use super::Element;

impl<T: Element> Node<T> {
    pub(crate) fn map<U, F>(&self, f: F) -> Node<U>
    where
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        match self {
            Node::Empty(_) => Node::default(),
            Node::Strict(inner) => Node::strict(inner.as_slice().iter().cloned().map(f).collect()),
            Node::Lazy(_) | Node::Concat(_) => {
                Node::lazy(Box::new(self.iter().map(move |item| item.map(&f))))
            }
        }
    }

    pub(crate) fn filter<F>(&self, predicate: F) -> Node<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) => {
                let items = inner.as_slice();
                if items.iter().all(&predicate) {
                    return self.clone();
                }
                Node::strict(items.iter().filter(|item| predicate(item)).cloned().collect())
            }
            Node::Lazy(_) | Node::Concat(_) => Node::lazy(Box::new(
                self.iter()
                    .filter(move |item| item.as_ref().map_or(true, &predicate)),
            )),
        }
    }

    pub(crate) fn take(&self, count: usize) -> Node<T> {
        if count == 0 {
            return Node::default();
        }
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) => {
                if count >= inner.len() {
                    self.clone()
                } else {
                    Node::window(inner, 0, count)
                }
            }
            Node::Lazy(_) | Node::Concat(_) => Node::lazy(Box::new(self.iter().take(count))),
        }
    }

    pub(crate) fn skip(&self, count: usize) -> Node<T> {
        if count == 0 {
            return self.clone();
        }
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) => {
                let len = inner.len();
                if count >= len {
                    Node::default()
                } else {
                    Node::window(inner, count, len - count)
                }
            }
            Node::Lazy(_) | Node::Concat(_) => Node::lazy(Box::new(self.iter().skip(count))),
        }
    }

    pub(crate) fn take_while<F>(&self, predicate: F) -> Node<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) => {
                let items = inner.as_slice();
                match items.iter().position(|item| !predicate(item)) {
                    Some(end) => Node::window(inner, 0, end),
                    None => self.clone(),
                }
            }
            Node::Lazy(_) | Node::Concat(_) => Node::lazy(Box::new(
                self.iter()
                    .take_while(move |item| item.as_ref().map_or(true, &predicate)),
            )),
        }
    }

    pub(crate) fn skip_while<F>(&self, predicate: F) -> Node<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) => {
                let items = inner.as_slice();
                match items.iter().position(|item| !predicate(item)) {
                    Some(0) => self.clone(),
                    Some(start) => Node::window(inner, start, items.len() - start),
                    None => Node::default(),
                }
            }
            Node::Lazy(_) | Node::Concat(_) => Node::lazy(Box::new(
                self.iter()
                    .skip_while(move |item| item.as_ref().map_or(false, &predicate)),
            )),
        }
    }

    pub(crate) fn init(&self) -> Node<T> {
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) => Node::window(inner, 0, inner.len() - 1),
            Node::Lazy(_) | Node::Concat(_) => Node::lazy(Box::new(DropLast::new(self.iter()))),
        }
    }

    pub(crate) fn reverse(&self) -> Node<T> {
        match self {
            Node::Empty(_) => self.clone(),
            Node::Strict(inner) if inner.len() == 1 => self.clone(),
            Node::Strict(inner) => Node::strict(inner.as_slice().iter().rev().cloned().collect()),
            Node::Lazy(_) | Node::Concat(_) => {
                let mut items = self.values();
                items.reverse();
                Node::strict(items)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::error;
    use crate::sequence::node::NodeKind;

    use super::*;

    fn lazy(items: Vec<i32>) -> Node<i32> {
        Node::lazy(Box::new(items.into_iter().map(Ok)))
    }

    fn values(node: &Node<i32>) -> Vec<i32> {
        node.iter().collect::<error::Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_filter_rejecting_nothing_is_identity() {
        let node = Node::strict(vec![2, 4, 6]);
        assert!(node.filter(|i| i % 2 == 0).ptr_eq(&node));
        let filtered = node.filter(|i| *i > 2);
        assert!(!filtered.ptr_eq(&node));
        assert_eq!(values(&filtered), vec![4, 6]);
    }

    #[test]
    fn test_filter_everything_out_is_empty() {
        let node = Node::strict(vec![1, 3]);
        assert_eq!(node.filter(|i| i % 2 == 0).kind(), NodeKind::Empty);
    }

    #[test]
    fn test_map_lazy_stays_lazy() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = pulls.clone();
        let node = Node::lazy(Box::new((1..=3).map(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(i)
        })));
        let mapped = node.map(|i| i * 10);
        assert_eq!(mapped.kind(), NodeKind::Lazy);
        assert_eq!(pulls.load(Ordering::SeqCst), 0);
        assert_eq!(values(&mapped), vec![10, 20, 30]);
        // the original node memoized what the mapped one pulled
        assert_eq!(values(&node), vec![1, 2, 3]);
        assert_eq!(pulls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_take_and_skip_share_strict_block() {
        let node = Node::strict(vec![1, 2, 3, 4, 5]);
        let taken = node.take(2);
        let (Node::Strict(original), Node::Strict(taken)) = (&node, &taken) else {
            panic!("expected strict nodes");
        };
        assert_eq!(taken.as_slice(), &[1, 2]);
        assert_eq!(original.as_slice().as_ptr(), taken.as_slice().as_ptr());
        assert_eq!(values(&node.skip(3)), vec![4, 5]);
        assert!(node.take(5).ptr_eq(&node));
        assert!(node.skip(0).ptr_eq(&node));
        assert_eq!(node.skip(5).kind(), NodeKind::Empty);
        assert_eq!(node.take(0).kind(), NodeKind::Empty);
    }

    #[test]
    fn test_take_skip_lazy() {
        let node = lazy(vec![1, 2, 3, 4, 5]);
        assert_eq!(values(&node.take(2)), vec![1, 2]);
        assert_eq!(values(&node.skip(2)), vec![3, 4, 5]);
    }

    #[test]
    fn test_while_variants() {
        let strict = Node::strict(vec![1, 2, 3, 1]);
        assert_eq!(values(&strict.take_while(|i| *i < 3)), vec![1, 2]);
        assert_eq!(values(&strict.skip_while(|i| *i < 3)), vec![3, 1]);
        assert!(strict.take_while(|_| true).ptr_eq(&strict));
        assert!(strict.skip_while(|_| false).ptr_eq(&strict));
        assert_eq!(strict.skip_while(|_| true).kind(), NodeKind::Empty);

        let lazy = lazy(vec![1, 2, 3, 1]);
        assert_eq!(values(&lazy.take_while(|i| *i < 3)), vec![1, 2]);
        assert_eq!(values(&lazy.skip_while(|i| *i < 3)), vec![3, 1]);
    }

    #[test]
    fn test_init() {
        assert_eq!(values(&Node::strict(vec![1, 2, 3]).init()), vec![1, 2]);
        assert_eq!(Node::singleton(1).init().kind(), NodeKind::Empty);
        assert_eq!(values(&lazy(vec![1, 2, 3]).init()), vec![1, 2]);
        assert_eq!(values(&lazy(vec![]).init()), Vec::<i32>::new());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(values(&Node::strict(vec![1, 2, 3]).reverse()), vec![3, 2, 1]);
        assert_eq!(values(&lazy(vec![1, 2, 3]).reverse()), vec![3, 2, 1]);
    }
}
