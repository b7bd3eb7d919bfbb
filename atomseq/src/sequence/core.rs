use crate::error;

use super::combine;
use super::iter::{Iter, TryIter};
use super::node::{Node, NodeKind};
use super::traits::SequenceCore;
use super::Element;

/// An immutable, structurally shared sequence.
///
/// Cloning is cheap: the clone shares every node with the original.
/// Operations that derive a new sequence share as much as they can, and
/// nothing about the original is ever modified.
///
/// Equality, ordering and hashing are element-wise and do not depend on how
/// either side is represented internally.
#[derive(Clone)]
pub struct Sequence<T> {
    node: Node<T>,
}

// sequences are shared across threads, through AtomicSequence or directly
static_assertions::assert_impl_all!(Sequence<String>: Send, Sync);

impl<T: Element> Sequence<T> {
    pub(crate) fn from_node(node: Node<T>) -> Self {
        Self { node }
    }

    pub(crate) fn node(&self) -> &Node<T> {
        &self.node
    }

    pub(crate) fn into_node(self) -> Node<T> {
        self.node
    }

    /// The representation currently backing this sequence.
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Check whether the sequence is empty.
    ///
    /// A lazy sequence is peeked for at most one element; the peeked element
    /// is memoized.
    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    /// The number of elements. Forces any lazy parts of the sequence.
    pub fn len(&self) -> usize {
        self.node.len()
    }

    /// The element at `index`, if there is one.
    ///
    /// Constant time on strict data. Lazy data is pulled up to `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.node.get(index)
    }

    /// The element at `index`, or [`Error::IndexOutOfRange`](error::Error::IndexOutOfRange).
    pub fn at(&self, index: usize) -> error::Result<T> {
        self.get(index).ok_or_else(|| error::Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// The first element, or [`Error::Empty`](error::Error::Empty).
    pub fn head(&self) -> error::Result<T> {
        self.head_or_none().ok_or(error::Error::Empty)
    }

    pub fn head_or_none(&self) -> Option<T> {
        self.node.get(0)
    }

    /// The last element, or [`Error::Empty`](error::Error::Empty).
    pub fn last(&self) -> error::Result<T> {
        self.last_or_none().ok_or(error::Error::Empty)
    }

    pub fn last_or_none(&self) -> Option<T> {
        match &self.node {
            Node::Empty(_) => None,
            Node::Strict(inner) => inner.as_slice().last().cloned(),
            Node::Lazy(_) | Node::Concat(_) => self.iter().last(),
        }
    }

    /// Everything but the first element. The tail of an empty sequence is
    /// empty.
    pub fn tail(&self) -> Self {
        self.skip(1)
    }

    /// Everything but the last element. The init of an empty sequence is
    /// empty.
    pub fn init(&self) -> Self {
        Self::from_node(self.node.init())
    }

    /// Iterate over the elements.
    ///
    /// The iterator owns a snapshot; it stops early, without an error, at a
    /// failed lazy source. See [`Sequence::try_iter`].
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.node.iter())
    }

    /// Iterate over the elements, observing lazy source failures.
    pub fn try_iter(&self) -> TryIter<T> {
        TryIter::new(self.node.iter())
    }

    /// Collect the elements into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.node.values()
    }

    /// Force every lazy part of the sequence, producing a strict sequence.
    ///
    /// Lazy sources memoize what they produce, so forcing twice never runs a
    /// source twice. If a source failed, its failure is returned, each time.
    pub fn strict(&self) -> error::Result<Self> {
        Ok(Self::from_node(self.node.strict_node()?))
    }

    /// All elements of `self` followed by all elements of `other`.
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_node(combine::concat(&self.node, &other.node))
    }

    /// Concatenate any number of sequences from left to right.
    pub fn concat_all<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::from_node(combine::concat_all(
            sequences.into_iter().map(Self::into_node),
        ))
    }

    /// A new sequence with `item` at the end.
    pub fn add(&self, item: T) -> Self {
        Self::from_node(combine::concat(&self.node, &Node::singleton(item)))
    }

    /// A new sequence with `item` at the front.
    pub fn cons(&self, item: T) -> Self {
        Self::from_node(combine::concat(&Node::singleton(item), &self.node))
    }

    /// Apply `f` to every element.
    ///
    /// Strict data is mapped immediately. Lazy data stays lazy: `f` runs
    /// when the result is traversed, which is why it must be shareable.
    pub fn map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Sequence::from_node(self.node.map(f))
    }

    /// Keep the elements for which `predicate` holds.
    ///
    /// Filtering strict data that rejects nothing returns the same sequence,
    /// sharing the same node.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_node(self.node.filter(predicate))
    }

    /// Fold from the first element to the last.
    pub fn fold<S, F>(&self, state: S, f: F) -> S
    where
        F: FnMut(S, T) -> S,
    {
        match &self.node {
            Node::Strict(inner) => inner.as_slice().iter().cloned().fold(state, f),
            _ => self.iter().fold(state, f),
        }
    }

    /// Fold from the last element to the first.
    pub fn fold_back<S, F>(&self, state: S, f: F) -> S
    where
        F: FnMut(S, T) -> S,
    {
        match &self.node {
            Node::Strict(inner) => inner.as_slice().iter().rev().cloned().fold(state, f),
            _ => self.to_vec().into_iter().rev().fold(state, f),
        }
    }

    /// Whether any element satisfies `predicate`. Stops at the first match.
    pub fn exists<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.find(predicate).is_some()
    }

    /// Whether every element satisfies `predicate`. True when empty.
    pub fn for_all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        !self.exists(|item| !predicate(item))
    }

    /// The first element satisfying `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    /// The first `count` elements.
    pub fn take(&self, count: usize) -> Self {
        Self::from_node(self.node.take(count))
    }

    /// Everything after the first `count` elements.
    pub fn skip(&self, count: usize) -> Self {
        Self::from_node(self.node.skip(count))
    }

    /// The longest prefix whose elements satisfy `predicate`.
    pub fn take_while<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_node(self.node.take_while(predicate))
    }

    /// Everything after the longest prefix satisfying `predicate`.
    pub fn skip_while<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_node(self.node.skip_while(predicate))
    }

    /// The elements in reverse order. Forces any lazy parts.
    pub fn reverse(&self) -> Self {
        Self::from_node(self.node.reverse())
    }

    /// Whether both sequences share the very same node.
    ///
    /// This is identity, not equality; equal sequences built separately are
    /// not identical.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.node.ptr_eq(&other.node)
    }
}

impl<T: Element> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Element> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}
