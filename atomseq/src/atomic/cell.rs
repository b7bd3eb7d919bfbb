use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error;
use crate::sequence::{Element, Iter, Node, NodeKind, Sequence};

use super::backoff::BackoffPolicy;

/// A sequence that many threads can update in place without locking.
///
/// The cell always holds one complete, immutable sequence. Reads take a
/// snapshot of it and never observe a partial update. Writes compute a new
/// sequence from the current one and install it with a compare-and-swap on
/// the pointer; a writer that loses the race backs off and recomputes from
/// the newer value.
///
/// Because a write may be recomputed any number of times, the transforms
/// passed to [`AtomicSequence::swap`] and friends must be pure functions of
/// their input. They are `Fn`, so they cannot mutate what they capture
/// without explicit interior mutability.
pub struct AtomicSequence<T> {
    node: ArcSwap<Node<T>>,
    policy: BackoffPolicy,
}

static_assertions::assert_impl_all!(AtomicSequence<String>: Send, Sync);

impl<T: Element> AtomicSequence<T> {
    /// An empty cell.
    pub fn new() -> Self {
        Self::with_policy(Sequence::empty(), BackoffPolicy::default())
    }

    /// A cell holding `sequence`, retrying contended writes with `policy`.
    pub fn with_policy(sequence: Sequence<T>, policy: BackoffPolicy) -> Self {
        Self {
            node: ArcSwap::from_pointee(sequence.into_node()),
            policy,
        }
    }

    /// A cell holding a lazy sequence over `source`.
    pub fn lazy<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Sequence::lazy(source).into()
    }

    pub fn policy(&self) -> BackoffPolicy {
        self.policy
    }

    /// The current value. Later writes to the cell do not affect it.
    pub fn snapshot(&self) -> Sequence<T> {
        Sequence::from_node(Node::clone(&self.node.load()))
    }

    pub fn kind(&self) -> NodeKind {
        self.node.load().kind()
    }

    // The retry loop behind every write. `f` may run several times, each
    // time on a newer value; whatever it returns for the value that wins
    // the compare-and-swap is installed and returned.
    fn try_update<E, F>(&self, mut f: F) -> Result<Sequence<T>, E>
    where
        F: FnMut(&Sequence<T>) -> Result<Sequence<T>, E>,
    {
        let mut backoff = self.policy.backoff();
        loop {
            let current = self.node.load_full();
            let snapshot = Sequence::from_node(Node::clone(&current));
            let next = f(&snapshot)?;
            if next.ptr_eq(&snapshot) {
                return Ok(next);
            }
            let installed = Arc::new(next.node().clone());
            let previous = self.node.compare_and_swap(&current, installed);
            if Arc::ptr_eq(&*previous, &current) {
                return Ok(next);
            }
            tracing::trace!(attempt = backoff.attempt(), "lost update race, retrying");
            backoff.snooze();
        }
    }

    fn update<F>(&self, mut f: F) -> Sequence<T>
    where
        F: FnMut(&Sequence<T>) -> Sequence<T>,
    {
        match self.try_update::<Infallible, _>(|current| Ok(f(current))) {
            Ok(next) => next,
            Err(never) => match never {},
        }
    }

    /// Replace the value with `transform` applied to it, returning the new
    /// value.
    ///
    /// `transform` runs at least once and again after every lost race, so it
    /// must not have side effects. Returning the input unchanged skips the
    /// write altogether.
    pub fn swap<F>(&self, transform: F) -> Sequence<T>
    where
        F: Fn(&Sequence<T>) -> Sequence<T>,
    {
        self.update(|current| transform(current))
    }

    /// Like [`AtomicSequence::swap`], but the transform may fail, in which
    /// case the cell is left as it was.
    pub fn try_swap<E, F>(&self, transform: F) -> Result<Sequence<T>, E>
    where
        F: Fn(&Sequence<T>) -> Result<Sequence<T>, E>,
    {
        self.try_update(|current| transform(current))
    }

    /// Store `sequence` unconditionally, returning what was there before.
    pub fn replace(&self, sequence: Sequence<T>) -> Sequence<T> {
        let previous = self.node.swap(Arc::new(sequence.into_node()));
        Sequence::from_node(Node::clone(&previous))
    }

    pub fn clear(&self) {
        self.node.store(Arc::new(Node::default()));
    }

    /// Append one element.
    pub fn add(&self, item: T) {
        self.update(|current| current.add(item.clone()));
    }

    /// Prepend one element.
    pub fn cons(&self, item: T) {
        self.update(|current| current.cons(item.clone()));
    }

    /// Append every element of `other`.
    pub fn append(&self, other: &Sequence<T>) {
        self.update(|current| current.concat(other));
    }

    pub fn append_vec(&self, items: Vec<T>) {
        self.append(&Sequence::from(items));
    }

    /// Append the elements of `items`, which are collected once, before any
    /// attempt to write.
    pub fn append_iter<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.append(&items.into_iter().collect::<Sequence<T>>());
    }

    /// Append a one-shot source without pulling from it.
    ///
    /// The source is wrapped in a single lazy node shared by every retry,
    /// so it is never run twice however contended the cell is.
    pub fn append_lazy<I>(&self, source: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        self.append(&Sequence::lazy(source));
    }

    /// Force every lazy part of the value in place.
    ///
    /// If a lazy source failed, its failure is returned and the cell keeps
    /// its value.
    pub fn strict(&self) -> error::Result<()> {
        self.try_update(|current| current.strict())?;
        Ok(())
    }

    /// Replace every element with `f` applied to it.
    pub fn map_in_place<F>(&self, f: F)
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.update(|current| {
            let f = Arc::clone(&f);
            current.map(move |item| f(item))
        });
    }

    /// Keep only the elements for which `predicate` holds.
    pub fn filter_in_place<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.update(|current| {
            let predicate = Arc::clone(&predicate);
            current.filter(move |item| predicate(item))
        });
    }

    pub fn skip(&self, count: usize) {
        self.update(|current| current.skip(count));
    }

    pub fn take(&self, count: usize) {
        self.update(|current| current.take(count));
    }

    pub fn take_while<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.update(|current| {
            let predicate = Arc::clone(&predicate);
            current.take_while(move |item| predicate(item))
        });
    }

    pub fn skip_while<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        self.update(|current| {
            let predicate = Arc::clone(&predicate);
            current.skip_while(move |item| predicate(item))
        });
    }

    /// Drop the first element, if any.
    pub fn tail(&self) {
        self.update(Sequence::tail);
    }

    /// Drop the last element, if any.
    pub fn init(&self) {
        self.update(Sequence::init);
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.snapshot().get(index)
    }

    pub fn at(&self, index: usize) -> error::Result<T> {
        self.snapshot().at(index)
    }

    pub fn head(&self) -> error::Result<T> {
        self.snapshot().head()
    }

    pub fn head_or_none(&self) -> Option<T> {
        self.snapshot().head_or_none()
    }

    pub fn last(&self) -> error::Result<T> {
        self.snapshot().last()
    }

    pub fn last_or_none(&self) -> Option<T> {
        self.snapshot().last_or_none()
    }

    /// Iterate over a snapshot of the value.
    ///
    /// Writes made after this call are not observed by the iterator.
    pub fn iter(&self) -> Iter<T> {
        self.snapshot().iter()
    }

    pub fn fold<S, F>(&self, state: S, f: F) -> S
    where
        F: FnMut(S, T) -> S,
    {
        self.snapshot().fold(state, f)
    }

    pub fn fold_back<S, F>(&self, state: S, f: F) -> S
    where
        F: FnMut(S, T) -> S,
    {
        self.snapshot().fold_back(state, f)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.snapshot().to_vec()
    }
}

impl<T: Element> Default for AtomicSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A new, independent cell starting from the current value.
impl<T: Element> Clone for AtomicSequence<T> {
    fn clone(&self) -> Self {
        Self::with_policy(self.snapshot(), self.policy)
    }
}

impl<T: Element> From<Sequence<T>> for AtomicSequence<T> {
    fn from(sequence: Sequence<T>) -> Self {
        Self::with_policy(sequence, BackoffPolicy::default())
    }
}

impl<T: Element> From<Vec<T>> for AtomicSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence::from(items).into()
    }
}

impl<T: Element> FromIterator<T> for AtomicSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Sequence<T>>().into()
    }
}

impl<T> fmt::Display for AtomicSequence<T>
where
    T: Element + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl<T> fmt::Debug for AtomicSequence<T>
where
    T: Element + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicSequence")
            .field(&self.snapshot())
            .finish()
    }
}
