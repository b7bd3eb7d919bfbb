use crate::error;

use super::core::Sequence;
use super::node::Node;
use super::Element;

impl<T: Element> Sequence<T> {
    /// Construct an empty sequence.
    pub fn empty() -> Self {
        Self::from_node(Node::default())
    }

    /// Construct a sequence holding one element.
    pub fn singleton(item: T) -> Self {
        Self::from_node(Node::singleton(item))
    }

    /// Construct a lazy sequence from a one-shot source.
    ///
    /// Nothing is pulled from the source until the sequence is traversed,
    /// and every element pulled is memoized: the source runs at most once
    /// per element however often, and from however many threads, the
    /// sequence is read.
    pub fn lazy<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_node(Node::lazy(Box::new(source.into_iter().map(Ok))))
    }

    /// Construct a lazy sequence from a source that can fail.
    ///
    /// The source is never polled again after its first failure. The
    /// failure is memoized and reported by [`Sequence::strict`] and
    /// [`Sequence::try_iter`]; infallible traversals observe the elements
    /// produced before it.
    pub fn try_lazy<I, E>(source: I) -> Self
    where
        I: IntoIterator<Item = Result<T, E>>,
        I::IntoIter: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_node(Node::lazy(Box::new(
            source
                .into_iter()
                .map(|item| item.map_err(error::Error::source_failure)),
        )))
    }
}

impl<T: Element> Default for Sequence<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_node(Node::strict(items))
    }
}

impl<T: Element> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        items.to_vec().into()
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Self {
        Vec::from(items).into()
    }
}

impl<T: Element> FromIterator<T> for Sequence<T> {
    /// Collects eagerly into a strict sequence. Use [`Sequence::lazy`] to
    /// defer the work instead.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}
