// The node is a closed set of four representations. Every operation matches
// on all of them explicitly.

use std::sync::Arc;

use strum_macros::{Display, EnumIter};

use crate::error;

use super::iter::{Iter, NodeIter};
use super::traits::SequenceCore;
use super::variant::{Concat, Empty, Lazy, Source, Strict};
use super::Element;

/// Which representation backs a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum NodeKind {
    /// No elements.
    Empty,
    /// A materialized contiguous block with constant time indexing.
    Strict,
    /// A one-shot source, materialized on demand.
    Lazy,
    /// A flat list of other nodes.
    Concat,
}

#[derive(Debug, Clone)]
pub(crate) enum Node<T> {
    Empty(Empty),
    Strict(Strict<T>),
    Lazy(Lazy<T>),
    Concat(Concat<T>),
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node::Empty(Empty)
    }
}

impl<T: Element> Node<T> {
    /// A strict node, or `Empty` when there is nothing to hold.
    pub(crate) fn strict(items: Vec<T>) -> Self {
        if items.is_empty() {
            Node::Empty(Empty)
        } else {
            Node::Strict(items.into())
        }
    }

    pub(crate) fn from_block(items: Arc<[T]>) -> Self {
        if items.is_empty() {
            Node::Empty(Empty)
        } else {
            Node::Strict(Strict::from_block(items))
        }
    }

    /// A window onto a strict node, or `Empty` for a zero length window.
    pub(crate) fn window(strict: &Strict<T>, start: usize, len: usize) -> Self {
        if len == 0 {
            Node::Empty(Empty)
        } else {
            Node::Strict(strict.window(start, len))
        }
    }

    pub(crate) fn lazy(source: Source<T>) -> Self {
        Node::Lazy(Lazy::new(source))
    }

    pub(crate) fn singleton(item: T) -> Self {
        Node::Strict(vec![item].into())
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Node::Empty(_) => NodeKind::Empty,
            Node::Strict(_) => NodeKind::Strict,
            Node::Lazy(_) => NodeKind::Lazy,
            Node::Concat(_) => NodeKind::Concat,
        }
    }

    /// Empty without looking at any lazy data.
    pub(crate) fn is_structurally_empty(&self) -> bool {
        match self {
            Node::Empty(_) => true,
            Node::Strict(inner) => inner.as_slice().is_empty(),
            Node::Lazy(_) | Node::Concat(_) => false,
        }
    }

    /// Reference identity: both nodes are the very same value.
    ///
    /// Distinct nodes that merely hold equal elements are not identical.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Empty(_), Node::Empty(_)) => true,
            (Node::Strict(a), Node::Strict(b)) => a.ptr_eq(b),
            (Node::Lazy(a), Node::Lazy(b)) => a.ptr_eq(b),
            (Node::Concat(a), Node::Concat(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Materialize every element into a strict node.
    ///
    /// Forcing is memoized by the lazy nodes themselves, so forcing the same
    /// node again returns the same elements without running any source twice.
    pub(crate) fn strict_node(&self) -> error::Result<Self> {
        match self {
            Node::Empty(_) | Node::Strict(_) => Ok(self.clone()),
            Node::Lazy(inner) => {
                let block = inner.force()?;
                tracing::debug!(len = block.len(), "forced lazy node");
                Ok(Node::from_block(block))
            }
            Node::Concat(_) => {
                let items = self.iter().collect::<error::Result<Vec<_>>>()?;
                tracing::debug!(len = items.len(), "forced concat node");
                Ok(Node::strict(items))
            }
        }
    }

    /// The elements produced before any source failure, as a vector.
    pub(crate) fn values(&self) -> Vec<T> {
        match self {
            Node::Empty(_) => Vec::new(),
            Node::Strict(inner) => inner.as_slice().to_vec(),
            Node::Lazy(_) | Node::Concat(_) => Iter::new(self.iter()).collect(),
        }
    }
}

impl<T: Element> SequenceCore<T, NodeIter<T>> for Node<T> {
    fn is_empty(&self) -> bool {
        match self {
            Node::Empty(inner) => SequenceCore::<T, _>::is_empty(inner),
            Node::Strict(inner) => inner.is_empty(),
            Node::Lazy(inner) => inner.is_empty(),
            Node::Concat(inner) => inner.is_empty(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Node::Empty(inner) => SequenceCore::<T, _>::len(inner),
            Node::Strict(inner) => inner.len(),
            Node::Lazy(inner) => inner.len(),
            Node::Concat(inner) => inner.len(),
        }
    }

    fn get(&self, index: usize) -> Option<T> {
        match self {
            Node::Empty(inner) => SequenceCore::<T, _>::get(inner, index),
            Node::Strict(inner) => inner.get(index),
            Node::Lazy(inner) => inner.get(index),
            Node::Concat(inner) => inner.get(index),
        }
    }

    fn iter(&self) -> NodeIter<T> {
        match self {
            Node::Empty(inner) => NodeIter::Empty(SequenceCore::<T, _>::iter(inner)),
            Node::Strict(inner) => NodeIter::Strict(inner.iter()),
            Node::Lazy(inner) => NodeIter::Lazy(inner.iter()),
            Node::Concat(inner) => NodeIter::Concat(inner.iter()),
        }
    }
}
