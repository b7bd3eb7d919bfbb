use std::sync::Arc;

use crate::sequence::iter::ConcatIter;
use crate::sequence::node::Node;
use crate::sequence::traits::SequenceCore;
use crate::sequence::Element;

use super::Pulled;

/// The logical concatenation of a list of child nodes.
///
/// Children are never structurally empty, and combining with another concat
/// extends the child list instead of nesting, so traversal depth stays flat.
#[derive(Debug, Clone)]
pub(crate) struct Concat<T> {
    children: Arc<[Node<T>]>,
}

impl<T: Element> Concat<T> {
    /// Build from children that are already known to be non-empty.
    fn from_children(children: Vec<Node<T>>) -> Self {
        debug_assert!(children.iter().all(|child| !child.is_structurally_empty()));
        Concat {
            children: children.into(),
        }
    }

    pub(crate) fn pair(left: Node<T>, right: Node<T>) -> Self {
        Self::from_children(vec![left, right])
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Node<T>] {
        &self.children
    }

    pub(crate) fn push_back(&self, node: Node<T>) -> Self {
        let mut children = Vec::with_capacity(self.children.len() + 1);
        children.extend_from_slice(&self.children);
        children.push(node);
        Self::from_children(children)
    }

    pub(crate) fn push_front(&self, node: Node<T>) -> Self {
        let mut children = Vec::with_capacity(self.children.len() + 1);
        children.push(node);
        children.extend_from_slice(&self.children);
        Self::from_children(children)
    }

    pub(crate) fn splice(&self, other: &Self) -> Self {
        let mut children = Vec::with_capacity(self.children.len() + other.children.len());
        children.extend_from_slice(&self.children);
        children.extend_from_slice(&other.children);
        Self::from_children(children)
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.children, &other.children)
    }
}

// A failed lazy child ends what can be observed of the concat, as it ends
// iteration. Children are never concats themselves, so only a lazy child
// can fail or hold back its length.
impl<T: Element> SequenceCore<T, ConcatIter<T>> for Concat<T> {
    fn is_empty(&self) -> bool {
        for child in self.children.iter() {
            match child {
                Node::Lazy(lazy) => match lazy.pull(0) {
                    Pulled::Item(_) => return false,
                    Pulled::Failed(_) => return true,
                    Pulled::End => {}
                },
                _ => {
                    if !child.is_empty() {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn len(&self) -> usize {
        let mut total = 0;
        for child in self.children.iter() {
            total += child.len();
            if let Node::Lazy(lazy) = child {
                if lazy.failed() {
                    break;
                }
            }
        }
        total
    }

    fn get(&self, index: usize) -> Option<T> {
        let mut index = index;
        for child in self.children.iter() {
            match child {
                // pull only as far as the index, never the whole source
                Node::Lazy(lazy) => match lazy.pull(index) {
                    Pulled::Item(item) => return Some(item),
                    Pulled::Failed(_) => return None,
                    Pulled::End => index -= lazy.produced_len(),
                },
                _ => {
                    let len = child.len();
                    if index < len {
                        return child.get(index);
                    }
                    index -= len;
                }
            }
        }
        None
    }

    fn iter(&self) -> ConcatIter<T> {
        ConcatIter::new(Arc::clone(&self.children))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rstest::rstest;

    use crate::error::Error;
    use crate::sequence::{NodeKind, Sequence};

    #[derive(Debug, thiserror::Error)]
    #[error("unreadable")]
    struct Unreadable;

    fn failing(items: Vec<i32>) -> Sequence<i32> {
        Sequence::try_lazy(
            items
                .into_iter()
                .map(Ok)
                .chain(std::iter::once(Err(Unreadable))),
        )
    }

    fn mixed() -> Sequence<i32> {
        Sequence::lazy(vec![1, 2])
            .concat(&Sequence::from(vec![3]))
            .concat(&Sequence::lazy(vec![4, 5]))
    }

    fn lazy_empty_first() -> Sequence<i32> {
        Sequence::lazy(Vec::new()).concat(&Sequence::from(vec![1, 2]))
    }

    fn failing_after_one() -> Sequence<i32> {
        failing(vec![1]).concat(&Sequence::from(vec![5]))
    }

    fn failing_before_any() -> Sequence<i32> {
        failing(vec![]).concat(&Sequence::from(vec![1, 2]))
    }

    fn failing_in_the_middle() -> Sequence<i32> {
        Sequence::from(vec![1, 2])
            .concat(&failing(vec![3]))
            .concat(&Sequence::from(vec![9]))
    }

    // every read is made on a fresh value so no read can rely on memo
    // left behind by another
    #[rstest]
    #[case::mixed(mixed, vec![1, 2, 3, 4, 5])]
    #[case::lazy_empty_first(lazy_empty_first, vec![1, 2])]
    #[case::failing_after_one(failing_after_one, vec![1])]
    #[case::failing_before_any(failing_before_any, vec![])]
    #[case::failing_in_the_middle(failing_in_the_middle, vec![1, 2, 3])]
    fn test_reads_agree_with_iteration(
        #[case] build: fn() -> Sequence<i32>,
        #[case] expected: Vec<i32>,
    ) {
        assert_eq!(build().kind(), NodeKind::Concat);
        assert_eq!(build().to_vec(), expected);
        assert_eq!(build().len(), expected.len());
        assert_eq!(build().is_empty(), expected.is_empty());
        assert_eq!(build().head_or_none(), expected.first().copied());
        for (index, item) in expected.iter().enumerate() {
            assert_eq!(build().get(index), Some(*item));
            assert_eq!(build().at(index), Ok(*item));
        }
        assert_eq!(build().get(expected.len()), None);
        assert_eq!(
            build().at(expected.len()),
            Err(Error::IndexOutOfRange {
                index: expected.len(),
                len: expected.len()
            })
        );
    }

    #[test]
    fn test_indexing_pulls_only_up_to_the_index() {
        let pulls = std::sync::Arc::new(AtomicUsize::new(0));
        let counter = pulls.clone();
        // an endless source: anything that runs it to the end never returns
        let sequence = Sequence::lazy((0..).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .add(-1);
        assert_eq!(sequence.kind(), NodeKind::Concat);

        assert!(!sequence.is_empty());
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
        assert_eq!(sequence.head_or_none(), Some(0));
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
        assert_eq!(sequence.get(3), Some(3));
        assert_eq!(pulls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_index_past_exhausted_lazy_child() {
        let sequence = Sequence::lazy(vec![1, 2]).add(3);
        assert_eq!(sequence.get(2), Some(3));
        assert_eq!(sequence.get(0), Some(1));
        assert_eq!(sequence.get(3), None);
    }
}
