use super::node::Node;
use super::variant::Concat;
use super::Element;

/// Concatenate two nodes, picking the cheapest shape for the result.
///
/// | left     | right    | result                                 |
/// |----------|----------|----------------------------------------|
/// | `Empty`  | any      | right, unchanged                       |
/// | any      | `Empty`  | left, unchanged                        |
/// | `Concat` | `Concat` | one concat with both child lists       |
/// | `Concat` | other    | right appended to the child list       |
/// | other    | `Concat` | left prepended to the child list       |
/// | `Strict` | `Strict` | one new strict block                   |
/// | `Lazy`   | other    | binary concat, nothing materialized    |
/// | other    | `Lazy`   | binary concat, nothing materialized    |
///
/// Extending an existing concat instead of wrapping it keeps the depth of
/// the node graph flat no matter how many appends happen.
pub(crate) fn concat<T: Element>(left: &Node<T>, right: &Node<T>) -> Node<T> {
    match (left, right) {
        (Node::Empty(_), _) => right.clone(),
        (_, Node::Empty(_)) => left.clone(),
        (Node::Concat(a), Node::Concat(b)) => Node::Concat(a.splice(b)),
        (Node::Concat(a), Node::Strict(_) | Node::Lazy(_)) => Node::Concat(a.push_back(right.clone())),
        (Node::Strict(_) | Node::Lazy(_), Node::Concat(b)) => Node::Concat(b.push_front(left.clone())),
        (Node::Strict(a), Node::Strict(b)) => Node::Strict(a.merge(b)),
        (Node::Lazy(_), Node::Strict(_) | Node::Lazy(_)) | (Node::Strict(_), Node::Lazy(_)) => {
            Node::Concat(Concat::pair(left.clone(), right.clone()))
        }
    }
}

/// Concatenate any number of nodes from left to right.
pub(crate) fn concat_all<T: Element>(nodes: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    nodes
        .into_iter()
        .fold(Node::default(), |acc, node| concat(&acc, &node))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use crate::sequence::node::NodeKind;
    use crate::sequence::traits::SequenceCore;

    use super::*;

    fn node_of(kind: NodeKind, items: &[i32]) -> Node<i32> {
        match kind {
            NodeKind::Empty => Node::default(),
            NodeKind::Strict => Node::strict(items.to_vec()),
            NodeKind::Lazy => Node::lazy(Box::new(items.to_vec().into_iter().map(Ok))),
            NodeKind::Concat => {
                let (head, tail) = items.split_at(items.len() / 2);
                concat(
                    &Node::lazy(Box::new(head.to_vec().into_iter().map(Ok))),
                    &Node::strict(tail.to_vec()),
                )
            }
        }
    }

    fn values(node: &Node<i32>) -> Vec<i32> {
        node.iter().collect::<crate::error::Result<Vec<_>>>().unwrap()
    }

    #[rstest]
    #[case(NodeKind::Strict, NodeKind::Strict, NodeKind::Strict)]
    #[case(NodeKind::Strict, NodeKind::Lazy, NodeKind::Concat)]
    #[case(NodeKind::Lazy, NodeKind::Strict, NodeKind::Concat)]
    #[case(NodeKind::Lazy, NodeKind::Lazy, NodeKind::Concat)]
    #[case(NodeKind::Concat, NodeKind::Strict, NodeKind::Concat)]
    #[case(NodeKind::Concat, NodeKind::Lazy, NodeKind::Concat)]
    #[case(NodeKind::Strict, NodeKind::Concat, NodeKind::Concat)]
    #[case(NodeKind::Concat, NodeKind::Concat, NodeKind::Concat)]
    fn test_combination_table(
        #[case] left: NodeKind,
        #[case] right: NodeKind,
        #[case] expected: NodeKind,
    ) {
        let combined = concat(&node_of(left, &[1, 2]), &node_of(right, &[3, 4]));
        assert_eq!(combined.kind(), expected);
        assert_eq!(values(&combined), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_is_identity_for_every_kind() {
        for kind in NodeKind::iter() {
            let node = node_of(kind, &[1, 2, 3]);
            let empty = Node::default();
            assert!(concat(&empty, &node).ptr_eq(&node), "{kind} on the right");
            assert!(concat(&node, &empty).ptr_eq(&node), "{kind} on the left");
        }
    }

    #[test]
    fn test_concat_children_stay_flat() {
        let mut node = node_of(NodeKind::Lazy, &[0]);
        for i in 1..100 {
            node = concat(&node, &Node::singleton(i));
        }
        let Node::Concat(inner) = &node else {
            panic!("expected a concat node, got {}", node.kind());
        };
        assert_eq!(inner.children().len(), 100);
        assert!(inner
            .children()
            .iter()
            .all(|child| child.kind() != NodeKind::Concat));
        assert_eq!(values(&node), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_concat_splice_keeps_order() {
        let left = node_of(NodeKind::Concat, &[1, 2, 3, 4]);
        let right = node_of(NodeKind::Concat, &[5, 6]);
        let combined = concat(&left, &right);
        let Node::Concat(inner) = &combined else {
            panic!("expected a concat node");
        };
        assert_eq!(inner.children().len(), 4);
        assert_eq!(values(&combined), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_combination_does_not_pull_lazy_sources() {
        let pulled = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = pulled.clone();
        let lazy = Node::lazy(Box::new((0..3).map(move |i| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(i)
        })));
        let combined = concat(&concat(&Node::strict(vec![9]), &lazy), &Node::singleton(10));
        assert_eq!(pulled.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert_eq!(combined.len(), 5);
        assert_eq!(pulled.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[test]
    fn test_concat_all() {
        let node = concat_all(vec![
            Node::strict(vec![1]),
            Node::default(),
            Node::strict(vec![2, 3]),
        ]);
        assert_eq!(node.kind(), NodeKind::Strict);
        assert_eq!(values(&node), vec![1, 2, 3]);
    }
}
