use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::core::Sequence;
use super::Element;

impl<T> PartialEq for Sequence<T>
where
    T: Element + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        // identical nodes are equal without looking at any element
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<T> Eq for Sequence<T> where T: Element + Eq {}

impl<T> PartialOrd for Sequence<T>
where
    T: Element + PartialOrd,
{
    /// Lexicographic, element by element; a proper prefix sorts first.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.ptr_eq(other) {
            return Some(Ordering::Equal);
        }
        self.iter().partial_cmp(other.iter())
    }
}

impl<T> Ord for Sequence<T>
where
    T: Element + Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        self.iter().cmp(other.iter())
    }
}

impl<T> Hash for Sequence<T>
where
    T: Element + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0;
        for item in self.iter() {
            item.hash(state);
            len += 1;
        }
        // the length goes last so that a single pass suffices over lazy data
        state.write_usize(len);
    }
}

impl<T> PartialEq<[T]> for Sequence<T>
where
    T: Element + PartialEq,
{
    fn eq(&self, other: &[T]) -> bool {
        self.iter().eq(other.iter().cloned())
    }
}

impl<T> PartialEq<Vec<T>> for Sequence<T>
where
    T: Element + PartialEq,
{
    fn eq(&self, other: &Vec<T>) -> bool {
        self == other.as_slice()
    }
}
