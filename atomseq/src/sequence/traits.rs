use crate::error;

/// The core interface every node variant implements.
///
/// Iteration yields `Result` so that a failing lazy source can report its
/// failure at the position where it happened. Variants that cannot fail
/// simply never produce an `Err`.
pub(crate) trait SequenceCore<T, I>
where
    I: Iterator<Item = error::Result<T>>,
{
    /// Check whether the variant holds no elements.
    ///
    /// For lazy data this pulls at most one element.
    fn is_empty(&self) -> bool;

    /// The number of elements. May force lazy data.
    fn len(&self) -> usize;

    /// Get the element at `index`, if it exists.
    fn get(&self, index: usize) -> Option<T>;

    /// An owning iterator over the elements.
    ///
    /// The iterator holds its own references to shared data and is not
    /// affected by anything that happens to the value it came from.
    fn iter(&self) -> I;
}
