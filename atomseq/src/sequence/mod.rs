//! A persistent sequence of elements.
//!
//! A sequence wraps exactly one node, which is one of four representations:
//! empty, a strict block, a lazy source, or a concatenation of other nodes.
//! Nodes are immutable and freely shared, so every operation that "changes" a
//! sequence returns a new one and leaves the original intact.

mod combine;
mod compare;
mod core;
mod creation;
mod format;
mod iter;
mod node;
mod traits;
mod transform;
mod variant;

pub use self::core::Sequence;
pub use format::{Preview, DISPLAY_LIMIT};
pub use iter::{Iter, TryIter};
pub use node::NodeKind;
pub(crate) use node::Node;

/// What a sequence can hold.
///
/// Nodes are shared between threads and lazy sources are moved into nodes,
/// so elements must be cloneable, thread safe, and own their data. This is
/// implemented for every type that qualifies.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Send + Sync + 'static {}
