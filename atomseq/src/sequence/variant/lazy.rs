use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error;
use crate::sequence::iter::LazyIter;
use crate::sequence::traits::SequenceCore;
use crate::sequence::Element;

/// A one-shot source of elements.
pub(crate) type Source<T> = Box<dyn Iterator<Item = error::Result<T>> + Send>;

/// Elements produced by a one-shot source, pulled on demand.
///
/// Everything the source yields is memoized, so the source runs at most once
/// per position no matter how many clones of this node traverse it, or from
/// how many threads. Once the source is exhausted the memo is frozen into a
/// shared block; once it fails the failure is kept and the source dropped.
#[derive(Clone)]
pub(crate) struct Lazy<T> {
    state: Arc<Mutex<LazyState<T>>>,
}

struct LazyState<T> {
    memo: Vec<T>,
    source: Option<Source<T>>,
    frozen: Option<Arc<[T]>>,
    failure: Option<error::Error>,
}

/// The outcome of asking for one position.
pub(crate) enum Pulled<T> {
    Item(T),
    End,
    Failed(error::Error),
}

impl<T: Element> LazyState<T> {
    fn produced(&self) -> &[T] {
        match &self.frozen {
            Some(frozen) => frozen,
            None => &self.memo,
        }
    }

    // pull from the source until `target` elements are memoized or it stops
    fn fill(&mut self, target: usize) {
        while self.memo.len() < target {
            let Some(source) = self.source.as_mut() else {
                return;
            };
            match source.next() {
                Some(Ok(item)) => self.memo.push(item),
                Some(Err(error)) => {
                    tracing::debug!(produced = self.memo.len(), %error, "lazy source failed");
                    self.source = None;
                    self.failure = Some(error);
                }
                None => {
                    tracing::debug!(produced = self.memo.len(), "lazy source exhausted");
                    self.source = None;
                    self.frozen = Some(std::mem::take(&mut self.memo).into());
                }
            }
        }
    }

    fn at(&self, index: usize) -> Pulled<T> {
        if let Some(item) = self.produced().get(index) {
            return Pulled::Item(item.clone());
        }
        match &self.failure {
            Some(failure) => Pulled::Failed(failure.clone()),
            None => Pulled::End,
        }
    }
}

impl<T: Element> Lazy<T> {
    pub(crate) fn new(source: Source<T>) -> Self {
        Lazy {
            state: Arc::new(Mutex::new(LazyState {
                memo: Vec::new(),
                source: Some(source),
                frozen: None,
                failure: None,
            })),
        }
    }

    /// Pull the element at `index`, running the source only as far as needed.
    pub(crate) fn pull(&self, index: usize) -> Pulled<T> {
        let mut state = self.state.lock();
        state.fill(index.saturating_add(1));
        state.at(index)
    }

    /// Run the source to the end and return the complete block.
    ///
    /// Repeated calls return the same block, or the same failure.
    pub(crate) fn force(&self) -> error::Result<Arc<[T]>> {
        let mut state = self.state.lock();
        state.fill(usize::MAX);
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        match &state.frozen {
            Some(frozen) => Ok(Arc::clone(frozen)),
            // fill only returns without a failure once the memo is frozen
            None => Ok(state.memo.clone().into()),
        }
    }

    /// Run the source to the end and count what it produced.
    pub(crate) fn produced_len(&self) -> usize {
        let mut state = self.state.lock();
        state.fill(usize::MAX);
        state.produced().len()
    }

    /// Whether the source has failed. Nothing is pulled to find out.
    pub(crate) fn failed(&self) -> bool {
        self.state.lock().failure.is_some()
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl<T: Element> SequenceCore<T, LazyIter<T>> for Lazy<T> {
    fn is_empty(&self) -> bool {
        // a failure before the first element leaves nothing observable
        !matches!(self.pull(0), Pulled::Item(_))
    }

    fn len(&self) -> usize {
        self.produced_len()
    }

    fn get(&self, index: usize) -> Option<T> {
        match self.pull(index) {
            Pulled::Item(item) => Some(item),
            Pulled::End | Pulled::Failed(_) => None,
        }
    }

    fn iter(&self) -> LazyIter<T> {
        LazyIter::new(self.clone())
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Lazy");
        // never block a formatter on a source that is running elsewhere
        match self.state.try_lock() {
            Some(state) => {
                let produced = state
                    .frozen
                    .as_ref()
                    .map_or(state.memo.len(), |frozen| frozen.len());
                s.field("produced", &produced)
                    .field("exhausted", &state.source.is_none())
                    .field("failed", &state.failure.is_some());
            }
            None => {
                s.field("busy", &true);
            }
        }
        s.finish()
    }
}
