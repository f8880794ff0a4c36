//! Pending-work containers drained by a visitor that may add more work while it runs.
//!
//! [`WorkQueue`] hands items out first-in first-out, which gives breadth-first traversals;
//! [`WorkStack`] hands them out last-in first-out, which gives depth-first flood fills.
//! Neither keeps track of what it has already handed out. Callers that can reach the same item twice
//! must keep their own visited set, or the drain never ends.

use std::collections::VecDeque;

use tracing::trace;

/// How a call to [`WorkList::process`] ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Drain {
    /// Every pending item, including those added during the drain, was visited.
    Drained,
    /// The visitor called [`WorkList::abandon`]; the remaining items were discarded unvisited.
    Abandoned,
}

mod sealed {
    pub trait Sealed {}
}

/// Functionality shared by [`WorkQueue`] and [`WorkStack`].
///
/// The trait is sealed: the abandon flag is bookkeeping private to [`process`](Self::process),
/// so only this module's containers implement it.
pub trait WorkList<T>: sealed::Sealed + Sized {
    /// Add `item` to the pending items.
    fn add(&mut self, item: T);

    /// Remove the item that should be visited next.
    fn take_next(&mut self) -> Option<T>;

    /// Number of pending items.
    fn len(&self) -> usize;

    /// Whether no items are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard every pending item and end the running [`process`](Self::process) call once the visitor returns.
    ///
    /// Only meaningful from inside a visitor; outside of one it just clears the pending items.
    fn abandon(&mut self);

    /// Whether [`abandon`](Self::abandon) was called during the current drain.
    fn is_abandoned(&self) -> bool;

    /// Clear the flag set by [`abandon`](Self::abandon). [`process`](Self::process) calls this on entry and on exit.
    fn reset_abandoned(&mut self);

    /// Visit pending items until none are left, or until the visitor abandons the rest.
    ///
    /// The visitor receives the list itself so that it may [`add`](Self::add) follow-up work or [`abandon`](Self::abandon).
    /// Processing an empty list is a no-op returning [`Drain::Drained`].
    fn process(&mut self, mut visit: impl FnMut(&mut Self, T)) -> Drain {
        self.reset_abandoned();
        let mut visited = 0usize;

        while let Some(item) = self.take_next() {
            visit(self, item);
            visited += 1;

            if self.is_abandoned() {
                trace!(visited, "work abandoned");
                self.reset_abandoned();
                return Drain::Abandoned;
            }
        }

        trace!(visited, "work drained");
        Drain::Drained
    }
}

/// First-in first-out pending work.
#[derive(Clone, Debug)]
pub struct WorkQueue<T> {
    pending: VecDeque<T>,
    abandoned: bool,
}

impl<T> WorkQueue<T> {
    /// An empty queue.
    pub fn new() -> Self {
        Self { pending: VecDeque::new(), abandoned: false }
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for WorkQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { pending: iter.into_iter().collect(), abandoned: false }
    }
}

impl<T> sealed::Sealed for WorkQueue<T> {}

impl<T> WorkList<T> for WorkQueue<T> {
    fn add(&mut self, item: T) {
        self.pending.push_back(item);
    }

    fn take_next(&mut self) -> Option<T> {
        self.pending.pop_front()
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn abandon(&mut self) {
        self.pending.clear();
        self.abandoned = true;
    }

    fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    fn reset_abandoned(&mut self) {
        self.abandoned = false;
    }
}

/// Last-in first-out pending work.
#[derive(Clone, Debug)]
pub struct WorkStack<T> {
    pending: Vec<T>,
    abandoned: bool,
}

impl<T> WorkStack<T> {
    /// An empty stack.
    pub fn new() -> Self {
        Self { pending: Vec::new(), abandoned: false }
    }
}

impl<T> Default for WorkStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for WorkStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { pending: iter.into_iter().collect(), abandoned: false }
    }
}

impl<T> sealed::Sealed for WorkStack<T> {}

impl<T> WorkList<T> for WorkStack<T> {
    fn add(&mut self, item: T) {
        self.pending.push(item);
    }

    fn take_next(&mut self) -> Option<T> {
        self.pending.pop()
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn abandon(&mut self) {
        self.pending.clear();
        self.abandoned = true;
    }

    fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    fn reset_abandoned(&mut self) {
        self.abandoned = false;
    }
}
