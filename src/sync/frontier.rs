//! Shared frontier collection with selectable traversal discipline.

use std::sync::{Mutex, PoisonError};

use crossbeam_deque::Injector;

/// Traversal discipline of a [`Frontier`]: the order pending entries come back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// First-in-first-out. Entries are expanded a full depth level at a time, which is what
    /// gives breadth-first search its shortest-path property.
    BreadthFirst,
    /// Last-in-first-out. Workers dive along the most recently discovered branch first. With
    /// several workers draining the same frontier the interleaving is not a single sequential
    /// depth-first order; that divergence is intentional.
    DepthFirst,
}

/// The shared pending-work collection of a search: entries pushed by any worker, popped by any
/// worker, never blocking.
///
/// `push` always succeeds. [`Frontier::try_pop`] returns immediately: `None` means "nothing
/// currently available", **not** "the search is finished" - another worker may be mid-expansion
/// and about to push. Termination on top of this collection needs an outstanding-work protocol,
/// which is the engine's job, not the frontier's.
///
/// The FIFO flavor rides on a lock-free [`Injector`]; the LIFO flavor is a mutexed stack whose
/// lock is held only for a single push or pop.
///
/// # Examples
///
/// ```rust
/// use pathscope::sync::{Discipline, Frontier};
///
/// let frontier = Frontier::new(Discipline::BreadthFirst);
/// frontier.push(1);
/// frontier.push(2);
/// assert_eq!(frontier.try_pop(), Some(1));
/// assert_eq!(frontier.try_pop(), Some(2));
/// assert_eq!(frontier.try_pop(), None);
/// ```
#[derive(Debug)]
pub struct Frontier<T> {
    backing: Backing<T>,
}

#[derive(Debug)]
enum Backing<T> {
    Fifo(Injector<T>),
    Lifo(Mutex<Vec<T>>),
}

impl<T> Frontier<T> {
    /// Creates an empty frontier with the given discipline.
    #[must_use]
    pub fn new(discipline: Discipline) -> Self {
        let backing = match discipline {
            Discipline::BreadthFirst => Backing::Fifo(Injector::new()),
            Discipline::DepthFirst => Backing::Lifo(Mutex::new(Vec::new())),
        };
        Frontier { backing }
    }

    /// The discipline this frontier was constructed with.
    #[must_use]
    pub fn discipline(&self) -> Discipline {
        match &self.backing {
            Backing::Fifo(_) => Discipline::BreadthFirst,
            Backing::Lifo(_) => Discipline::DepthFirst,
        }
    }

    /// Adds an entry. Always succeeds, safe under concurrent callers.
    pub fn push(&self, item: T) {
        match &self.backing {
            Backing::Fifo(queue) => queue.push(item),
            Backing::Lifo(stack) => {
                // A poisoned lock still holds a usable stack; the panic that poisoned it
                // resurfaces when the worker pool joins.
                stack
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(item);
            }
        }
    }

    /// Removes and returns the next entry per the discipline, or `None` if nothing is currently
    /// available. Never blocks waiting for elements.
    pub fn try_pop(&self) -> Option<T> {
        match &self.backing {
            Backing::Fifo(queue) => {
                // Injector::steal can spuriously ask for a retry during a concurrent push;
                // spin past those so the caller only sees filled-or-empty.
                std::iter::repeat_with(|| queue.steal())
                    .find(|s| !s.is_retry())
                    .and_then(|s| s.success())
            }
            Backing::Lifo(stack) => stack
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop(),
        }
    }

    /// Number of entries currently queued. Under concurrent pushes and pops this is a snapshot,
    /// useful for progress reporting rather than control flow.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Fifo(queue) => queue.len(),
            Backing::Lifo(stack) => stack.lock().unwrap_or_else(PoisonError::into_inner).len(),
        }
    }

    /// Returns `true` if no entry is currently queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.backing {
            Backing::Fifo(queue) => queue.is_empty(),
            Backing::Lifo(stack) => stack
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty(),
        }
    }
}
