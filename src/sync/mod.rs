//! Concurrency primitives underpinning the search engines.
//!
//! Two small leaves live here, both safe for many concurrent producers and consumers:
//!
//! - [`DedupSet`](crate::sync::DedupSet) - an insert-if-absent set deciding which caller is
//!   responsible for scheduling work on a key
//! - [`Frontier`](crate::sync::Frontier) - the shared pending-work collection, FIFO or LIFO
//!   depending on the traversal [`Discipline`](crate::sync::Discipline)
//!
//! Neither primitive knows anything about graphs; the search engine in [`crate::graph`]
//! composes them.

mod dedup;
mod frontier;

pub use dedup::DedupSet;
pub use frontier::{Discipline, Frontier};
