// Copyright 2025 The pathscope contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # pathscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/pathscope.svg)](https://crates.io/crates/pathscope)
//! [![Documentation](https://docs.rs/pathscope/badge.svg)](https://docs.rs/pathscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/pathscope-rs/pathscope/blob/main/LICENSE)
//!
//! A concurrent graph/tree-search engine for state spaces that are discovered while you search
//! them. `pathscope` finds a shortest sequence of generated transitions from a start state to a
//! goal state (or enumerates all qualifying paths), and counts distinct walks through explicit
//! directed acyclic graphs - the two workhorse queries behind puzzle solvers, planners and
//! state-space explorers.
//!
//! ## Features
//!
//! - **🔍 Generative search** - nodes and edges come from a caller-supplied generator, so the
//!   graph never has to exist up front
//! - **⚡ True parallelism** - a fixed-size worker pool drains a shared frontier; node and edge
//!   collections are lock-free or sharded, never behind one big mutex
//! - **📏 Deterministic shortest paths** - breadth-first traversal is level-synchronized, so the
//!   first hit is provably a shortest one, run after run
//! - **🧮 Checked path counting** - memoized walk counting over fixed edge lists that fails hard
//!   on `u64` overflow instead of wrapping
//! - **🛡️ No partial results** - a failing callback aborts the whole search with its error;
//!   an unreachable goal is an empty result, never an error
//! - **🧩 Opaque node types** - bring any `Clone + Eq + Hash` value; the engine never looks
//!   inside your states
//!
//! ## Quick Start
//!
//! Add `pathscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pathscope = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use pathscope::prelude::*;
//!
//! let graph = Graph::with_edges("start", [
//!     Edge::new("start", "a"),
//!     Edge::new("a", "goal"),
//! ]);
//!
//! let paths = graph.breadth_first(
//!     &SearchOptions::default(),
//!     |n| Ok(*n == "goal"),
//!     |_| Ok(true),
//! )?;
//! assert_eq!(paths[0].len(), 2);
//! # Ok::<(), pathscope::Error>(())
//! ```
//!
//! ### Searching a generated state space
//!
//! The edge generator runs on worker threads and conjures successor states on demand; here the
//! states are numbers and the transitions are arithmetic moves:
//!
//! ```rust
//! use pathscope::{Discipline, Edge, Graph, SearchOptions};
//!
//! let graph = Graph::new(2u64);
//! let paths = graph.generative_search(
//!     Discipline::BreadthFirst,
//!     &SearchOptions::default(),
//!     |&n| Ok([n + 7, n * 3].into_iter()
//!         .filter(|&m| m <= 100)
//!         .map(|m| Edge::new(n, m))
//!         .collect()),
//!     |&n| Ok(n == 27),
//!     |_| Ok(true),
//! )?;
//!
//! // 2 -> 9 (+7) -> 27 (x3): two moves suffice.
//! assert_eq!(paths[0].len(), 2);
//! # Ok::<(), pathscope::Error>(())
//! ```
//!
//! ### Counting walks through a known graph
//!
//! ```rust
//! use pathscope::{Edge, Graph};
//!
//! let graph = Graph::with_edges(0, [
//!     Edge::new(0, 1),
//!     Edge::new(0, 2),
//!     Edge::new(1, 3),
//!     Edge::new(2, 3),
//! ]);
//!
//! assert_eq!(graph.count_paths(|&n| n == 3)?, 2);
//! assert!(graph.can_reach(&0, &3));
//! # Ok::<(), pathscope::Error>(())
//! ```
//!
//! ## Concurrency Model
//!
//! Every search runs on its own fixed-size worker pool (by default four times the available
//! hardware parallelism, which keeps workers busy when individual expansions have uneven
//! cost). Workers share a frontier of pending `(node, path)` entries, a dedup set deciding
//! which worker owns each newly discovered state, and append-only output collections.
//!
//! Breadth-first searches proceed in level-synchronized rounds with a barrier between levels;
//! that barrier is what upgrades "a path found first" into "a provably shortest path".
//! Depth-first searches free-run over one shared stack and use an outstanding-work counter to
//! retire workers only once nothing is queued *and* nothing is mid-expansion. Because the
//! stack is shared, parallel depth-first exploration interleaves across branches rather than
//! following one sequential depth-first order; that divergence is intentional.
//!
//! Cancellation after a first hit is cooperative: workers poll a stop signal between steps,
//! so a little extra expansion can happen after the winning path is recorded.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use pathscope::{Error, Graph, SearchOptions};
//!
//! let graph: Graph<u32> = Graph::new(0);
//! match graph.breadth_first(&SearchOptions::default(), |_| Err(Error::callback("nope")), |_| Ok(true)) {
//!     Err(Error::Callback(source)) => println!("a callback failed: {source}"),
//!     Err(e) => println!("other failure: {e}"),
//!     Ok(paths) => println!("found {} paths", paths.len()),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: debug-level progress snapshots every 100 000 processed
//! states and a summary per search, trace-level detail per expanded entry. Install any
//! `tracing` subscriber to see them; without one the call sites are inert.

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use pathscope::prelude::*;
///
/// let graph = Graph::with_edges(1u8, [Edge::new(1, 2)]);
/// let paths = graph.depth_first(&SearchOptions::default(), |&n| Ok(n == 2), |_| Ok(true))?;
/// assert_eq!(paths.len(), 1);
/// # Ok::<(), pathscope::Error>(())
/// ```
pub mod prelude;

/// Concurrency primitives the engines are built from.
///
/// - [`sync::DedupSet`] - linearizable insert-if-absent set; exactly one of N concurrent
///   identical-key inserts wins
/// - [`sync::Frontier`] - shared FIFO/LIFO work collection with non-blocking polls
/// - [`sync::Discipline`] - breadth-first vs depth-first traversal order
///
/// Both collections are deliberately graph-agnostic; anything needing a concurrent
/// visited-set or work-queue can reuse them directly.
pub mod sync;

/// The graph data model and the engines operating on it.
///
/// # Key Types
///
/// - [`Graph`] - discovered nodes, append-only edges, designated start node
/// - [`Edge`] - immutable `(source, target)` pair with optional payload
/// - [`Path`] - edge sequence from the start node; empty means the start itself
/// - [`graph::SearchOptions`] - exhaustiveness and worker-count tuning
///
/// # Main Operations
///
/// - [`Graph::generative_search`] - parallel search over generator-produced edges
/// - [`Graph::breadth_first`] / [`Graph::depth_first`] - the same engine fed by a
///   precomputed adjacency snapshot of the materialized edge list
/// - [`Graph::count_paths`] - memoized per-goal walk counting with checked arithmetic
/// - [`Graph::enumerate_paths`] - memoized listing of every start-to-goal walk
/// - [`Graph::can_reach`] - backward reachability over target-indexed edges
pub mod graph;

/// `pathscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`], used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `pathscope` Error type
///
/// The error type for all operations in this crate: callback failures during search,
/// checked-arithmetic overflow during counting, and worker-pool construction failures.
pub use error::Error;

/// The central graph type: a set of discovered nodes, an append-only edge list and a start
/// node, with search and counting entry points as methods.
pub use graph::{Edge, Graph, Path};

/// Per-invocation search tuning: exhaustive vs first-hit, worker-pool sizing.
pub use graph::SearchOptions;

/// Traversal discipline selector shared by the frontier and the search entry points.
pub use sync::Discipline;
