//! # pathscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! pathscope library. Import this module to get quick access to the essentials for
//! building graphs, running searches and counting paths.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all pathscope operations
pub use crate::Error;

/// The result type used throughout pathscope
pub use crate::Result;

// ================================================================================================
// Graph Data Model
// ================================================================================================

/// The central graph type: discovered nodes, append-only edges, designated start node
pub use crate::graph::Graph;

/// An immutable directed edge with an optional payload
pub use crate::graph::Edge;

/// An edge sequence from the start node; the empty path is the start itself
pub use crate::graph::Path;

// ================================================================================================
// Search Configuration
// ================================================================================================

/// Per-invocation search tuning: exhaustive vs first-hit, worker-pool sizing
pub use crate::graph::SearchOptions;

/// Breadth-first vs depth-first traversal order
pub use crate::sync::Discipline;

// ================================================================================================
// Concurrency Primitives
// ================================================================================================

/// Linearizable insert-if-absent set deciding state ownership between workers
pub use crate::sync::DedupSet;

/// Shared FIFO/LIFO work collection with non-blocking polls
pub use crate::sync::Frontier;
