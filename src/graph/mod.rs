//! Graph data model, adjacency helpers and the search/counting engines built on top of it.
//!
//! A [`Graph`] is three things: a concurrent set of discovered nodes, an append-only list of
//! edges, and a designated start node. Two usage patterns share the type:
//!
//! - **Generative**: the graph starts almost empty and grows while
//!   [`Graph::generative_search`] explores it, with a caller-supplied generator producing
//!   edges (and possibly recording new nodes) on demand.
//! - **Static**: the caller materializes every edge up front (see [`Graph::with_edges`]) and
//!   then runs [`Graph::breadth_first`] / [`Graph::depth_first`] over the fixed edge list, or
//!   the counting entry points [`Graph::count_paths`] and [`Graph::enumerate_paths`].
//!
//! Node and edge collections only ever grow; nothing is removed or mutated in place. Both are
//! safe to append to from many worker threads at once, and appends become atomically visible
//! to concurrent readers. A graph is built for one search or count invocation, consumed by the
//! caller and dropped; there is no cross-run persistence.

mod count;
mod search;

pub use search::SearchOptions;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use dashmap::DashSet;

/// A directed transition between two nodes, optionally carrying a caller payload.
///
/// Edges are immutable: never mutated or removed once created. The `label` is opaque to the
/// engine and defaults to `()`; callers use it to remember which action produced the
/// transition (a pressed button, an instruction, ...).
///
/// # Examples
///
/// ```rust
/// use pathscope::Edge;
///
/// let plain = Edge::new("a", "b");
/// let labeled = Edge::labeled("a", "b", "jump");
/// assert_eq!(plain.source, labeled.source);
/// assert_eq!(format!("{plain}"), "a => b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<N, L = ()> {
    /// Node this edge leaves from.
    pub source: N,
    /// Node this edge arrives at.
    pub target: N,
    /// Caller payload attached to the transition.
    pub label: L,
}

impl<N> Edge<N> {
    /// Creates an unlabeled edge.
    pub fn new(source: N, target: N) -> Self {
        Edge {
            source,
            target,
            label: (),
        }
    }
}

impl<N, L> Edge<N, L> {
    /// Creates an edge carrying a payload.
    pub fn labeled(source: N, target: N, label: L) -> Self {
        Edge {
            source,
            target,
            label,
        }
    }
}

impl<N: fmt::Display, L> fmt::Display for Edge<N, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.source, self.target)
    }
}

/// An ordered sequence of edges from the start node to some node. The empty path denotes the
/// start node itself.
pub type Path<N, L = ()> = Vec<Edge<N, L>>;

/// A set of discovered nodes, an append-only list of edges, and a designated start node.
///
/// All collection mutators take `&self`: the node set is a sharded concurrent set and the edge
/// list an append-only lock-free vector, so worker threads (including the edge generator of a
/// running search) can record discoveries through a shared reference without losing updates.
///
/// Node types are ordinary values; the engine never interprets them. They must carry a total
/// equality and a hash consistent with it, which the `Eq + Hash` bounds express - derived
/// structural implementations are the intended way to satisfy that contract.
///
/// # Examples
///
/// Static construction and a reachability query:
///
/// ```rust
/// use pathscope::{Edge, Graph};
///
/// let graph = Graph::with_edges("start", [
///     Edge::new("start", "a"),
///     Edge::new("a", "goal"),
///     Edge::new("b", "goal"),
/// ]);
///
/// assert_eq!(graph.node_count(), 4);
/// assert!(graph.can_reach(&"start", &"goal"));
/// assert!(!graph.can_reach(&"start", &"b"));
/// ```
#[derive(Debug)]
pub struct Graph<N: Eq + Hash, L = ()> {
    nodes: DashSet<N>,
    edges: boxcar::Vec<Edge<N, L>>,
    start: N,
}

impl<N, L> Graph<N, L>
where
    N: Clone + Eq + Hash,
    L: Clone,
{
    /// Creates a graph containing only `start`.
    #[must_use]
    pub fn new(start: N) -> Self {
        let nodes = DashSet::new();
        nodes.insert(start.clone());
        Graph {
            nodes,
            edges: boxcar::Vec::new(),
            start,
        }
    }

    /// Creates a graph from a complete edge list, the shape the counting and reachability
    /// entry points expect. Every edge endpoint is recorded as a node.
    #[must_use]
    pub fn with_edges(start: N, edges: impl IntoIterator<Item = Edge<N, L>>) -> Self {
        let graph = Self::new(start);
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// The designated start node.
    #[must_use]
    pub fn start(&self) -> &N {
        &self.start
    }

    /// Records a discovered node. Returns `true` iff the node was not already present. Safe to
    /// call from concurrent workers, e.g. inside a running search's edge generator.
    pub fn add_node(&self, node: N) -> bool {
        self.nodes.insert(node)
    }

    /// Appends an edge and records both endpoints as nodes. The append becomes atomically
    /// visible to concurrent readers of [`Graph::edges`].
    pub fn add_edge(&self, edge: Edge<N, L>) {
        self.nodes.insert(edge.source.clone());
        self.nodes.insert(edge.target.clone());
        self.edges.push(edge);
    }

    /// Returns `true` if `node` has been recorded.
    #[must_use]
    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Number of distinct recorded nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of recorded edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    /// Snapshot of the recorded nodes. Order is unspecified.
    #[must_use]
    pub fn nodes(&self) -> Vec<N> {
        self.nodes.iter().map(|n| n.key().clone()).collect()
    }

    /// Iterates over the recorded edges in insertion order. Edges appended concurrently while
    /// iterating may or may not be observed.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<N, L>> {
        self.edges.iter().map(|(_, edge)| edge)
    }

    /// Builds a source-indexed adjacency map from the current edge list: every edge appears in
    /// the bucket of its source node. Built once, then cheap to query; the static search
    /// wrappers and the counters all start from this snapshot.
    #[must_use]
    pub fn outgoing_index(&self) -> HashMap<N, Vec<Edge<N, L>>> {
        let mut index: HashMap<N, Vec<Edge<N, L>>> = HashMap::new();
        for (_, edge) in self.edges.iter() {
            index
                .entry(edge.source.clone())
                .or_default()
                .push(edge.clone());
        }
        index
    }

    /// Builds a target-indexed adjacency map from the current edge list: every edge appears in
    /// the bucket of its target node. This is the index [`Graph::can_reach`] walks backward.
    #[must_use]
    pub fn incoming_index(&self) -> HashMap<N, Vec<Edge<N, L>>> {
        let mut index: HashMap<N, Vec<Edge<N, L>>> = HashMap::new();
        for (_, edge) in self.edges.iter() {
            index
                .entry(edge.target.clone())
                .or_default()
                .push(edge.clone());
        }
        index
    }

    /// Decides whether any directed walk leads from `source` to `goal` over the current edge
    /// list, by walking backward from `goal` through target-indexed edges.
    ///
    /// A node is never re-visited, so the walk terminates even when the edge list contains
    /// cycles. `source == goal` is trivially reachable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathscope::{Edge, Graph};
    ///
    /// let graph = Graph::with_edges(0, [Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)]);
    /// assert!(graph.can_reach(&0, &2));
    /// assert!(graph.can_reach(&2, &1));
    /// assert!(!graph.can_reach(&0, &7));
    /// ```
    #[must_use]
    pub fn can_reach(&self, source: &N, goal: &N) -> bool {
        if source == goal {
            return true;
        }

        let incoming = self.incoming_index();
        let mut visited = std::collections::HashSet::new();
        let mut pending = vec![goal.clone()];
        visited.insert(goal.clone());

        while let Some(node) = pending.pop() {
            let Some(edges) = incoming.get(&node) else {
                continue;
            };
            for edge in edges {
                if edge.source == *source {
                    return true;
                }
                if visited.insert(edge.source.clone()) {
                    pending.push(edge.source.clone());
                }
            }
        }

        false
    }
}
