//! Memoized path counting and enumeration over a fixed edge list.
//!
//! Unlike the generative engine, nothing here discovers new states: the graph is supplied
//! complete and read-only. Counting recurses from the start node over a source-indexed
//! adjacency snapshot with one memo table per goal, so multiple goals count independently and
//! in parallel with no cross-goal synchronization. All arithmetic is checked; a count that no
//! longer fits in `u64` is a hard failure, never a silent wrap.

use std::collections::HashMap;
use std::hash::Hash;

use rayon::prelude::*;
use tracing::debug;

use crate::{Edge, Error, Graph, Result, SearchOptions};

impl<N, L> Graph<N, L>
where
    N: Clone + Eq + Hash + Send + Sync,
    L: Clone + Eq + Hash + Send + Sync,
{
    /// Counts the distinct directed walks from the start node to every node satisfying
    /// `is_goal`, summed over goals.
    ///
    /// Each goal is counted independently against its own memo table; goals fan out over the
    /// rayon pool. A node equal to the goal counts as one walk outright - walks passing
    /// *through* a goal and returning to it are not distinguished.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CountOverflow`] as soon as any addition (including the cross-goal sum)
    /// exceeds `u64`.
    ///
    /// # Caller precondition
    ///
    /// Every walk from the start to a counted goal must be acyclic. This is not runtime-checked:
    /// a cycle on such a walk recurses without bound. Reachability of the goal is *not*
    /// required - an unreachable goal simply contributes zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathscope::{Edge, Graph};
    ///
    /// // Diamond: two routes from 0 to 3.
    /// let graph = Graph::with_edges(0, [
    ///     Edge::new(0, 1),
    ///     Edge::new(0, 2),
    ///     Edge::new(1, 3),
    ///     Edge::new(2, 3),
    /// ]);
    ///
    /// assert_eq!(graph.count_paths(|&n| n == 3)?, 2);
    /// # Ok::<(), pathscope::Error>(())
    /// ```
    pub fn count_paths<F>(&self, is_goal: F) -> Result<u64>
    where
        F: Fn(&N) -> bool + Sync,
    {
        let index = self.outgoing_index();
        let goals: Vec<N> = self.nodes().into_iter().filter(|n| is_goal(n)).collect();
        debug!(goals = goals.len(), edges = self.edge_count(), "counting paths");

        let per_goal: Vec<u64> = goals
            .par_iter()
            .map(|goal| {
                let mut memo = HashMap::new();
                count_walks(self.start(), goal, &index, &mut memo)
            })
            .collect::<Result<_>>()?;

        per_goal
            .into_iter()
            .try_fold(0u64, |total, count| {
                total.checked_add(count).ok_or(Error::CountOverflow)
            })
    }

    /// Counts the qualifying paths from the start to goal-satisfying nodes, where
    /// `accept_path` decides what qualifies: an exhaustive depth-first enumeration over the
    /// materialized edge list, reduced to its cardinality.
    ///
    /// Unlike [`Graph::count_paths`] this tolerates cyclic edge lists (the per-path cycle
    /// guard of the search applies), at the cost of enumerating rather than memo-counting.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Graph::generative_search`].
    pub fn count_paths_satisfying<Q, P>(&self, is_goal: Q, accept_path: P) -> Result<u64>
    where
        Q: Fn(&N) -> Result<bool> + Sync,
        P: Fn(&[Edge<N, L>]) -> Result<bool> + Sync,
    {
        let options = SearchOptions {
            exhaustive: true,
            workers: 0,
        };
        let paths = self.depth_first(&options, is_goal, accept_path)?;
        Ok(paths.len() as u64)
    }

    /// Enumerates every directed walk from the start node to `goal` as a full node sequence,
    /// start and goal included. The start node alone yields `[[start]]` when it equals the
    /// goal.
    ///
    /// Memoized per intermediate node, so shared suffixes are computed once and cloned.
    ///
    /// # Caller precondition
    ///
    /// Same as [`Graph::count_paths`]: walks from start to `goal` must be acyclic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathscope::{Edge, Graph};
    ///
    /// let graph = Graph::with_edges('a', [
    ///     Edge::new('a', 'b'),
    ///     Edge::new('a', 'c'),
    ///     Edge::new('b', 'd'),
    ///     Edge::new('c', 'd'),
    /// ]);
    ///
    /// let mut walks = graph.enumerate_paths(&'d');
    /// walks.sort();
    /// assert_eq!(walks, vec![vec!['a', 'b', 'd'], vec!['a', 'c', 'd']]);
    /// ```
    #[must_use]
    pub fn enumerate_paths(&self, goal: &N) -> Vec<Vec<N>> {
        let index = self.outgoing_index();
        let mut memo = HashMap::new();
        walks_between(self.start(), goal, &index, &mut memo)
    }
}

/// Memoized walk count from `node` to `goal`. The memo is per-goal; entries are total counts
/// for a node, filled bottom-up as the recursion unwinds.
fn count_walks<N, L>(
    node: &N,
    goal: &N,
    index: &HashMap<N, Vec<Edge<N, L>>>,
    memo: &mut HashMap<N, u64>,
) -> Result<u64>
where
    N: Clone + Eq + Hash,
{
    if node == goal {
        return Ok(1);
    }
    if let Some(&cached) = memo.get(node) {
        return Ok(cached);
    }

    let mut count = 0u64;
    if let Some(edges) = index.get(node) {
        for edge in edges {
            let below = count_walks(&edge.target, goal, index, memo)?;
            count = count.checked_add(below).ok_or(Error::CountOverflow)?;
        }
    }

    memo.insert(node.clone(), count);
    Ok(count)
}

/// Memoized walk enumeration from `node` to `goal`, each walk a node sequence including both
/// endpoints.
fn walks_between<N, L>(
    node: &N,
    goal: &N,
    index: &HashMap<N, Vec<Edge<N, L>>>,
    memo: &mut HashMap<N, Vec<Vec<N>>>,
) -> Vec<Vec<N>>
where
    N: Clone + Eq + Hash,
{
    if node == goal {
        return vec![vec![goal.clone()]];
    }
    if let Some(cached) = memo.get(node) {
        return cached.clone();
    }

    let mut walks = Vec::new();
    if let Some(edges) = index.get(node) {
        for edge in edges {
            for suffix in walks_between(&edge.target, goal, index, memo) {
                let mut walk = Vec::with_capacity(suffix.len() + 1);
                walk.push(node.clone());
                walk.extend(suffix);
                walks.push(walk);
            }
        }
    }

    memo.insert(node.clone(), walks.clone());
    walks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_route_dag() -> Graph<u32> {
        Graph::with_edges(
            0,
            [
                Edge::new(0, 1),
                Edge::new(0, 2),
                Edge::new(1, 3),
                Edge::new(2, 3),
            ],
        )
    }

    #[test]
    fn test_dag_two_routes() {
        assert_eq!(two_route_dag().count_paths(|&n| n == 3).unwrap(), 2);
    }

    #[test]
    fn test_count_matches_brute_force_enumeration() {
        let graph = two_route_dag();
        let counted = graph.count_paths(|&n| n == 3).unwrap();
        let enumerated = graph.enumerate_paths(&3);
        assert_eq!(counted, enumerated.len() as u64);
    }

    #[test]
    fn test_linear_chain_counts_one() {
        let graph = Graph::with_edges(0, [Edge::new(0, 1), Edge::new(1, 2)]);
        assert_eq!(graph.count_paths(|&n| n == 2).unwrap(), 1);
    }

    #[test]
    fn test_unreachable_goal_counts_zero() {
        let graph = Graph::with_edges(0, [Edge::new(0, 1), Edge::new(5, 6)]);
        assert_eq!(graph.count_paths(|&n| n == 6).unwrap(), 0);
    }

    #[test]
    fn test_no_matching_goal_counts_zero() {
        let graph = two_route_dag();
        assert_eq!(graph.count_paths(|&n| n == 99).unwrap(), 0);
    }

    #[test]
    fn test_multiple_goals_sum() {
        // Goals 1 and 3: one walk to 1, two walks to 3.
        let graph = two_route_dag();
        assert_eq!(graph.count_paths(|&n| n == 1 || n == 3).unwrap(), 3);
    }

    #[test]
    fn test_start_as_goal_counts_one() {
        let graph = two_route_dag();
        assert_eq!(graph.count_paths(|&n| n == 0).unwrap(), 1);
    }

    #[test]
    fn test_layered_doubling_counts() {
        // Each layer has two parallel edges, doubling the walk count: 2^10 total.
        let mut edges = Vec::new();
        for i in 0..10u64 {
            edges.push(Edge::labeled(i, i + 1, 'x'));
            edges.push(Edge::labeled(i, i + 1, 'y'));
        }
        let graph = Graph::with_edges(0, edges);
        assert_eq!(graph.count_paths(|&n| n == 10).unwrap(), 1u64 << 10);
    }

    #[test]
    fn test_overflow_fails_hard() {
        // 70 doubling layers exceed u64 (2^70); the checked addition must trip, not wrap.
        let mut edges = Vec::new();
        for i in 0..70u64 {
            edges.push(Edge::labeled(i, i + 1, 'x'));
            edges.push(Edge::labeled(i, i + 1, 'y'));
        }
        let graph = Graph::with_edges(0, edges);
        assert!(matches!(
            graph.count_paths(|&n| n == 70),
            Err(Error::CountOverflow)
        ));
    }

    #[test]
    fn test_enumerate_paths_diamond() {
        let graph = two_route_dag();
        let mut walks = graph.enumerate_paths(&3);
        walks.sort();
        assert_eq!(walks, vec![vec![0, 1, 3], vec![0, 2, 3]]);
    }

    #[test]
    fn test_enumerate_paths_start_is_goal() {
        let graph = two_route_dag();
        assert_eq!(graph.enumerate_paths(&0), vec![vec![0]]);
    }

    #[test]
    fn test_enumerate_paths_unreachable() {
        let graph = two_route_dag();
        assert!(graph.enumerate_paths(&42).is_empty());
    }

    #[test]
    fn test_count_paths_satisfying_with_filter() {
        // Three routes 0->3: two short, one long; only two-edge paths qualify.
        let graph = Graph::with_edges(
            0,
            [
                Edge::new(0, 1),
                Edge::new(0, 2),
                Edge::new(1, 3),
                Edge::new(2, 3),
                Edge::new(0, 4),
                Edge::new(4, 5),
                Edge::new(5, 3),
            ],
        );

        let all = graph
            .count_paths_satisfying(|&n| Ok(n == 3), |_| Ok(true))
            .unwrap();
        assert_eq!(all, 3);

        let short = graph
            .count_paths_satisfying(|&n| Ok(n == 3), |p: &[Edge<u32>]| Ok(p.len() == 2))
            .unwrap();
        assert_eq!(short, 2);
    }

    #[test]
    fn test_count_paths_satisfying_tolerates_cycles() {
        let graph = Graph::with_edges(
            0,
            [
                Edge::new(0, 1),
                Edge::new(1, 0),
                Edge::new(1, 2),
            ],
        );
        let count = graph
            .count_paths_satisfying(|&n| Ok(n == 2), |_| Ok(true))
            .unwrap();
        assert_eq!(count, 1);
    }
}
