//! Parallel generative search over implicitly defined graphs.
//!
//! The engine explores a graph whose edges come from a caller-supplied generator rather than a
//! materialized edge list, looking for one (or all) paths from the start node to a node
//! satisfying a goal predicate, with a path predicate filtering candidate solutions. A
//! fixed-size worker pool drains the shared [`Frontier`]; the [`DedupSet`] guarantees each
//! logical state is scheduled at most once.
//!
//! Termination is discipline-specific:
//!
//! - **Breadth-first** runs in level-synchronized rounds: each round drains a frontier holding
//!   exactly one depth level, children collect in the next round's frontier, and the pool joins
//!   between rounds. Within a round an empty poll is conclusive (nobody pushes to the current
//!   frontier), and the join is the barrier that makes the first recorded hit provably a
//!   shortest one.
//! - **Depth-first** free-runs over a single shared frontier and tracks outstanding entries
//!   (queued plus in-flight) in a counter; a worker retires only on an empty poll with a zero
//!   counter, because an empty poll alone proves nothing while another worker is mid-expansion.

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::sync::{DedupSet, Discipline, Frontier};
use crate::{Edge, Error, Graph, Path, Result};

/// Emit a progress event every this many processed entries.
const PROGRESS_INTERVAL: u64 = 100_000;

/// Tuning knobs for one search invocation.
///
/// # Examples
///
/// ```rust
/// use pathscope::SearchOptions;
///
/// let all_paths = SearchOptions {
///     exhaustive: true,
///     ..SearchOptions::default()
/// };
/// assert_eq!(all_paths.workers, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Collect every qualifying path instead of stopping at the first hit. Exhaustive mode
    /// switches the visited key from the node alone to the (node, path) pair, so distinct
    /// routes to the same node are each expanded.
    pub exhaustive: bool,
    /// Worker threads for the dedicated pool. `0` means automatic: four times the available
    /// hardware parallelism, which keeps the pool busy when individual expansions have uneven
    /// cost.
    pub workers: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            exhaustive: false,
            workers: 0,
        }
    }
}

impl SearchOptions {
    fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                * 4
        }
    }
}

/// Dedup key of a scheduled state: the node alone normally, the (node, path) pair when the
/// search is exhaustive and must distinguish routes.
#[derive(Clone, PartialEq, Eq, Hash)]
enum VisitKey<N, L> {
    Node(N),
    Traversal(N, Path<N, L>),
}

/// One pending unit of work: a node together with the path that reached it.
struct SearchEntry<N, L> {
    node: N,
    path: Path<N, L>,
}

impl<N, L> Graph<N, L>
where
    N: Clone + Eq + Hash + Send + Sync,
    L: Clone + Eq + Hash + Send + Sync,
{
    /// Explores the implicitly generated graph in parallel, returning the qualifying paths
    /// from the start node to goal-satisfying nodes.
    ///
    /// `generate` produces the outgoing edges of a node on demand; it runs on worker threads
    /// and may record discovered nodes and edges into this graph through the shared reference
    /// it captures. `is_goal` decides whether a node terminates a path and `accept_path`
    /// additionally filters candidate solutions. Any callback returning an error aborts the
    /// whole search with that error and no partial output.
    ///
    /// Non-exhaustive mode returns at most one path and cancels the pool cooperatively once a
    /// hit is recorded; workers poll the stop signal between steps, so some extra expansion
    /// beyond the first hit is expected. Under [`Discipline::BreadthFirst`] the returned
    /// path's length is the true shortest length, and deterministically so. Exhaustive mode
    /// returns every qualifying path; whether exploration continues *through* a goal node is
    /// the generator's choice (return no edges for a goal node to stop there). An unreachable
    /// goal yields `Ok(vec![])`, not an error.
    ///
    /// An edge already present in the current path is silently skipped, so generators may
    /// produce cycles without causing non-termination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Callback`] when a callback fails, or [`Error::Pool`] when the worker
    /// pool cannot be built.
    ///
    /// # Examples
    ///
    /// Search a state space of numbers where the only operations are doubling and adding one:
    ///
    /// ```rust
    /// use pathscope::{Discipline, Edge, Graph, SearchOptions};
    ///
    /// let graph = Graph::new(1u32);
    /// let paths = graph.generative_search(
    ///     Discipline::BreadthFirst,
    ///     &SearchOptions::default(),
    ///     |&n| {
    ///         Ok(vec![Edge::new(n, n * 2), Edge::new(n, n + 1)]
    ///             .into_iter()
    ///             .filter(|e| e.target <= 12)
    ///             .collect())
    ///     },
    ///     |&n| Ok(n == 12),
    ///     |_| Ok(true),
    /// )?;
    ///
    /// // Shortest route: 1 -> 2 -> 3 -> 6 -> 12.
    /// assert_eq!(paths.len(), 1);
    /// assert_eq!(paths[0].len(), 4);
    /// # Ok::<(), pathscope::Error>(())
    /// ```
    pub fn generative_search<G, Q, P>(
        &self,
        discipline: Discipline,
        options: &SearchOptions,
        generate: G,
        is_goal: Q,
        accept_path: P,
    ) -> Result<Vec<Path<N, L>>>
    where
        G: Fn(&N) -> Result<Vec<Edge<N, L>>> + Sync,
        Q: Fn(&N) -> Result<bool> + Sync,
        P: Fn(&[Edge<N, L>]) -> Result<bool> + Sync,
    {
        let workers = options.worker_count();
        let exhaustive = options.exhaustive;
        debug!(?discipline, workers, exhaustive, "starting generative search");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let visited = DedupSet::new();
        let results: boxcar::Vec<Path<N, L>> = boxcar::Vec::new();
        let stop = AtomicBool::new(false);
        let mut first_error: OnceLock<Error> = OnceLock::new();
        let processed = AtomicU64::new(0);
        let found = AtomicU64::new(0);
        // Outstanding entries (queued plus in-flight), seeded with the start entry. Only the
        // depth-first loop maintains it; breadth-first rounds end at the per-level scope join.
        let track_outstanding = discipline == Discipline::DepthFirst;
        let outstanding = AtomicUsize::new(1);

        let record_error = |error: Error| {
            let _ = first_error.set(error);
            stop.store(true, Ordering::SeqCst);
        };

        let process = |entry: SearchEntry<N, L>, sink: &Frontier<SearchEntry<N, L>>| {
            let seen = processed.fetch_add(1, Ordering::Relaxed) + 1;
            if seen % PROGRESS_INTERVAL == 0 {
                debug!(
                    states = seen,
                    frontier = sink.len(),
                    paths = results.count(),
                    "search progress"
                );
            }
            trace!(depth = entry.path.len(), "expanding entry");

            match is_goal(&entry.node) {
                Ok(true) => match accept_path(&entry.path) {
                    Ok(true) => {
                        results.push(entry.path.clone());
                        let hits = found.fetch_add(1, Ordering::Relaxed) + 1;
                        if hits % PROGRESS_INTERVAL == 0 {
                            debug!(paths = hits, "qualifying paths so far");
                        }
                        trace!(length = entry.path.len(), "recorded qualifying path");
                        if !exhaustive {
                            stop.store(true, Ordering::SeqCst);
                            return;
                        }
                    }
                    Ok(false) => {}
                    Err(error) => {
                        record_error(error);
                        return;
                    }
                },
                Ok(false) => {}
                Err(error) => {
                    record_error(error);
                    return;
                }
            }

            // Goal entries that did not terminate the search keep expanding; in exhaustive
            // mode the generator decides whether exploration continues through a goal.
            let edges = match generate(&entry.node) {
                Ok(edges) => edges,
                Err(error) => {
                    record_error(error);
                    return;
                }
            };

            for edge in edges {
                if entry.path.contains(&edge) {
                    trace!("cycle detected, pruning edge");
                    continue;
                }

                let mut new_path = entry.path.clone();
                new_path.push(edge.clone());

                let key = if exhaustive {
                    VisitKey::Traversal(edge.target.clone(), new_path.clone())
                } else {
                    VisitKey::Node(edge.target.clone())
                };

                if visited.try_insert(key) {
                    if track_outstanding {
                        outstanding.fetch_add(1, Ordering::Release);
                    }
                    sink.push(SearchEntry {
                        node: edge.target,
                        path: new_path,
                    });
                } else {
                    trace!("state already scheduled, dropping candidate");
                }
            }
        };

        let seed_key = if exhaustive {
            VisitKey::Traversal(self.start.clone(), Vec::new())
        } else {
            VisitKey::Node(self.start.clone())
        };
        visited.try_insert(seed_key);
        let seed = SearchEntry {
            node: self.start.clone(),
            path: Vec::new(),
        };

        match discipline {
            Discipline::BreadthFirst => {
                let mut current = Frontier::new(Discipline::BreadthFirst);
                current.push(seed);

                while !current.is_empty() {
                    let next = Frontier::new(Discipline::BreadthFirst);
                    pool.scope(|scope| {
                        for _ in 0..workers {
                            scope.spawn(|_| loop {
                                if stop.load(Ordering::Relaxed) {
                                    break;
                                }
                                match current.try_pop() {
                                    Some(entry) => process(entry, &next),
                                    // Nobody pushes to the draining level, so empty is
                                    // conclusive here; the scope join is the level barrier.
                                    None => break,
                                }
                            });
                        }
                    });

                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    current = next;
                }
            }
            Discipline::DepthFirst => {
                let frontier = Frontier::new(Discipline::DepthFirst);
                frontier.push(seed);

                pool.scope(|scope| {
                    for _ in 0..workers {
                        scope.spawn(|_| loop {
                            if stop.load(Ordering::Relaxed) {
                                break;
                            }
                            match frontier.try_pop() {
                                Some(entry) => {
                                    process(entry, &frontier);
                                    outstanding.fetch_sub(1, Ordering::Release);
                                }
                                None => {
                                    if outstanding.load(Ordering::Acquire) == 0 {
                                        break;
                                    }
                                    std::thread::yield_now();
                                }
                            }
                        });
                    }
                });
            }
        }

        if let Some(error) = first_error.take() {
            return Err(error);
        }

        let mut paths: Vec<Path<N, L>> = results.into_iter().collect();
        if !exhaustive {
            paths.truncate(1);
        }
        debug!(
            states = processed.load(Ordering::Relaxed),
            paths = paths.len(),
            visited = visited.len(),
            "search complete"
        );
        Ok(paths)
    }

    /// Breadth-first search over the already-materialized edge list: [`Graph::generative_search`]
    /// fed by a generator that looks up a source-indexed adjacency snapshot built once.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Graph::generative_search`].
    pub fn breadth_first<Q, P>(
        &self,
        options: &SearchOptions,
        is_goal: Q,
        accept_path: P,
    ) -> Result<Vec<Path<N, L>>>
    where
        Q: Fn(&N) -> Result<bool> + Sync,
        P: Fn(&[Edge<N, L>]) -> Result<bool> + Sync,
    {
        self.static_search(Discipline::BreadthFirst, options, is_goal, accept_path)
    }

    /// Depth-first search over the already-materialized edge list.
    ///
    /// With several workers draining one shared frontier the exploration interleaves across
    /// branches; there is no single sequential depth-first order. That divergence from the
    /// textbook traversal is intentional.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Graph::generative_search`].
    pub fn depth_first<Q, P>(
        &self,
        options: &SearchOptions,
        is_goal: Q,
        accept_path: P,
    ) -> Result<Vec<Path<N, L>>>
    where
        Q: Fn(&N) -> Result<bool> + Sync,
        P: Fn(&[Edge<N, L>]) -> Result<bool> + Sync,
    {
        self.static_search(Discipline::DepthFirst, options, is_goal, accept_path)
    }

    fn static_search<Q, P>(
        &self,
        discipline: Discipline,
        options: &SearchOptions,
        is_goal: Q,
        accept_path: P,
    ) -> Result<Vec<Path<N, L>>>
    where
        Q: Fn(&N) -> Result<bool> + Sync,
        P: Fn(&[Edge<N, L>]) -> Result<bool> + Sync,
    {
        let index = self.outgoing_index();
        self.generative_search(
            discipline,
            options,
            move |node| Ok(index.get(node).cloned().unwrap_or_default()),
            is_goal,
            accept_path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<&'static str> {
        Graph::with_edges(
            "start",
            [
                Edge::new("start", "a"),
                Edge::new("start", "b"),
                Edge::new("a", "goal"),
                Edge::new("b", "goal"),
            ],
        )
    }

    fn small_options() -> SearchOptions {
        SearchOptions {
            exhaustive: false,
            workers: 4,
        }
    }

    #[test]
    fn test_diamond_exhaustive_finds_both_paths() {
        let graph = diamond();
        let options = SearchOptions {
            exhaustive: true,
            workers: 4,
        };

        let paths = graph
            .breadth_first(&options, |n| Ok(*n == "goal"), |_| Ok(true))
            .unwrap();

        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert_eq!(path.len(), 2);
            assert_eq!(path[0].source, "start");
            assert_eq!(path[1].target, "goal");
        }
    }

    #[test]
    fn test_diamond_non_exhaustive_returns_shortest() {
        let graph = diamond();
        let paths = graph
            .breadth_first(&small_options(), |n| Ok(*n == "goal"), |_| Ok(true))
            .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
    }

    #[test]
    fn test_shortcut_beats_long_route() {
        // Two routes to the goal: one edge direct, three edges around.
        let graph = Graph::with_edges(
            0,
            [
                Edge::new(0, 1),
                Edge::new(1, 2),
                Edge::new(2, 9),
                Edge::new(0, 9),
            ],
        );

        for _ in 0..10 {
            let paths = graph
                .breadth_first(&small_options(), |n| Ok(*n == 9), |_| Ok(true))
                .unwrap();
            assert_eq!(paths.len(), 1);
            assert_eq!(paths[0].len(), 1, "breadth-first must return the direct edge");
        }
    }

    #[test]
    fn test_unreachable_goal_is_empty_not_error() {
        let graph = Graph::with_edges(0, [Edge::new(0, 1), Edge::new(1, 2)]);
        for discipline in [Discipline::BreadthFirst, Discipline::DepthFirst] {
            let paths = graph
                .generative_search(
                    discipline,
                    &small_options(),
                    {
                        let index = graph.outgoing_index();
                        move |n: &u32| Ok(index.get(n).cloned().unwrap_or_default())
                    },
                    |n| Ok(*n == 42),
                    |_| Ok(true),
                )
                .unwrap();
            assert!(paths.is_empty());
        }
    }

    #[test]
    fn test_generated_cycle_terminates() {
        // The generator happily produces the edge back; the in-path guard prunes it.
        let graph = Graph::new(0u8);
        let paths = graph
            .generative_search(
                Discipline::BreadthFirst,
                &small_options(),
                |&n| match n {
                    0 => Ok(vec![Edge::new(0, 1)]),
                    1 => Ok(vec![Edge::new(1, 0)]),
                    _ => Ok(vec![]),
                },
                |&n| Ok(n == 9),
                |_| Ok(true),
            )
            .unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_generated_cycle_terminates_exhaustive() {
        let graph = Graph::new(0u8);
        let paths = graph
            .generative_search(
                Discipline::DepthFirst,
                &SearchOptions {
                    exhaustive: true,
                    workers: 4,
                },
                |&n| match n {
                    0 => Ok(vec![Edge::new(0, 1), Edge::new(0, 2)]),
                    1 => Ok(vec![Edge::new(1, 0)]),
                    _ => Ok(vec![]),
                },
                |&n| Ok(n == 2),
                |_| Ok(true),
            )
            .unwrap();

        // Reached directly and through the pruned loop: 0->2 and 0->1->0 is cut, so only
        // the direct path plus the one through the cycle's re-entry survive.
        assert_eq!(paths.len(), 2);
        let mut lengths: Vec<usize> = paths.iter().map(Vec::len).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 3]);
    }

    #[test]
    fn test_generator_error_aborts() {
        let graph = Graph::new(0u32);
        let result = graph.generative_search(
            Discipline::BreadthFirst,
            &small_options(),
            |&n| {
                if n >= 2 {
                    Err(Error::callback("generator blew up"))
                } else {
                    Ok(vec![Edge::new(n, n + 1)])
                }
            },
            |&n| Ok(n == 100),
            |_| Ok(true),
        );

        assert!(matches!(result, Err(Error::Callback(_))));
    }

    #[test]
    fn test_goal_predicate_error_aborts() {
        let graph = diamond();
        let result = graph.breadth_first(
            &small_options(),
            |_| Err(Error::callback("predicate failure")),
            |_| Ok(true),
        );
        assert!(matches!(result, Err(Error::Callback(_))));
    }

    #[test]
    fn test_path_predicate_error_aborts() {
        let graph = diamond();
        let result = graph.breadth_first(
            &small_options(),
            |n| Ok(*n == "goal"),
            |_| Err(Error::callback("path check failure")),
        );
        assert!(matches!(result, Err(Error::Callback(_))));
    }

    #[test]
    fn test_exhaustive_continues_through_goals() {
        // Both c1 and c2 satisfy the goal; paths through c1 must still reach c2.
        let graph = Graph::with_edges("s", [Edge::new("s", "c1"), Edge::new("c1", "c2")]);
        let paths = graph
            .depth_first(
                &SearchOptions {
                    exhaustive: true,
                    workers: 2,
                },
                |n| Ok(n.starts_with('c')),
                |_| Ok(true),
            )
            .unwrap();

        let mut lengths: Vec<usize> = paths.iter().map(Vec::len).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 2]);
    }

    #[test]
    fn test_rejected_goal_path_keeps_expanding() {
        // Both a and b are goals but only two-edge paths qualify.
        let graph = Graph::with_edges("s", [Edge::new("s", "a"), Edge::new("a", "b")]);
        let paths = graph
            .breadth_first(
                &small_options(),
                |n| Ok(*n == "a" || *n == "b"),
                |p: &[Edge<&str>]| Ok(p.len() == 2),
            )
            .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
        assert_eq!(paths[0][1].target, "b");
    }

    #[test]
    fn test_start_is_goal_yields_empty_path() {
        let graph: Graph<u8> = Graph::new(7);
        let paths = graph
            .breadth_first(&small_options(), |&n| Ok(n == 7), |_| Ok(true))
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_empty());
    }

    #[test]
    fn test_generator_records_into_graph() {
        let graph = Graph::new(0u32);
        let paths = graph
            .generative_search(
                Discipline::BreadthFirst,
                &small_options(),
                |&n| {
                    let edges: Vec<Edge<u32>> = if n < 3 {
                        vec![Edge::new(n, n + 1)]
                    } else {
                        vec![]
                    };
                    for e in &edges {
                        graph.add_edge(e.clone());
                    }
                    Ok(edges)
                },
                |&n| Ok(n == 3),
                |_| Ok(true),
            )
            .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 3);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_labeled_edges_carry_payload() {
        let graph = Graph::with_edges(
            0u8,
            [
                Edge::labeled(0, 1, "left"),
                Edge::labeled(1, 2, "right"),
            ],
        );
        let paths = graph
            .breadth_first(&small_options(), |&n| Ok(n == 2), |_| Ok(true))
            .unwrap();

        let labels: Vec<&str> = paths[0].iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["left", "right"]);
    }

    #[test]
    fn test_worker_count_auto() {
        let options = SearchOptions::default();
        assert!(options.worker_count() >= 4);

        let pinned = SearchOptions {
            exhaustive: false,
            workers: 3,
        };
        assert_eq!(pinned.worker_count(), 3);
    }

    #[test]
    fn test_single_worker_still_completes() {
        let graph = diamond();
        let paths = graph
            .breadth_first(
                &SearchOptions {
                    exhaustive: false,
                    workers: 1,
                },
                |n| Ok(*n == "goal"),
                |_| Ok(true),
            )
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
    }

    #[test]
    fn test_depth_first_deep_chain_terminates() {
        // Workers retire only when the outstanding count hits zero; if a queued entry
        // ever goes uncounted they quit with the tail of the chain still pending.
        let graph = Graph::new(0u32);
        let paths = graph
            .generative_search(
                Discipline::DepthFirst,
                &small_options(),
                |&n| {
                    if n < 3_000 {
                        Ok(vec![Edge::new(n, n + 1)])
                    } else {
                        Ok(vec![])
                    }
                },
                |&n| Ok(n == 3_000),
                |_| Ok(true),
            )
            .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 3_000);
    }
}
