//! Concurrent dedup set with atomic insert-if-absent.

use std::hash::Hash;

use dashmap::DashSet;

/// A thread-safe set whose only mutation is an atomic insert-if-absent.
///
/// [`DedupSet::try_insert`] is linearizable: among N concurrent callers inserting the same key,
/// exactly one receives `true`. Callers use that boolean to decide whether *they* are responsible
/// for scheduling further work on the key, so the search engine expands each logical state at
/// most once. A double-`true` would cause duplicate (potentially explosive) exploration; a
/// missing `true` would silently drop a reachable state.
///
/// The surface is deliberately narrow: no removal, lookup or iteration, only insertion plus
/// read-only size accessors. The backing store is a sharded [`DashSet`], whose per-shard locking
/// provides the insert atomicity.
///
/// # Examples
///
/// ```rust
/// use pathscope::sync::DedupSet;
///
/// let visited = DedupSet::new();
/// assert!(visited.try_insert("state-a"));
/// assert!(!visited.try_insert("state-a"));
/// assert_eq!(visited.len(), 1);
/// ```
#[derive(Debug)]
pub struct DedupSet<K: Eq + Hash> {
    entries: DashSet<K>,
}

impl<K: Eq + Hash> DedupSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        DedupSet {
            entries: DashSet::new(),
        }
    }

    /// Inserts `key` if absent, returning `true` iff this call was the first to insert it.
    ///
    /// Safe and linearizable under concurrent callers: one winner, all other simultaneous
    /// identical-key callers observe `false`.
    pub fn try_insert(&self, key: K) -> bool {
        self.entries.insert(key)
    }

    /// Number of distinct keys inserted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash> Default for DedupSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_first_insert_wins() {
        let set = DedupSet::new();
        assert!(set.try_insert(42));
        assert!(!set.try_insert(42));
        assert!(!set.try_insert(42));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_distinct_keys_all_win() {
        let set = DedupSet::new();
        assert!(set.try_insert("a"));
        assert!(set.try_insert("b"));
        assert!(set.try_insert("c"));
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_empty() {
        let set: DedupSet<u32> = DedupSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_tuple_keys() {
        let set = DedupSet::new();
        assert!(set.try_insert((1, vec![1, 2, 3])));
        assert!(set.try_insert((1, vec![1, 2, 4])));
        assert!(!set.try_insert((1, vec![1, 2, 3])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_concurrent_single_winner() {
        let threads = 8;
        let set = Arc::new(DedupSet::new());
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let set = Arc::clone(&set);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    set.try_insert("contended-key")
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_concurrent_stress_many_keys() {
        let threads = 8;
        let keys = 500;
        let set = Arc::new(DedupSet::new());
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let set = Arc::clone(&set);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut wins = 0u32;
                    // Stagger the starting key per thread so contention patterns vary.
                    for i in 0..keys {
                        let key = (i + t * 7) % keys;
                        if set.try_insert(key) {
                            wins += 1;
                        }
                    }
                    wins
                })
            })
            .collect();

        let total_wins: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(total_wins as usize, keys);
        assert_eq!(set.len(), keys);
    }
}
