#![forbid(unsafe_code)]

//! Memo of simulated insertions for one drag session.
//!
//! Every hover can re-simulate dozens of candidate insertions against the
//! same snapshot, and the pointer tends to sit still between frames. The
//! [`InsertionCache`] remembers each result keyed by
//! `(snapshot, node, depth, minimum_tree_index, expand_parent)` so the host's
//! simulator runs at most once per unique tuple.
//!
//! # Invalidation
//!
//! Entries are tagged with the snapshot they were computed against. Looking
//! up a key under a different [`SnapshotId`] drops everything first; the
//! session also [`clear`](InsertionCache::clear)s the memo when a drag ends.
//!
//! # Eviction
//!
//! The cache uses LFU (least frequently used) eviction when at capacity.

use std::collections::HashMap;

use treesnap_core::host::{InsertionError, SimulatedInsertion, SnapshotId};
use treesnap_core::tree::NodeKey;

/// Identity of one simulation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsertionKey {
    pub node: NodeKey,
    pub depth: usize,
    pub minimum_tree_index: usize,
    pub expand_parent: bool,
}

type SimulationResult<N> = Result<SimulatedInsertion<N>, InsertionError>;

#[derive(Debug, Clone)]
struct CacheEntry<N> {
    result: SimulationResult<N>,
    access_count: u32,
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Number of entries currently in the cache.
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Snapshot-scoped memo of insertion simulations.
#[derive(Debug, Clone)]
pub struct InsertionCache<N> {
    entries: HashMap<InsertionKey, CacheEntry<N>>,
    snapshot: Option<SnapshotId>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl<N: Clone> InsertionCache<N> {
    /// Create a cache holding at most `max_entries` results (at least one).
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: HashMap::with_capacity(max_entries.min(1024)),
            snapshot: None,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Get the memoized result for `key` under `snapshot`, or compute and
    /// remember it.
    pub fn get_or_compute<F>(
        &mut self,
        snapshot: SnapshotId,
        key: InsertionKey,
        compute: F,
    ) -> SimulationResult<N>
    where
        F: FnOnce() -> SimulationResult<N>,
    {
        if self.snapshot != Some(snapshot) {
            if self.snapshot.is_some() {
                treesnap_core::trace!(
                    previous = ?self.snapshot,
                    current = snapshot.0,
                    "snapshot changed, dropping insertion memo"
                );
            }
            self.entries.clear();
            self.snapshot = Some(snapshot);
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.result.clone();
        }

        self.misses += 1;
        let result = compute();
        if self.entries.len() >= self.max_entries {
            self.evict_lfu();
        }
        self.entries.insert(
            key,
            CacheEntry {
                result: result.clone(),
                access_count: 1,
            },
        );
        result
    }

    /// Drop every entry and forget the snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.snapshot = None;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Reset statistics counters to zero.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_lfu(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.access_count)
            .map(|(k, _)| *k)
        {
            self.entries.remove(&key);
        }
    }
}

impl<N: Clone> Default for InsertionCache<N> {
    fn default() -> Self {
        Self::new(256)
    }
}
