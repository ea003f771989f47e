//! core::cache
//!
//! Per-role, per-directory memo of resolved sets.
//!
//! # Design
//!
//! One sharded [`DashMap`] per role, keyed by normalized directory. Each slot
//! holds an `Arc<UsernameSet>` that is fully built before it is inserted, so a
//! reader sees either no value or a complete one.
//!
//! The cache is never invalidated: it belongs to exactly one immutable
//! [`crate::core::index::OwnershipIndex`], and a reload builds a new index with
//! a new cache. Two threads missing on the same key may both compute; the first
//! insert wins and both callers get the stored value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use super::types::{Role, UsernameSet};

/// Memoized resolution results.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    slots: [DashMap<String, Arc<UsernameSet>>; 3],
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored result.
    pub fn get(&self, role: Role, dir: &str) -> Option<Arc<UsernameSet>> {
        self.slots[role.index()]
            .get(dir)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Store a result, keeping any value already present.
    ///
    /// Returns the value that ends up in the slot.
    pub fn store(&self, role: Role, dir: &str, set: UsernameSet) -> Arc<UsernameSet> {
        let entry = self.slots[role.index()]
            .entry(dir.to_string())
            .or_insert_with(|| Arc::new(set));
        Arc::clone(entry.value())
    }

    /// Return the stored result for `(role, dir)`, computing and storing it on a miss.
    ///
    /// `compute` runs without any cache lock held.
    pub fn get_or_compute<F>(&self, role: Role, dir: &str, compute: F) -> Arc<UsernameSet>
    where
        F: FnOnce() -> UsernameSet,
    {
        if let Some(hit) = self.get(role, dir) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(role = %role, dir, "resolution cache hit");
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(role = %role, dir, "resolution cache miss");
        self.store(role, dir, compute())
    }

    /// Number of stored results across all roles.
    pub fn len(&self) -> usize {
        self.slots.iter().map(DashMap::len).sum()
    }

    /// True if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(DashMap::is_empty)
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
