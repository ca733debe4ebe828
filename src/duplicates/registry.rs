//! Thread-safe aggregation of fingerprinted entries, keyed by size.
//!
//! # Overview
//!
//! The [`DuplicateRegistry`] is the only mutable structure shared by the
//! hashing workers. All access is serialized by one `RwLock` over the
//! whole map; coarse granularity is acceptable because worker time is
//! dominated by file I/O, not lock hold time.
//!
//! Entries for a given size arrive only from workers hashing candidates
//! of that exact size; the registry never merges across sizes. Insertion
//! order under concurrency is not meaningful -- each entry carries its
//! walk index, and the classifier orders by that.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::scanner::Hash;

/// A candidate with its computed fingerprint.
///
/// Owned exclusively by the registry once inserted.
#[derive(Debug, Clone)]
pub struct FingerprintedEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Walk-sequence index carried over from the candidate
    pub walk_index: u64,
    /// Content fingerprint (sample or full, per the run-wide mode)
    pub fingerprint: Hash,
}

/// Concurrency-safe registry of size -> fingerprinted entries.
#[derive(Debug, Default)]
pub struct DuplicateRegistry {
    inner: RwLock<HashMap<u64, Vec<FingerprintedEntry>>>,
}

impl DuplicateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its size, taking the write lock.
    pub fn insert(&self, entry: FingerprintedEntry) {
        let mut map = self.inner.write().expect("registry lock poisoned");
        map.entry(entry.size).or_default().push(entry);
    }

    /// Total number of entries across all sizes.
    #[must_use]
    pub fn len(&self) -> usize {
        let map = self.inner.read().expect("registry lock poisoned");
        map.values().map(Vec::len).sum()
    }

    /// Check whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the registry and return the size buckets.
    ///
    /// Called after the hashing phase barrier, when no worker can still
    /// hold a reference.
    #[must_use]
    pub fn into_buckets(self) -> HashMap<u64, Vec<FingerprintedEntry>> {
        self.inner
            .into_inner()
            .expect("registry lock poisoned")
    }
}
