//! Hash worker pool over multi-member size buckets.
//!
//! # Overview
//!
//! Only candidates from size buckets with two or more members are
//! dispatched: singleton buckets cannot contain duplicates and skipping
//! them is part of the contract, not an incidental optimization.
//!
//! Workers share one rayon pool sized either to a single thread
//! (sequential mode) or to one thread per logical CPU. The parallel
//! iterator inside [`rayon::ThreadPool::install`] is the phase barrier:
//! it returns only when every dispatched candidate has been fingerprinted
//! or its error recorded, so the classifier never observes a partially
//! hashed bucket.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::progress::ProgressCallback;
use crate::scanner::{FileCandidate, HashError, Hasher};

use super::registry::{DuplicateRegistry, FingerprintedEntry};

/// Configuration for the hashing phase.
#[derive(Clone, Default)]
pub struct PoolConfig {
    /// Force exactly one worker.
    pub single_thread: bool,
    /// Optional progress callback, ticked once per hashed candidate.
    pub progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("single_thread", &self.single_thread)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Statistics from the hashing phase.
#[derive(Debug, Default)]
pub struct HashStats {
    /// Candidates dispatched to the pool
    pub dispatched: usize,
    /// Candidates successfully fingerprinted
    pub hashed: usize,
    /// Candidates that failed to open or read
    pub failed: usize,
    /// Errors encountered while hashing
    pub errors: Vec<HashError>,
}

/// Fingerprint every candidate in a multi-member size bucket.
///
/// Consumes the frozen size buckets from the walk phase, dispatches the
/// qualifying candidates in walk order, and returns the populated
/// registry buckets together with hashing statistics. Open and read
/// failures are logged and recorded; the failed candidate is simply
/// excluded from its bucket and the run continues.
#[must_use]
pub fn hash_candidates(
    buckets: BTreeMap<u64, Vec<FileCandidate>>,
    hasher: Hasher,
    config: &PoolConfig,
) -> (HashMap<u64, Vec<FingerprintedEntry>>, HashStats) {
    // Dispatch list preserves walk order: bucket by ascending size,
    // candidates within a bucket in walk order.
    let dispatch: Vec<FileCandidate> = buckets
        .into_values()
        .filter(|bucket| bucket.len() > 1)
        .flatten()
        .collect();

    let mut stats = HashStats {
        dispatched: dispatch.len(),
        ..Default::default()
    };

    if dispatch.is_empty() {
        log::debug!("Hashing phase: no multi-member buckets to process");
        return (HashMap::new(), stats);
    }

    if let Some(ref p) = config.progress {
        p.on_phase_start("hashing", dispatch.len() as u64);
    }

    let num_threads = if config.single_thread {
        log::info!("Hashing {} candidates on a single worker", dispatch.len());
        1
    } else {
        log::info!("Hashing {} candidates", dispatch.len());
        // 0 lets rayon size the pool to the logical CPU count.
        0
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to create thread pool ({e}), using global pool");
            rayon::ThreadPoolBuilder::new().build().expect("rayon pool")
        });

    let registry = DuplicateRegistry::new();

    // The collect below is the synchronization barrier: install returns
    // only once every dispatched candidate is accounted for.
    let errors: Vec<HashError> = pool.install(|| {
        dispatch
            .into_par_iter()
            .filter_map(|candidate| {
                let result = hasher.fingerprint(&candidate.path, candidate.size);

                if let Some(ref p) = config.progress {
                    p.on_progress(&candidate.path.to_string_lossy());
                }

                match result {
                    Ok(fingerprint) => {
                        registry.insert(FingerprintedEntry {
                            path: candidate.path,
                            size: candidate.size,
                            walk_index: candidate.walk_index,
                            fingerprint,
                        });
                        None
                    }
                    Err(e) => {
                        log::warn!("Failed to hash {}: {}", candidate.path.display(), e);
                        Some(e)
                    }
                }
            })
            .collect()
    });

    if let Some(ref p) = config.progress {
        p.on_phase_end("hashing");
    }

    stats.failed = errors.len();
    stats.hashed = stats.dispatched - stats.failed;
    stats.errors = errors;

    log::debug!(
        "Hashing phase complete: {} hashed, {} failed",
        stats.hashed,
        stats.failed
    );

    (registry.into_buckets(), stats)
}
