//! Pipeline orchestrator: walk, bucket, hash, classify.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the complete detection pipeline:
//! 1. **Walk** - collect candidates into frozen size buckets
//! 2. **Hash** - fingerprint candidates from multi-member buckets on the
//!    worker pool, with the pool join as the phase barrier
//! 3. **Classify** - designate canonicals and duplicates per bucket
//!
//! Data flows strictly forward; no stage re-enters an earlier one.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let outcome = finder.scan(Path::new("/some/path")).unwrap();
//! println!(
//!     "{} duplicates, {} reclaimable",
//!     outcome.summary.duplicate_files,
//!     outcome.summary.duplicate_size_display()
//! );
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::progress::ProgressCallback;
use crate::scanner::{HashMode, Hasher, Walker, WalkerConfig};

use super::classify::{classify, BucketReport, RunSummary};
use super::pool::{hash_candidates, PoolConfig};

/// Configuration for a complete duplicate scan.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Walker filters (size bounds, filename pattern).
    pub walker: WalkerConfig,
    /// Fingerprinting strategy for the whole run.
    pub mode: HashMode,
    /// Force a single hashing worker.
    pub single_thread: bool,
    /// Optional progress callback shared by all phases.
    pub progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker", &self.walker)
            .field("mode", &self.mode)
            .field("single_thread", &self.single_thread)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Errors that abort a scan before it produces a report.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided root does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Result of a complete scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Classified multi-member buckets, ordered by size.
    pub report: Vec<BucketReport>,
    /// Running totals for the whole run.
    pub summary: RunSummary,
}

/// Duplicate finder orchestrating the detection pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline against a root directory.
    ///
    /// Per-file traversal and hashing errors are logged and skipped;
    /// only an unusable root aborts the scan.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root does not exist or is not a
    /// directory.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome, FinderError> {
        let start = Instant::now();

        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::info!("Starting duplicate scan of {}", root.display());

        let walker = Walker::new(root, self.config.walker.clone());
        let (buckets, walk_stats) = walker.collect(self.config.progress.as_deref());

        let potential_duplicates: u64 = buckets
            .values()
            .filter(|b| b.len() > 1)
            .map(|b| b.len() as u64 - 1)
            .sum();

        let mut summary = RunSummary {
            files_seen: walk_stats.files_seen,
            candidates: walk_stats.candidates,
            potential_duplicates,
            ..Default::default()
        };

        log::info!(
            "Walk complete: {} files, {} potential duplicates",
            summary.files_seen,
            summary.potential_duplicates
        );

        if potential_duplicates == 0 {
            summary.elapsed = start.elapsed();
            return Ok(ScanOutcome {
                report: Vec::new(),
                summary,
            });
        }

        let pool_config = PoolConfig {
            single_thread: self.config.single_thread,
            progress: self.config.progress.clone(),
        };
        let hasher = Hasher::new(self.config.mode);
        let (fingerprinted, hash_stats) = hash_candidates(buckets, hasher, &pool_config);
        summary.files_hashed = hash_stats.hashed as u64;

        let (report, duplicate_files, duplicate_bytes) = classify(fingerprinted);
        summary.duplicate_files = duplicate_files;
        summary.duplicate_bytes = duplicate_bytes;
        summary.elapsed = start.elapsed();

        log::info!(
            "Scan complete: {} duplicates, {} reclaimable, {} files hashed",
            summary.duplicate_files,
            summary.duplicate_size_display(),
            summary.files_hashed
        );

        Ok(ScanOutcome { report, summary })
    }
}
