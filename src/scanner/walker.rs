//! Directory walker producing size-bucketed candidates.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting candidates for duplicate detection, grouped by
//! exact byte size. Entries are visited in sorted order so the walk
//! sequence (and therefore the canonical member of each duplicate group)
//! is identical from run to run.
//!
//! Traversal errors (permission denied, vanished entries) are logged and
//! skipped; they never abort the walk.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(65556, None, "*").unwrap();
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! let (buckets, stats) = walker.collect(None);
//! for (size, candidates) in &buckets {
//!     println!("{} bytes: {} files", size, candidates.len());
//! }
//! println!("{} files visited", stats.files_seen);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use super::{FileCandidate, WalkerConfig};
use crate::progress::ProgressCallback;

/// Counters maintained during a walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStats {
    /// Regular files visited, before any filtering
    pub files_seen: u64,
    /// Files that passed all filters and became candidates
    pub candidates: u64,
}

/// Directory walker for deterministic candidate discovery.
///
/// Wraps [`walkdir`] with sorted entries and applies the size and
/// filename filters from [`WalkerConfig`].
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Check if a file passes the size filters.
    ///
    /// The lower bound is exclusive (`size > min_size`), the upper bound
    /// inclusive (`size <= max_size`), matching the CLI contract.
    fn passes_size_filter(&self, size: u64) -> bool {
        if size <= self.config.min_size {
            return false;
        }
        if let Some(max) = self.config.max_size {
            if size > max {
                return false;
            }
        }
        true
    }

    /// Check if a filename passes the name filter.
    fn passes_name_filter(&self, path: &Path) -> bool {
        match &self.config.name_filter {
            None => true,
            Some(re) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                re.is_match(&filename)
            }
        }
    }

    /// Walk the tree and collect candidates into size buckets.
    ///
    /// Returns the buckets (ordered by size, candidates in walk order
    /// within each bucket) and the walk counters. Each candidate carries
    /// its walk-sequence index; classification later selects the
    /// minimum-index member of a bucket as canonical.
    ///
    /// Directories are descended into but never emitted. Traversal errors
    /// are logged at warn level and skipped.
    pub fn collect(
        &self,
        progress: Option<&dyn ProgressCallback>,
    ) -> (BTreeMap<u64, Vec<FileCandidate>>, WalkStats) {
        let mut buckets: BTreeMap<u64, Vec<FileCandidate>> = BTreeMap::new();
        let mut stats = WalkStats::default();
        let mut walk_index: u64 = 0;

        if let Some(p) = progress {
            p.on_phase_start("walking", 0);
        }

        let walk_dir = WalkDir::new(&self.root).sort_by_file_name();

        for entry_result in walk_dir {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    // Permission denied, vanished entry, symlink loop:
                    // skip and keep walking.
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    log::warn!("Walker error for {}: {}", path.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            stats.files_seen += 1;

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("Failed to stat {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            let size = metadata.len();
            if !self.passes_size_filter(size) {
                log::trace!(
                    "Skipping file due to size filter ({}): {}",
                    size,
                    entry.path().display()
                );
                continue;
            }

            if !self.passes_name_filter(entry.path()) {
                log::trace!("Skipping file due to name filter: {}", entry.path().display());
                continue;
            }

            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

            let candidate = FileCandidate {
                path: entry.path().to_path_buf(),
                size,
                modified,
                walk_index,
            };
            walk_index += 1;
            stats.candidates += 1;

            if let Some(p) = progress {
                p.on_progress(&candidate.path.to_string_lossy());
            }

            buckets.entry(size).or_default().push(candidate);
        }

        if let Some(p) = progress {
            p.on_phase_end("walking");
        }

        log::debug!(
            "Walk complete: {} files seen, {} candidates in {} size buckets",
            stats.files_seen,
            stats.candidates,
            buckets.len()
        );

        (buckets, stats)
    }
}
