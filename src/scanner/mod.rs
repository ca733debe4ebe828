//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Deterministic directory walking (sorted entries, stable walk order)
//! - Content fingerprinting with BLAKE3 (sampled head+tail or whole-file)
//! - Size and filename filtering of candidates
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`hasher`]: BLAKE3 fingerprinting (sample and full strategies)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(1024, None, "*").unwrap();
//! let walker = Walker::new(Path::new("."), config);
//! let (buckets, stats) = walker.collect(None);
//! println!("visited {} files, {} size buckets", stats.files_seen, buckets.len());
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;
use std::time::SystemTime;

use regex::Regex;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, HashMode, Hasher, SAMPLE_SIZE};
pub use walker::{WalkStats, Walker};

/// A file that passed the walker's filters and is eligible for hashing.
///
/// `walk_index` is the position of this candidate in the deterministic
/// walk order. Canonical selection during classification uses this index,
/// never the order in which concurrent workers finish.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Walk-sequence number (0-based, candidates only)
    pub walk_index: u64,
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Exclusive lower bound on candidate size: a file qualifies only
    /// when `size > min_size`.
    pub min_size: u64,
    /// Inclusive upper bound on candidate size, if set.
    pub max_size: Option<u64>,
    /// Filename filter. `None` matches every filename (the `*` sentinel).
    pub name_filter: Option<Regex>,
}

impl WalkerConfig {
    /// Build a configuration from CLI-level values.
    ///
    /// The literal pattern `*` disables filename filtering entirely; any
    /// other pattern is compiled as a regular expression matched against
    /// the filename (not the full path).
    ///
    /// # Errors
    ///
    /// Returns the underlying [`regex::Error`] if the pattern is invalid.
    pub fn new(min_size: u64, max_size: Option<u64>, pattern: &str) -> Result<Self, regex::Error> {
        let name_filter = if pattern == "*" {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(Self {
            min_size,
            max_size,
            name_filter,
        })
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            min_size: 0,
            max_size: None,
            name_filter: None,
        }
    }
}

/// Errors that can occur during file fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error against the path it occurred on.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walker_config_default() {
        let config = WalkerConfig::default();

        assert_eq!(config.min_size, 0);
        assert!(config.max_size.is_none());
        assert!(config.name_filter.is_none());
    }

    #[test]
    fn test_walker_config_star_disables_filter() {
        let config = WalkerConfig::new(100, Some(1000), "*").unwrap();

        assert_eq!(config.min_size, 100);
        assert_eq!(config.max_size, Some(1000));
        assert!(config.name_filter.is_none());
    }

    #[test]
    fn test_walker_config_compiles_pattern() {
        let config = WalkerConfig::new(0, None, r"\.txt$").unwrap();
        let re = config.name_filter.unwrap();

        assert!(re.is_match("notes.txt"));
        assert!(!re.is_match("notes.rs"));
    }

    #[test]
    fn test_walker_config_invalid_pattern() {
        assert!(WalkerConfig::new(0, None, "[unclosed").is_err());
    }

    #[test]
    fn test_hash_error_from_io() {
        let err = HashError::from_io(
            std::path::Path::new("/missing"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HashError::NotFound(_)));

        let err = HashError::from_io(
            std::path::Path::new("/secret"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no"),
        );
        assert_eq!(err.to_string(), "Permission denied: /secret");
    }
}
