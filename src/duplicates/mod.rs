//! Duplicate detection pipeline: registry, worker pool, classifier.
//!
//! The pipeline is strictly two-phase: every dispatched candidate is
//! fingerprinted and inserted into the [`DuplicateRegistry`] before the
//! classifier reads a single entry. Within a size bucket the first entry
//! by walk order is canonical; fingerprint-equal followers are duplicates
//! and the rest are reported as distinct.

pub mod classify;
pub mod finder;
pub mod pool;
pub mod registry;

pub use classify::{classify, BucketReport, ClassifiedEntry, RunSummary, Verdict};
pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanOutcome};
pub use pool::{hash_candidates, HashStats, PoolConfig};
pub use registry::{DuplicateRegistry, FingerprintedEntry};
