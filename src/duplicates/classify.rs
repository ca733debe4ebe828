//! Classification of fingerprinted buckets and run summary.
//!
//! # Overview
//!
//! For every size bucket with more than one entry, the classifier orders
//! entries by walk index, designates the first as canonical, and compares
//! each later entry's fingerprint against the canonical one: equal means
//! duplicate, unequal means distinct (reported, never dropped). This is a
//! single linear pass per bucket; transitive equality within a bucket is
//! assumed, which is sound for a cryptographic-strength digest.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use bytesize::ByteSize;

use super::registry::FingerprintedEntry;

/// Outcome of comparing one entry against its bucket's canonical entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// First entry of the bucket by walk order.
    Canonical,
    /// Fingerprint equals the canonical entry's fingerprint.
    Duplicate,
    /// Same size as the canonical entry but different fingerprint.
    Distinct,
}

/// An entry together with its classification.
#[derive(Debug, Clone)]
pub struct ClassifiedEntry {
    /// The fingerprinted entry
    pub entry: FingerprintedEntry,
    /// How it compares to the bucket's canonical entry
    pub verdict: Verdict,
}

/// Classified view of one multi-member size bucket.
#[derive(Debug, Clone)]
pub struct BucketReport {
    /// File size shared by every entry in the bucket
    pub size: u64,
    /// Entries in walk order; the first is always canonical
    pub entries: Vec<ClassifiedEntry>,
}

impl BucketReport {
    /// The canonical entry of this bucket.
    #[must_use]
    pub fn canonical(&self) -> &FingerprintedEntry {
        // classify() only emits buckets with at least two entries.
        &self.entries[0].entry
    }

    /// Entries classified as duplicates of the canonical entry.
    pub fn duplicates(&self) -> impl Iterator<Item = &FingerprintedEntry> {
        self.entries
            .iter()
            .filter(|c| c.verdict == Verdict::Duplicate)
            .map(|c| &c.entry)
    }
}

/// Running totals for a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Regular files visited by the walker
    pub files_seen: u64,
    /// Files that passed the walker's filters
    pub candidates: u64,
    /// Files in multi-member size buckets, minus one per bucket
    pub potential_duplicates: u64,
    /// Files actually opened and fingerprinted
    pub files_hashed: u64,
    /// Entries classified as duplicates
    pub duplicate_files: u64,
    /// Cumulative size of duplicates, excluding canonicals
    pub duplicate_bytes: u64,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

impl RunSummary {
    /// Duplicate bytes as a human-readable SI string, e.g. `1.2 MB`.
    #[must_use]
    pub fn duplicate_size_display(&self) -> String {
        ByteSize(self.duplicate_bytes).display().si().to_string()
    }
}

/// Classify every multi-member bucket against its canonical entry.
///
/// Buckets are emitted in ascending size order so the report is
/// deterministic regardless of hash-completion order. Returns the bucket
/// reports together with the duplicate count and cumulative duplicate
/// size.
#[must_use]
pub fn classify(buckets: HashMap<u64, Vec<FingerprintedEntry>>) -> (Vec<BucketReport>, u64, u64) {
    let ordered: BTreeMap<u64, Vec<FingerprintedEntry>> = buckets.into_iter().collect();

    let mut reports = Vec::new();
    let mut duplicate_files = 0u64;
    let mut duplicate_bytes = 0u64;

    for (size, mut entries) in ordered {
        if entries.len() < 2 {
            // A bucket can shrink to one entry when its sibling failed to
            // hash; nothing left to compare.
            continue;
        }

        // Registry insertion order reflects worker completion, not walk
        // order. The walk index is authoritative for canonical selection.
        entries.sort_by_key(|e| e.walk_index);

        let canonical_fingerprint = entries[0].fingerprint;
        let mut classified = Vec::with_capacity(entries.len());

        for (i, entry) in entries.into_iter().enumerate() {
            let verdict = if i == 0 {
                Verdict::Canonical
            } else if entry.fingerprint == canonical_fingerprint {
                duplicate_files += 1;
                duplicate_bytes += entry.size;
                Verdict::Duplicate
            } else {
                Verdict::Distinct
            };
            classified.push(ClassifiedEntry { entry, verdict });
        }

        reports.push(BucketReport {
            size,
            entries: classified,
        });
    }

    (reports, duplicate_files, duplicate_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(path: &str, size: u64, walk_index: u64, tag: u8) -> FingerprintedEntry {
        let mut fingerprint = [0u8; 32];
        fingerprint[0] = tag;
        FingerprintedEntry {
            path: PathBuf::from(path),
            size,
            walk_index,
            fingerprint,
        }
    }

    fn buckets(entries: Vec<FingerprintedEntry>) -> HashMap<u64, Vec<FingerprintedEntry>> {
        let mut map: HashMap<u64, Vec<FingerprintedEntry>> = HashMap::new();
        for e in entries {
            map.entry(e.size).or_default().push(e);
        }
        map
    }

    #[test]
    fn test_identical_bucket_one_canonical_rest_duplicates() {
        let input = buckets(vec![
            entry("/a", 1000, 0, 7),
            entry("/b", 1000, 1, 7),
            entry("/c", 1000, 2, 7),
        ]);

        let (reports, dup_files, dup_bytes) = classify(input);

        assert_eq!(reports.len(), 1);
        assert_eq!(dup_files, 2);
        assert_eq!(dup_bytes, 2000);
        assert_eq!(reports[0].entries[0].verdict, Verdict::Canonical);
        assert!(reports[0].entries[1..]
            .iter()
            .all(|c| c.verdict == Verdict::Duplicate));
    }

    #[test]
    fn test_distinct_content_reported_not_dropped() {
        let input = buckets(vec![entry("/a", 500, 0, 1), entry("/b", 500, 1, 2)]);

        let (reports, dup_files, dup_bytes) = classify(input);

        assert_eq!(dup_files, 0);
        assert_eq!(dup_bytes, 0);
        assert_eq!(reports[0].entries[1].verdict, Verdict::Distinct);
    }

    #[test]
    fn test_canonical_is_min_walk_index_not_insertion_order() {
        // Entries arrive in completion order: /late first.
        let input = buckets(vec![
            entry("/late", 800, 5, 9),
            entry("/first", 800, 1, 9),
            entry("/mid", 800, 3, 9),
        ]);

        let (reports, _, _) = classify(input);

        assert_eq!(reports[0].canonical().path, PathBuf::from("/first"));
        let order: Vec<u64> = reports[0].entries.iter().map(|c| c.entry.walk_index).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }

    #[test]
    fn test_buckets_never_compared_across_sizes() {
        // Same fingerprint, different sizes: no duplicates possible.
        let input = buckets(vec![entry("/a", 100, 0, 4), entry("/b", 200, 1, 4)]);

        let (reports, dup_files, _) = classify(input);

        assert!(reports.is_empty());
        assert_eq!(dup_files, 0);
    }

    #[test]
    fn test_shrunken_bucket_skipped() {
        let input = buckets(vec![entry("/alone", 300, 0, 1)]);
        let (reports, dup_files, _) = classify(input);
        assert!(reports.is_empty());
        assert_eq!(dup_files, 0);
    }

    #[test]
    fn test_report_ordered_by_size() {
        let input = buckets(vec![
            entry("/b1", 900, 0, 1),
            entry("/b2", 900, 1, 1),
            entry("/a1", 100, 2, 2),
            entry("/a2", 100, 3, 2),
        ]);

        let (reports, _, _) = classify(input);
        let sizes: Vec<u64> = reports.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![100, 900]);
    }

    #[test]
    fn test_duplicate_size_display_si_units() {
        let display = |duplicate_bytes: u64| {
            RunSummary {
                duplicate_bytes,
                ..Default::default()
            }
            .duplicate_size_display()
        };

        assert_eq!(display(0), "0 B");
        assert_eq!(display(999), "999 B");
        assert_eq!(display(1_200_000), "1.2 MB");
        assert_eq!(display(2_500_000_000), "2.5 GB");
    }
}
