//! Property-based tests for the fingerprinting strategies.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use dupescan::scanner::{Hash, HashMode, Hasher, SAMPLE_SIZE};

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

fn fingerprint(path: &Path, mode: HashMode) -> Hash {
    let size = std::fs::metadata(path).unwrap().len();
    Hasher::new(mode).fingerprint(path, size).unwrap()
}

const SAMPLE: usize = SAMPLE_SIZE as usize;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The sample fingerprint is a pure function of the first and last
    /// 4096 bytes: mutating any byte strictly between them changes
    /// nothing. This is the heuristic's documented blind spot.
    #[test]
    fn sample_fingerprint_ignores_middle(
        len in (2 * SAMPLE + 1)..(4 * SAMPLE),
        offset_frac in 0.0f64..1.0,
        new_byte in 1u8..=255,
    ) {
        let dir = TempDir::new().unwrap();
        let content = vec![0u8; len];
        let a = write_file(&dir, "a.bin", &content);

        // Pick a mutation offset strictly inside (SAMPLE, len - SAMPLE).
        let middle_len = len - 2 * SAMPLE;
        let offset = SAMPLE + (offset_frac * (middle_len - 1) as f64) as usize;
        let mut mutated = content;
        mutated[offset] = new_byte;
        let b = write_file(&dir, "b.bin", &mutated);

        prop_assert_eq!(
            fingerprint(&a, HashMode::Sample),
            fingerprint(&b, HashMode::Sample)
        );
        // The whole-file digest always differs.
        prop_assert_ne!(fingerprint(&a, HashMode::Full), fingerprint(&b, HashMode::Full));
    }

    /// Mutating a byte inside the head or tail sample always changes the
    /// sample fingerprint.
    #[test]
    fn sample_fingerprint_tracks_head_and_tail(
        len in (2 * SAMPLE + 1)..(4 * SAMPLE),
        head_offset in 0usize..SAMPLE,
        tail_back in 1usize..=SAMPLE,
        new_byte in 1u8..=255,
    ) {
        let dir = TempDir::new().unwrap();
        let content = vec![0u8; len];
        let base = write_file(&dir, "base.bin", &content);

        let mut head_mutated = content.clone();
        head_mutated[head_offset] = new_byte;
        let head = write_file(&dir, "head.bin", &head_mutated);

        let mut tail_mutated = content;
        tail_mutated[len - tail_back] = new_byte;
        let tail = write_file(&dir, "tail.bin", &tail_mutated);

        let reference = fingerprint(&base, HashMode::Sample);
        prop_assert_ne!(reference, fingerprint(&head, HashMode::Sample));
        prop_assert_ne!(reference, fingerprint(&tail, HashMode::Sample));
    }

    /// When a file is no larger than twice the sample size, sample mode
    /// hashes the whole file and agrees with full mode exactly.
    #[test]
    fn small_files_sample_equals_full(content in proptest::collection::vec(any::<u8>(), 1..=(2 * SAMPLE))) {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "small.bin", &content);

        prop_assert_eq!(
            fingerprint(&path, HashMode::Sample),
            fingerprint(&path, HashMode::Full)
        );
    }

    /// Full-mode fingerprints agree exactly when content agrees.
    #[test]
    fn full_fingerprint_matches_content_equality(
        content in proptest::collection::vec(any::<u8>(), 1..4096usize),
        flip in any::<usize>(),
    ) {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.bin", &content);
        let b = write_file(&dir, "b.bin", &content);

        prop_assert_eq!(fingerprint(&a, HashMode::Full), fingerprint(&b, HashMode::Full));

        let mut different = content.clone();
        let idx = flip % different.len();
        different[idx] = different[idx].wrapping_add(1);
        let c = write_file(&dir, "c.bin", &different);

        prop_assert_ne!(fingerprint(&a, HashMode::Full), fingerprint(&c, HashMode::Full));
    }
}
