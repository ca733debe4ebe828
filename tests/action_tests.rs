//! Action executor tests against real scan outcomes.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use dupescan::actions::{execute, ActionMode};
use dupescan::duplicates::{DuplicateFinder, FinderConfig, ScanOutcome};
use dupescan::scanner::WalkerConfig;

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

fn scan(dir: &TempDir) -> ScanOutcome {
    let config = FinderConfig {
        walker: WalkerConfig::new(0, None, "*").unwrap(),
        ..Default::default()
    };
    DuplicateFinder::new(config).scan(dir.path()).unwrap()
}

/// Apply an action to every duplicate of every bucket, the way the CLI does.
fn apply(outcome: &ScanOutcome, mode: ActionMode) {
    for bucket in &outcome.report {
        let canonical = bucket.canonical().path.clone();
        for dup in bucket.duplicates() {
            if let Err(e) = execute(mode, &canonical, &dup.path) {
                eprintln!("action failed: {e}");
            }
        }
    }
}

#[test]
fn delete_removes_duplicates_and_spares_canonical() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.bin", &[1u8; 512]);
    let b = write_file(dir.path(), "b.bin", &[1u8; 512]);
    let c = write_file(dir.path(), "c.bin", &[1u8; 512]);
    let other = write_file(dir.path(), "other.bin", &[2u8; 512]);

    let outcome = scan(&dir);
    apply(&outcome, ActionMode::Delete);

    // a.bin walks first: canonical survives, the two duplicates are gone.
    assert!(a.exists());
    assert!(!b.exists());
    assert!(!c.exists());
    // Distinct content of the same size is untouched.
    assert!(other.exists());
}

#[test]
#[cfg(unix)]
fn link_makes_duplicates_share_the_canonical_inode() {
    use std::os::unix::fs::MetadataExt;

    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.bin", &[1u8; 2048]);
    let b = write_file(dir.path(), "b.bin", &[1u8; 2048]);

    let outcome = scan(&dir);
    apply(&outcome, ActionMode::Link);

    let meta_a = fs::metadata(&a).unwrap();
    let meta_b = fs::metadata(&b).unwrap();
    assert_eq!(meta_a.ino(), meta_b.ino());
    assert_eq!(meta_a.nlink(), 2);
    // No temp files left behind.
    assert!(!dir.path().join("b.bin-linkTemp").exists());
}

#[test]
fn link_failure_leaves_duplicate_recoverable() {
    let dir = TempDir::new().unwrap();
    let duplicate = write_file(dir.path(), "dup.bin", b"original content");
    let vanished_canonical = dir.path().join("vanished.bin");

    let err = execute(ActionMode::Link, &vanished_canonical, &duplicate).unwrap_err();
    assert!(err.to_string().contains("failed to link"));

    // Rollback put the original name back with its content intact.
    assert!(duplicate.exists());
    assert_eq!(fs::read(&duplicate).unwrap(), b"original content");
}

#[test]
fn report_mode_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.bin", &[1u8; 256]);
    let b = write_file(dir.path(), "b.bin", &[1u8; 256]);

    let outcome = scan(&dir);
    apply(&outcome, ActionMode::Report);

    assert!(a.exists());
    assert!(b.exists());
    assert_eq!(outcome.summary.duplicate_files, 1);
}

#[test]
fn delete_failure_does_not_stop_remaining_duplicates() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.bin", &[1u8; 640]);
    let b = write_file(dir.path(), "b.bin", &[1u8; 640]);
    let c = write_file(dir.path(), "c.bin", &[1u8; 640]);

    let outcome = scan(&dir);

    // Make the first duplicate fail by removing it before the action runs.
    fs::remove_file(&b).unwrap();
    apply(&outcome, ActionMode::Delete);

    // The later duplicate was still processed.
    assert!(!c.exists());
}
