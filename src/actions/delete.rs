//! Duplicate deletion.
//!
//! Deletion is permanent: the canonical copy keeps the content, so the
//! duplicate is removed outright rather than moved aside. Failures are
//! reported to the caller, which logs and moves on to the next
//! duplicate; a failed delete is never fatal to the run.

use std::fs;
use std::path::Path;

use super::ActionError;

/// Remove a duplicate file.
///
/// # Errors
///
/// Returns [`ActionError::Delete`] if the filesystem refuses the
/// removal.
pub fn delete_file(path: &Path) -> Result<(), ActionError> {
    log::info!("Deleting {}", path.display());
    fs::remove_file(path).map_err(|source| ActionError::Delete {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_delete_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.txt");
        File::create(&path).unwrap().write_all(b"copy").unwrap();

        delete_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");

        let err = delete_file(&path).unwrap_err();
        assert!(matches!(err, ActionError::Delete { .. }));
    }
}
