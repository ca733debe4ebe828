//! Rollback-safe hard-linking of duplicates to the canonical file.
//!
//! # Protocol
//!
//! 1. Rename the duplicate to `<path>-linkTemp`.
//! 2. Create a hard link at the original path pointing at the canonical
//!    file.
//! 3. On link success, remove the temp file. On link failure, rename the
//!    temp file back to the original name (best effort, logged if it
//!    also fails).
//!
//! A crash or failure mid-operation never leaves the duplicate missing
//! outright: worst case the content survives under the temp name.

use std::fs;
use std::path::{Path, PathBuf};

use super::ActionError;

/// Suffix appended to the duplicate's path while the link is created.
const LINK_TEMP_SUFFIX: &str = "-linkTemp";

/// Path the duplicate is parked at during the link operation.
fn temp_path(duplicate: &Path) -> PathBuf {
    let mut os = duplicate.as_os_str().to_os_string();
    os.push(LINK_TEMP_SUFFIX);
    PathBuf::from(os)
}

/// Replace `duplicate` with a hard link to `canonical`.
///
/// # Errors
///
/// - [`ActionError::RenameAside`] if the duplicate cannot be moved to
///   its temp name; the filesystem is untouched.
/// - [`ActionError::Link`] if creating the link fails; the original name
///   is restored best-effort before the error is returned.
pub fn link_duplicate(canonical: &Path, duplicate: &Path) -> Result<(), ActionError> {
    log::info!(
        "Linking {} to {}",
        duplicate.display(),
        canonical.display()
    );

    let parked = temp_path(duplicate);

    fs::rename(duplicate, &parked).map_err(|source| ActionError::RenameAside {
        path: duplicate.to_path_buf(),
        source,
    })?;

    if let Err(source) = fs::hard_link(canonical, duplicate) {
        // Best-effort rollback: put the original name back.
        if let Err(revert) = fs::rename(&parked, duplicate) {
            log::error!(
                "Failed to restore {} from {}: {}",
                duplicate.display(),
                parked.display(),
                revert
            );
        }
        return Err(ActionError::Link {
            path: duplicate.to_path_buf(),
            canonical: canonical.to_path_buf(),
            source,
        });
    }

    if let Err(e) = fs::remove_file(&parked) {
        // The link is in place; a leftover temp file is only clutter.
        log::warn!("Failed to remove temp file {}: {}", parked.display(), e);
    }

    Ok(())
}
