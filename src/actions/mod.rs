//! Action executor for classified duplicates.
//!
//! Exactly one action applies per run:
//! - **Report** (default): the duplicate line is the whole effect.
//! - **Delete**: remove the duplicate's file.
//! - **Hard-link**: replace the duplicate with a hard link to the
//!   canonical file, using a rename/link/cleanup protocol that never
//!   leaves the duplicate missing outright.
//!
//! Delete and hard-link are mutually exclusive; when both flags are
//! given, delete wins (documented choice). Action failures are logged
//! per file and the run continues to the remaining duplicates.

pub mod delete;
pub mod link;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use delete::delete_file;
pub use link::link_duplicate;

/// The effect applied to each confirmed duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionMode {
    /// Report only (default).
    #[default]
    Report,
    /// Delete the duplicate file.
    Delete,
    /// Replace the duplicate with a hard link to the canonical file.
    Link,
}

impl ActionMode {
    /// Resolve the CLI flags into a single mode. Delete takes precedence
    /// when both destructive flags are set.
    #[must_use]
    pub fn from_flags(delete: bool, link: bool) -> Self {
        match (delete, link) {
            (true, true) => {
                log::warn!("--delete and --link both given; --delete takes precedence");
                Self::Delete
            }
            (true, false) => Self::Delete,
            (false, true) => Self::Link,
            (false, false) => Self::Report,
        }
    }
}

/// Errors from destructive actions.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Deleting the duplicate failed.
    #[error("failed to delete {path}: {source}")]
    Delete {
        /// The duplicate that could not be removed
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Renaming the duplicate aside before linking failed; nothing was
    /// changed on disk.
    #[error("failed to rename {path} before linking: {source}")]
    RenameAside {
        /// The duplicate that could not be renamed
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the hard link failed. The original name was restored if
    /// possible; otherwise the content survives under the temp name.
    #[error("failed to link {path} to {canonical}: {source}")]
    Link {
        /// The duplicate path being replaced
        path: PathBuf,
        /// The canonical file the link should point at
        canonical: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Apply the configured action to one duplicate.
///
/// `Report` is a no-op here because the report line has already been
/// emitted by the caller.
///
/// # Errors
///
/// Propagates [`ActionError`] from the delete or link executors; the
/// caller logs and continues.
pub fn execute(mode: ActionMode, canonical: &Path, duplicate: &Path) -> Result<(), ActionError> {
    match mode {
        ActionMode::Report => Ok(()),
        ActionMode::Delete => delete_file(duplicate),
        ActionMode::Link => link_duplicate(canonical, duplicate),
    }
}
