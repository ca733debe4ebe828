//! dupescan - duplicate file finder.
//!
//! Finds duplicate files beneath a directory tree by content, not name.
//! Candidates are bucketed by exact size, fingerprinted with BLAKE3 on a
//! worker pool, and classified against the first file in walk order;
//! duplicates are then reported, deleted, or replaced with hard links.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;

use crate::actions::{execute, ActionMode};
use crate::cli::Cli;
use crate::duplicates::{BucketReport, DuplicateFinder, FinderConfig, Verdict};
use crate::error::ExitCode;
use crate::progress::{Progress, ProgressCallback};
use crate::scanner::{hash_to_hex, HashMode, WalkerConfig};

/// Run a complete scan from parsed CLI arguments, reporting to stdout.
///
/// # Errors
///
/// See [`run_with_output`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdout = std::io::stdout();
    run_with_output(cli, &mut stdout.lock())
}

/// Run a complete scan from parsed CLI arguments.
///
/// Writes the report to `out`, applies the configured action to every
/// duplicate, and returns the process exit code. Per-file errors are
/// logged and never abort the run.
///
/// # Errors
///
/// Returns an error only for conditions that prevent the run from
/// completing at all: an invalid filename pattern, an unusable root
/// directory, or a failed write to `out`.
pub fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<ExitCode> {
    let show_stats = !cli.nostats;

    if show_stats {
        writeln!(out, "dupescan {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(
            out,
            "\nSearching duplicates in '{}' with name that matches '{}' and minimum size of '{}' bytes",
            cli.path.display(),
            cli.name,
            cli.min_size
        )?;
    }

    let walker = WalkerConfig::new(cli.min_size, cli.max_size, &cli.name)
        .with_context(|| format!("invalid filename pattern '{}'", cli.name))?;

    let mode = if cli.full {
        HashMode::Full
    } else {
        HashMode::Sample
    };
    let action = ActionMode::from_flags(cli.delete, cli.link);

    let progress: Option<Arc<dyn ProgressCallback>> = if show_stats {
        Some(Arc::new(Progress::new(false)))
    } else {
        None
    };

    let finder = DuplicateFinder::new(FinderConfig {
        walker,
        mode,
        single_thread: cli.single_thread,
        progress,
    });
    let outcome = finder.scan(&cli.path)?;
    let summary = &outcome.summary;

    if show_stats {
        writeln!(
            out,
            "\nFound {} files with {} potential duplicates in: {}",
            summary.files_seen,
            summary.potential_duplicates,
            cli.path.display()
        )?;
    }

    if summary.potential_duplicates == 0 {
        writeln!(out, "No duplicates found")?;
        return Ok(ExitCode::Success);
    }

    if show_stats {
        writeln!(out, "\nProcessing results:")?;
    }

    render_and_apply(out, &outcome.report, action)?;

    if summary.duplicate_files == 0 {
        writeln!(out, "No duplicates found")?;
        return Ok(ExitCode::Success);
    }

    writeln!(out, "---------")?;

    if show_stats {
        writeln!(
            out,
            "\n{} duplicates found with a total size of {} from {} files investigated in {:.2?}",
            summary.duplicate_files,
            summary.duplicate_size_display(),
            summary.files_hashed,
            summary.elapsed
        )?;
    }

    Ok(ExitCode::Success)
}

/// Write the per-bucket report lines and apply the action to duplicates.
///
/// Line format: `[size] [fingerprint] path`, suffixed with ` [DUP]` or
/// ` [NO-DUP]` for every non-canonical entry. Action failures are logged
/// and the remaining duplicates are still processed.
fn render_and_apply<W: Write>(
    out: &mut W,
    report: &[BucketReport],
    action: ActionMode,
) -> std::io::Result<()> {
    for bucket in report {
        writeln!(out, "---------")?;
        let canonical = bucket.canonical().path.clone();

        for classified in &bucket.entries {
            let entry = &classified.entry;
            let line = format!(
                "[{}] [{}] {}",
                entry.size,
                hash_to_hex(&entry.fingerprint),
                entry.path.display()
            );

            match classified.verdict {
                Verdict::Canonical => writeln!(out, "{line}")?,
                Verdict::Distinct => writeln!(out, "{line} [NO-DUP]")?,
                Verdict::Duplicate => {
                    writeln!(out, "{line} [DUP]")?;
                    if let Err(e) = execute(action, &canonical, &entry.path) {
                        log::error!("{e}");
                    }
                }
            }
        }
    }

    Ok(())
}
