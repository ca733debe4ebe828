//! Command-line interface definitions.
//!
//! All flags are defined with the clap derive API. The historical flag
//! spellings are kept as aliases (`--size` for `--min-size`,
//! `singleThread` for `--single-thread`) so existing invocations keep
//! working.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates under ~/Downloads larger than 64 KB
//! dupescan ~/Downloads
//!
//! # Hash whole files and hard-link duplicates to the first copy
//! dupescan --full --link ~/archive
//!
//! # Only consider .iso files between 1 MB and 10 GB
//! dupescan --name '\.iso$' --min-size 1000000 --max-size 10000000000 /srv/images
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find duplicate files by content and report, delete, or hard-link them.
///
/// Files are grouped by exact size, then fingerprinted with BLAKE3
/// (head+tail sample by default, whole file with --full). Within each
/// group the first file in walk order is kept as the canonical copy.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Minimum size in bytes for a file (exclusive lower bound)
    #[arg(long = "min-size", visible_alias = "size", value_name = "BYTES", default_value_t = 65556)]
    pub min_size: u64,

    /// Maximum size in bytes for a file (inclusive upper bound)
    #[arg(long = "max-size", value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Filename pattern (regex); '*' disables filtering
    #[arg(long, value_name = "PATTERN", default_value = "*")]
    pub name: String,

    /// Suppress progress and summary output
    #[arg(long)]
    pub nostats: bool,

    /// Hash on exactly one worker instead of one per CPU
    #[arg(long = "single-thread", alias = "singleThread")]
    pub single_thread: bool,

    /// Delete duplicate files (takes precedence over --link)
    #[arg(long)]
    pub delete: bool,

    /// Replace duplicates with hard links to the canonical file
    #[arg(long)]
    pub link: bool,

    /// Hash the entire contents of suspected duplicates (slower)
    #[arg(long)]
    pub full: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
