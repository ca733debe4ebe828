//! BLAKE3 file fingerprinting with sample and full strategies.
//!
//! # Overview
//!
//! Two mutually exclusive fingerprinting strategies, chosen once per run:
//!
//! - [`HashMode::Sample`] (default): digest of the first 4096 bytes
//!   followed by the last 4096 bytes. Fast, but blind to changes strictly
//!   between the head and tail samples.
//! - [`HashMode::Full`]: streamed digest of the entire file content.
//!
//! Files no larger than twice the sample size are always hashed whole in
//! sample mode, because the head and tail reads would overlap. This keeps
//! the fingerprint a pure function of file content instead of depending
//! on incidental seek/EOF behavior.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::HashError;

/// A 32-byte BLAKE3 digest used as the content-equality proxy.
pub type Hash = [u8; 32];

/// Bytes sampled from each end of a file in sample mode.
pub const SAMPLE_SIZE: u64 = 4096;

/// Run-wide fingerprinting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashMode {
    /// Hash the first and last [`SAMPLE_SIZE`] bytes (default).
    #[default]
    Sample,
    /// Hash the entire file content, streamed.
    Full,
}

/// File fingerprinter.
///
/// Stateless apart from the configured mode; safe to share across
/// hashing workers.
#[derive(Debug, Clone, Copy)]
pub struct Hasher {
    mode: HashMode,
}

impl Hasher {
    /// Create a hasher with the given strategy.
    #[must_use]
    pub fn new(mode: HashMode) -> Self {
        Self { mode }
    }

    /// The configured strategy.
    #[must_use]
    pub fn mode(&self) -> HashMode {
        self.mode
    }

    /// Compute the fingerprint of a file.
    ///
    /// `size` is the file size recorded at walk time; in sample mode it
    /// decides whether the head and tail reads would overlap.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read. The
    /// caller is expected to log and skip, never abort the run.
    pub fn fingerprint(&self, path: &Path, size: u64) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;

        let hash = match self.mode {
            HashMode::Full => Self::full_digest(&mut file, path)?,
            HashMode::Sample => {
                if size <= 2 * SAMPLE_SIZE {
                    // Head and tail would overlap: hash the whole file.
                    Self::full_digest(&mut file, path)?
                } else {
                    Self::sample_digest(&mut file, path)?
                }
            }
        };

        Ok(hash)
    }

    /// Streamed digest of the whole file, never loading it into memory.
    fn full_digest(file: &mut File, path: &Path) -> Result<Hash, HashError> {
        let mut hasher = blake3::Hasher::new();
        std::io::copy(file, &mut hasher).map_err(|e| HashError::from_io(path, e))?;
        Ok(*hasher.finalize().as_bytes())
    }

    /// Digest of the first and last [`SAMPLE_SIZE`] bytes.
    ///
    /// Caller guarantees `size > 2 * SAMPLE_SIZE`, so the two reads are
    /// disjoint and both can be satisfied in full.
    fn sample_digest(file: &mut File, path: &Path) -> Result<Hash, HashError> {
        let mut hasher = blake3::Hasher::new();
        let mut buf = [0u8; SAMPLE_SIZE as usize];

        file.read_exact(&mut buf)
            .map_err(|e| HashError::from_io(path, e))?;
        hasher.update(&buf);

        file.seek(SeekFrom::End(-(SAMPLE_SIZE as i64)))
            .map_err(|e| HashError::from_io(path, e))?;
        file.read_exact(&mut buf)
            .map_err(|e| HashError::from_io(path, e))?;
        hasher.update(&buf);

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Render a hash as lowercase hex for display.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut s = String::with_capacity(64);
    for byte in hash {
        use std::fmt::Write;
        let _ = write!(s, "{byte:02x}");
    }
    s
}
