//! Artifact writer trait and associated types
//!
//! Each output format implements [`ArtifactWriter`]; the persister drives the
//! writers in turn and records what each one produced.

use crate::dataset::Dataset;
use crate::ScrapeError;
use sha2::{Digest, Sha256};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file produced from a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    /// Short format name ("csv", "json")
    pub format: &'static str,

    /// Where the file was written
    pub path: PathBuf,

    /// Number of data rows encoded
    pub rows: usize,

    /// Size of the file in bytes
    pub bytes: u64,

    /// Hex-encoded SHA-256 of the file content
    pub sha256: String,
}

/// Trait for dataset serializers
///
/// Implementations overwrite any existing file at `path`.
pub trait ArtifactWriter {
    /// Short format name used in logs
    fn format(&self) -> &'static str;

    /// Encodes `dataset` into the file at `path`
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<WrittenArtifact, ScrapeError>;
}

/// Write adapter that hashes and counts every byte passed through
pub struct DigestWriter<W> {
    inner: W,
    hasher: Sha256,
    bytes: u64,
}

impl<W: Write> DigestWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes: 0,
        }
    }

    /// Flushes the inner writer and returns (byte count, hex digest)
    pub fn finish(mut self) -> io::Result<(u64, String)> {
        self.inner.flush()?;
        Ok((self.bytes, hex::encode(self.hasher.finalize())))
    }
}

impl<W: Write> Write for DigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
