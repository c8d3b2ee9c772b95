//! Output module for persisting the normalized dataset
//!
//! This module handles:
//! - Creating the output directory
//! - Writing the CSV file
//! - Writing the JSON records file
//! - Recording size and SHA-256 of every file written
//!
//! The two writes are independent: if the JSON write fails the CSV file that
//! was already written stays in place.

mod csv_output;
mod json_output;
mod traits;

pub use csv_output::CsvOutput;
pub use json_output::JsonOutput;
pub use traits::{ArtifactWriter, DigestWriter, WrittenArtifact};

use crate::config::OutputConfig;
use crate::dataset::Dataset;
use crate::ScrapeError;
use std::path::{Path, PathBuf};

/// Paths the two artifacts are written to
pub fn artifact_paths(config: &OutputConfig) -> (PathBuf, PathBuf) {
    let directory = Path::new(&config.directory);
    (
        directory.join(&config.csv_file),
        directory.join(&config.json_file),
    )
}

/// Writes `dataset` as CSV and JSON under the configured directory
///
/// # Returns
///
/// * `Ok(Vec<WrittenArtifact>)` - CSV artifact first, then JSON
/// * `Err(ScrapeError)` - Directory creation or one of the writes failed
pub fn persist(dataset: &Dataset, config: &OutputConfig) -> Result<Vec<WrittenArtifact>, ScrapeError> {
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory)
        .map_err(|source| ScrapeError::CreateDir {
            path: directory.to_path_buf(),
            source,
        })
        .inspect_err(|e| tracing::error!("{}", e))?;

    let (csv_path, json_path) = artifact_paths(config);
    let writers: [(&dyn ArtifactWriter, PathBuf); 2] =
        [(&CsvOutput, csv_path), (&JsonOutput, json_path)];

    let mut written = Vec::with_capacity(writers.len());
    for (writer, path) in writers {
        let artifact = writer
            .write(dataset, &path)
            .inspect_err(|e| tracing::error!("{}", e))?;

        tracing::info!(
            "Wrote {} ({} rows, {} bytes, sha256 {})",
            artifact.path.display(),
            artifact.rows,
            artifact.bytes,
            artifact.sha256
        );
        written.push(artifact);
    }

    Ok(written)
}
