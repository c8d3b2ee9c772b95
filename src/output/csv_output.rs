//! Comma-separated output

use crate::dataset::Dataset;
use crate::output::traits::{ArtifactWriter, DigestWriter, WrittenArtifact};
use crate::ScrapeError;
use std::fs::File;
use std::path::Path;

/// Writes a header line followed by one line per row, no index column
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOutput;

impl CsvOutput {
    fn encode(dataset: &Dataset, path: &Path) -> Result<(u64, String), csv::Error> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(DigestWriter::new(file));

        writer.write_record(dataset.columns())?;
        for row in dataset.rows() {
            writer.write_record(row)?;
        }

        let digest = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(digest.finish()?)
    }
}

impl ArtifactWriter for CsvOutput {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<WrittenArtifact, ScrapeError> {
        let (bytes, sha256) = Self::encode(dataset, path).map_err(|source| ScrapeError::WriteCsv {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(WrittenArtifact {
            format: self.format(),
            path: path.to_path_buf(),
            rows: dataset.len(),
            bytes,
            sha256,
        })
    }
}
