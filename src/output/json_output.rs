//! JSON records output: `[{"Company": "...", "Symbol": "..."}, ...]`

use crate::dataset::{Dataset, Record};
use crate::output::traits::{ArtifactWriter, DigestWriter, WrittenArtifact};
use crate::ScrapeError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes a compact array with one object per row, keys in column order
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn encode(dataset: &Dataset, path: &Path) -> Result<(u64, String), serde_json::Error> {
        let file = File::create(path).map_err(serde_json::Error::io)?;
        let mut writer = BufWriter::new(DigestWriter::new(file));

        let records: Vec<Record<'_>> = dataset.records().collect();
        serde_json::to_writer(&mut writer, &records)?;

        let digest = writer
            .into_inner()
            .map_err(|e| serde_json::Error::io(e.into_error()))?;
        digest.finish().map_err(serde_json::Error::io)
    }
}

impl ArtifactWriter for JsonOutput {
    fn format(&self) -> &'static str {
        "json"
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<WrittenArtifact, ScrapeError> {
        let (bytes, sha256) =
            Self::encode(dataset, path).map_err(|source| ScrapeError::WriteJson {
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
