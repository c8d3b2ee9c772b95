//! Pipeline coordinator - runs the scrape stages in order
//!
//! Fetch → locate table → normalize columns → validate → persist. The first
//! failing stage ends the run; nothing written by earlier runs is cleaned up.

use crate::config::Config;
use crate::dataset::{normalize, validate_row_count, Dataset};
use crate::extract::find_constituent_table;
use crate::output::{persist, WrittenArtifact};
use crate::source::{build_http_client, fetch_page};
use crate::ScrapeError;
use reqwest::blocking::Client;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of constituent rows written
    pub rows: usize,

    /// Column names after normalization
    pub columns: Vec<String>,

    /// Files written, CSV first
    pub artifacts: Vec<WrittenArtifact>,
}

/// Main pipeline structure
pub struct Pipeline {
    config: Config,
    client: Client,
}

impl Pipeline {
    /// Creates a pipeline, building the HTTP client from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Ready to run
    /// * `Err(ScrapeError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent, &config.source).inspect_err(report)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the full pipeline against the configured source URL
    pub fn run(&self) -> Result<RunSummary, ScrapeError> {
        tracing::info!("Starting scrape of {}", self.config.source.url);

        let html = fetch_page(&self.client, &self.config.source.url).inspect_err(report)?;
        self.process_page(&html)
    }

    /// Runs every stage after the fetch on already retrieved markup
    pub fn process_page(&self, html: &str) -> Result<RunSummary, ScrapeError> {
        let dataset = self.extract_dataset(html)?;
        let artifacts = persist(&dataset, &self.config.output).inspect_err(report)?;

        tracing::info!(
            "Scrape complete: {} rows written to {}",
            dataset.len(),
            artifacts
                .iter()
                .map(|a| a.path.display().to_string())
                .collect::<Vec<_>>()
                .join(" and ")
        );

        Ok(RunSummary {
            rows: dataset.len(),
            columns: dataset.columns().to_vec(),
            artifacts,
        })
    }

    /// Locates, normalizes and validates the constituent table without
    /// writing anything
    pub fn extract_dataset(&self, html: &str) -> Result<Dataset, ScrapeError> {
        let raw = find_constituent_table(html, &self.config.extract).inspect_err(report)?;
        let dataset = normalize(raw);
        validate_row_count(&dataset, self.config.validation.min_rows).inspect_err(report)?;
        Ok(dataset)
    }

    /// Fetches the page and extracts the validated dataset; used for dry runs
    pub fn fetch_dataset(&self) -> Result<Dataset, ScrapeError> {
        let html = fetch_page(&self.client, &self.config.source.url).inspect_err(report)?;
        self.extract_dataset(&html)
    }
}

fn report(error: &ScrapeError) {
    tracing::error!(stage = %error.stage(), "Pipeline aborted: {}", error);
}
