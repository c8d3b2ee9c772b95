//! Index-Constituents: a stock index constituent scraper
//!
//! This crate fetches a reference page listing the member companies of a stock
//! index, extracts the constituent table, normalizes its column names, checks
//! that the table is plausibly complete and writes it out as CSV and JSON.

pub mod config;
pub mod dataset;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod source;

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("No suitable table found")]
    NoSuitableTable,

    #[error("Row count too low: found {count} rows, expected at least {minimum} (suspiciously low)")]
    RowCountTooLow { count: usize, minimum: usize },

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV file {}: {source}", path.display())]
    WriteCsv { path: PathBuf, source: csv::Error },

    #[error("Failed to write JSON file {}: {source}", path.display())]
    WriteJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Fetch,
    Extract,
    Validate,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
            Stage::Validate => "validate",
            Stage::Persist => "persist",
        };
        f.write_str(name)
    }
}

impl ScrapeError {
    /// Returns the pipeline stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            ScrapeError::Config(_) => Stage::Config,
            ScrapeError::Http { .. }
            | ScrapeError::HttpStatus { .. }
            | ScrapeError::Timeout { .. }
            | ScrapeError::HttpClient(_) => Stage::Fetch,
            ScrapeError::NoSuitableTable => Stage::Extract,
            ScrapeError::RowCountTooLow { .. } => Stage::Validate,
            ScrapeError::CreateDir { .. }
            | ScrapeError::WriteCsv { .. }
            | ScrapeError::WriteJson { .. } => Stage::Persist,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use dataset::{Dataset, RawTable};
pub use pipeline::{Pipeline, RunSummary};
