//! HTTP fetcher implementation
//!
//! This module handles the single outbound request of a run:
//! - Building the HTTP client with the identifying user agent and timeout
//! - Sending one GET request for the index page
//! - Classifying failures (status, timeout, connection) into typed errors
//!
//! No retry is attempted: a failed fetch ends the run.

use crate::config::{SourceConfig, UserAgentConfig};
use crate::ScrapeError;
use reqwest::blocking::Client;
use std::time::Duration;

/// Builds a blocking HTTP client with the configured user agent and timeout
///
/// # Example
///
/// ```no_run
/// use index_constituents::config::{SourceConfig, UserAgentConfig};
/// use index_constituents::source::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &SourceConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    source: &SourceConfig,
) -> Result<Client, ScrapeError> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(source.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(ScrapeError::HttpClient)
}

/// Fetches the page at `url` and returns its body as text
///
/// # Error mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Non-2xx status | `HttpStatus` |
/// | Timeout (connect or read) | `Timeout` |
/// | Connection refused, DNS, TLS, body decode | `Http` |
///
/// Every failure is logged at ERROR before it is returned.
pub fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    tracing::info!("Fetching {}", url);

    let response = client
        .get(url)
        .send()
        .map_err(|e| classify_error(url, e))
        .inspect_err(|e| tracing::error!("Request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        let err = ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        };
        tracing::error!("{}", err);
        return Err(err);
    }

    let body = response
        .text()
        .map_err(|e| classify_error(url, e))
        .inspect_err(|e| tracing::error!("Failed to read response body: {}", e))?;

    tracing::info!("Fetched {} bytes (status {})", body.len(), status.as_u16());
    Ok(body)
}

fn classify_error(url: &str, error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
