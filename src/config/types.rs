use serde::Deserialize;

/// Main configuration structure
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the defaults for scraping the Russell 1000 constituent list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub extract: ExtractConfig,
    pub validation: ValidationConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where the constituent page is fetched from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the index reference page
    pub url: String,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://en.wikipedia.org/wiki/Russell_1000_Index".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Client identification sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/index-constituents".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.client_name, self.client_version, self.contact_url
        )
    }
}

/// Table location heuristics
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Case-insensitive substring identifying the constituents heading
    #[serde(rename = "heading-keyword")]
    pub heading_keyword: String,

    /// CSS class carried by candidate tables
    #[serde(rename = "table-class")]
    pub table_class: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            heading_keyword: "component".to_string(),
            table_class: "wikitable".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum number of data rows for a plausible constituent list
    #[serde(rename = "min-rows")]
    pub min_rows: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { min_rows: 100 }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory both files are written to
    pub directory: String,

    /// File name of the CSV output
    #[serde(rename = "csv-file")]
    pub csv_file: String,

    /// File name of the JSON records output
    #[serde(rename = "json-file")]
    pub json_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
            csv_file: "russell1000_constituents.csv".to_string(),
            json_file: "russell1000_constituents.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity: trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
