use crate::config::types::{
    Config, ExtractConfig, LoggingConfig, OutputConfig, SourceConfig, UserAgentConfig,
    ValidationConfig,
};
use crate::ConfigError;
use url::Url;

/// Log levels accepted in `[logging] level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_extract_config(&config.extract)?;
    validate_validation_config(&config.validation)?;
    validate_output_config(&config.output)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid source url '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Source URL '{}' must use HTTP or HTTPS scheme",
            config.url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client_name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "client_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.client_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    if config.heading_keyword.trim().is_empty() {
        return Err(ConfigError::Validation(
            "heading_keyword cannot be empty".to_string(),
        ));
    }

    // Matched against single class tokens of the class attribute
    if config.table_class.is_empty() || config.table_class.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "table_class must be a single non-empty class name, got '{}'",
            config.table_class
        )));
    }

    Ok(())
}

fn validate_validation_config(config: &ValidationConfig) -> Result<(), ConfigError> {
    if config.min_rows < 1 {
        return Err(ConfigError::Validation(format!(
            "min_rows must be >= 1, got {}",
            config.min_rows
        )));
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    validate_file_name("csv_file", &config.csv_file)?;
    validate_file_name("json_file", &config.json_file)?;

    if config.csv_file == config.json_file {
        return Err(ConfigError::Validation(format!(
            "csv_file and json_file must differ, both are '{}'",
            config.csv_file
        )));
    }

    Ok(())
}

/// File names must be plain names inside the output directory
fn validate_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        )));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    let level = config.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::Validation(format!(
            "logging level must be one of {}, got '{}'",
            LOG_LEVELS.join(", "),
            config.level
        )));
    }
    Ok(())
}
