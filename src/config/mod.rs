//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so the scraper also runs
//! without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use index_constituents::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Minimum rows: {}", config.validation.min_rows);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractConfig, LoggingConfig, OutputConfig, SourceConfig, UserAgentConfig,
    ValidationConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, LOG_LEVELS};
