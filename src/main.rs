//! Index-Constituents main entry point
//!
//! This is the command-line interface for the constituent scraper.

use anyhow::Context;
use clap::Parser;
use index_constituents::config::{load_config_with_hash, validate, Config};
use index_constituents::Pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Index-Constituents: a stock index constituent scraper
///
/// Fetches the index reference page, extracts the constituent table,
/// normalizes its columns and writes CSV and JSON files.
#[derive(Parser, Debug)]
#[command(name = "index-constituents")]
#[command(version)]
#[command(about = "Scrapes stock index constituents into CSV and JSON", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the source page URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Fetch, extract and validate without writing any files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };
    let config = apply_overrides(config, &cli)?;

    let subscriber = build_subscriber(&config, cli.verbose, cli.quiet);
    tracing::subscriber::with_default(subscriber, || {
        match (&cli.config, &config_hash) {
            (Some(path), Some(hash)) => tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            ),
            _ => tracing::info!("Using built-in configuration"),
        }

        let pipeline = Pipeline::new(config)?;
        if cli.dry_run {
            handle_dry_run(&pipeline)
        } else {
            handle_scrape(&pipeline)
        }
    })
}

/// Applies command-line overrides and re-validates the result
fn apply_overrides(mut config: Config, cli: &Cli) -> anyhow::Result<Config> {
    if let Some(url) = &cli.url {
        config.source.url = url.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Builds the log subscriber for this run
///
/// `RUST_LOG` wins when set; otherwise `-q`/`-v` adjust the configured level.
fn build_subscriber(
    config: &Config,
    verbose: u8,
    quiet: bool,
) -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if quiet {
            "error".to_string()
        } else {
            match verbose {
                0 => config.logging.level.to_ascii_lowercase(),
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            }
        };
        EnvFilter::new(format!("index_constituents={},warn", level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .finish()
}

/// Handles --dry-run: reports what would be written
fn handle_dry_run(pipeline: &Pipeline) -> anyhow::Result<()> {
    let dataset = pipeline.fetch_dataset()?;
    let (csv_path, json_path) =
        index_constituents::output::artifact_paths(&pipeline.config().output);

    println!("=== Index-Constituents Dry Run ===\n");
    println!("Source: {}", pipeline.config().source.url);
    println!("Rows: {}", dataset.len());
    println!("Columns: {}", dataset.columns().join(", "));
    println!("\nWould write:");
    println!("  {}", csv_path.display());
    println!("  {}", json_path.display());

    Ok(())
}

/// Handles the normal run
fn handle_scrape(pipeline: &Pipeline) -> anyhow::Result<()> {
    // Stage failures are already logged by the pipeline
    let summary = pipeline.run()?;
    for artifact in &summary.artifacts {
        println!("✓ {} ({} rows)", artifact.path.display(), artifact.rows);
    }
    Ok(())
}
