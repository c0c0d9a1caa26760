//! autoprecio main entry point
//!
//! This is the command-line interface for the vehicle price survey. It
//! validates the request, runs one search, and writes the JSON payload.

use anyhow::Context;
use autoprecio::config::{load_config_with_hash, Config};
use autoprecio::output::{print_summary, write_json, write_json_file};
use autoprecio::Searcher;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// autoprecio: vehicle price survey
///
/// Searches marketplace listings for a vehicle version and year, converts
/// foreign-currency prices with the official exchange rate, and reports
/// mean, min/max price and min/max distance alongside the listings.
#[derive(Parser, Debug)]
#[command(name = "autoprecio")]
#[command(version)]
#[command(about = "Vehicle price survey over marketplace listings", long_about = None)]
struct Cli {
    /// Vehicle version or trim, e.g. "Toyota Corolla XEi"
    #[arg(value_name = "VERSION", value_parser = non_blank)]
    vehicle: String,

    /// Model year
    #[arg(value_name = "YEAR", default_value = "2025")]
    year: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the JSON payload to this file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "summary")]
    output: Option<PathBuf>,

    /// Print a short statistics block instead of the JSON payload
    #[arg(long)]
    summary: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Rejects empty or whitespace-only input
fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("version is required".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let searcher = Searcher::new(config).context("failed to initialize search")?;
    let aggregate = searcher
        .search(&cli.vehicle, cli.year.trim())
        .await
        .context("search failed")?;

    if cli.summary {
        print_summary(&format!("{} {}", cli.vehicle, cli.year.trim()), &aggregate);
    } else if let Some(path) = &cli.output {
        write_json_file(&aggregate, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(
            "Wrote {} listings to {}",
            aggregate.records.len(),
            path.display()
        );
    } else {
        write_json(&aggregate, std::io::stdout().lock()).context("failed to write output")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the payload.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("autoprecio=info,warn"),
            1 => EnvFilter::new("autoprecio=debug,info"),
            2 => EnvFilter::new("autoprecio=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
