//! autoprecio: vehicle price survey over marketplace listings
//!
//! This crate searches a classifieds marketplace for a vehicle version and
//! year, extracts the listing cards from the result pages, converts
//! foreign-currency prices with the official exchange rate, and reports
//! price and distance statistics over the listing set.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for search operations
///
/// Page fetch failures, missing markup, and exchange rate failures are not
/// errors: they degrade the result and are logged instead.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Base URL cannot carry a search path: {0}")]
    InvalidBaseUrl(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
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

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{search, Searcher};
pub use model::{ListingRecord, NormalizedListing, SearchAggregate};
