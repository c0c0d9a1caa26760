//! Configuration module for autoprecio
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: every key has a default matching the
//! production marketplace and bank endpoints.
//!
//! # Example
//!
//! ```no_run
//! use autoprecio::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("autoprecio.toml")).unwrap();
//! println!("Searching at most {} pages", config.marketplace.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExchangeRateConfig, HttpConfig, MarketplaceConfig, DEFAULT_FALLBACK_RATE,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
