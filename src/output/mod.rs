//! Output module for search results
//!
//! This module handles:
//! - Serializing a `SearchAggregate` as the JSON response payload
//! - Rendering a short human-readable statistics block

mod json;
mod summary;

pub use json::{write_json, write_json_file};
pub use summary::{format_summary, print_summary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
