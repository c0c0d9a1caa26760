//! Crawler module for marketplace searches
//!
//! This module contains the core search pipeline, including:
//! - HTTP fetching of result pages and the exchange rate page
//! - Listing extraction from result-page markup
//! - Official exchange rate lookup with fallback
//! - Pagination and aggregation in the coordinator

mod coordinator;
mod exchange;
mod fetcher;
mod listings;
mod query;

pub use coordinator::{run_search, PageCollection, Searcher, StopReason};
pub use exchange::{fetch_official_rate, parse_rate};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use listings::{
    extract_listings, is_foreign_currency, parse_distance, parse_price, parse_results_page,
    ResultsPage, FOREIGN_CURRENCY_MARKER,
};
pub use query::SearchQuery;

use crate::config::Config;
use crate::model::SearchAggregate;
use crate::SearchError;

/// Runs a complete search
///
/// This is the main entry point for a search. It will:
/// 1. Build the HTTP client
/// 2. Fetch result pages until the cap, an empty page, or a failure
/// 3. Fetch the exchange rate (only if listings were found)
/// 4. Normalize prices and compute statistics
///
/// # Arguments
///
/// * `config` - The search configuration
/// * `version` - Vehicle version/trim text
/// * `year` - Model year text
pub async fn search(
    config: Config,
    version: &str,
    year: &str,
) -> Result<SearchAggregate, SearchError> {
    run_search(config, version, year).await
}
