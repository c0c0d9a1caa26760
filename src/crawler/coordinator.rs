//! Search coordinator - pagination and price normalization
//!
//! This module contains the search loop that ties the pieces together:
//! - Building result-page URLs from the query
//! - Walking pages sequentially up to the page cap
//! - Extracting listings per page and stopping on empty pages or failures
//! - Fetching the exchange rate once and aggregating normalized prices

use crate::config::{validate, Config};
use crate::crawler::exchange::fetch_official_rate;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::listings::parse_results_page;
use crate::crawler::query::SearchQuery;
use crate::model::{normalize_listings, ListingRecord, SearchAggregate};
use crate::SearchError;
use reqwest::Client;
use std::fmt;
use url::Url;

/// Why the page loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every page up to the cap returned listings
    PageCap,

    /// A page yielded no listings, meaning the results ran out
    EmptyPage { page: u32 },

    /// A page could not be fetched; later pages were not attempted
    FetchFailed { page: u32, reason: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::PageCap => write!(f, "page cap reached"),
            StopReason::EmptyPage { page } => write!(f, "no listings on page {}", page),
            StopReason::FetchFailed { page, reason } => {
                write!(f, "page {} failed: {}", page, reason)
            }
        }
    }
}

/// Listings gathered by the page loop, before price normalization
#[derive(Debug, Clone, PartialEq)]
pub struct PageCollection {
    /// Records in page-then-card order
    pub listings: Vec<ListingRecord>,

    /// Number of page requests sent
    pub pages_fetched: u32,

    pub stop: StopReason,
}

/// Runs vehicle searches against the configured marketplace
///
/// Holds one HTTP client for its lifetime; each `search` call owns its own
/// accumulated listings and shares nothing with other calls.
pub struct Searcher {
    config: Config,
    client: Client,
    base_url: Url,
}

impl Searcher {
    /// Creates a searcher with a client built from `config.http`
    pub fn new(config: Config) -> Result<Self, SearchError> {
        let client = build_http_client(&config.http)?;
        Self::with_client(config, client)
    }

    /// Creates a searcher around an existing client
    pub fn with_client(config: Config, client: Client) -> Result<Self, SearchError> {
        validate(&config)?;
        let base_url = Url::parse(&config.marketplace.base_url)?;

        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    /// Searches listings for `version` and `year` and aggregates their prices
    ///
    /// Page failures only truncate pagination; the exchange rate degrades to
    /// its fallback. When no listings are found the rate is not fetched and
    /// the zero-valued aggregate is returned.
    ///
    /// # Errors
    ///
    /// * `SearchError::EmptyQuery` - both inputs are blank
    /// * `SearchError::InvalidBaseUrl` - the base URL cannot carry the slug
    pub async fn search(&self, version: &str, year: &str) -> Result<SearchAggregate, SearchError> {
        let query = SearchQuery::new(version, year)?;
        tracing::info!(
            "Starting search for '{}' at {}",
            query.text(),
            query.page_url(&self.base_url, 1, 0)?
        );

        let collection = self.collect_pages(&query).await?;
        tracing::info!(
            "Search finished after {} page(s) ({}): {} raw listings",
            collection.pages_fetched,
            collection.stop,
            collection.listings.len()
        );

        if collection.listings.is_empty() {
            return Ok(SearchAggregate::empty());
        }

        let rate = fetch_official_rate(&self.client, &self.config.exchange_rate).await;
        let aggregate = SearchAggregate::from_listings(normalize_listings(collection.listings, rate));

        tracing::info!(
            "Exchange rate used: {}, mean local price: {}",
            rate,
            aggregate.mean_local_price
        );

        Ok(aggregate)
    }

    /// Walks result pages sequentially, accumulating extracted listings
    ///
    /// # Loop Rules
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Non-success status | Stop, keep gathered listings |
    /// | Transport failure | Stop, keep gathered listings |
    /// | Page yields no listings | Stop |
    /// | Page cap reached | Stop |
    ///
    /// The page delay is only slept when another page will be requested.
    pub async fn collect_pages(&self, query: &SearchQuery) -> Result<PageCollection, SearchError> {
        let max_pages = self.config.marketplace.max_pages;
        let delay = self.config.marketplace.page_delay();

        let mut listings = Vec::new();
        let mut offset = 0usize;
        let mut pages_fetched = 0;
        let mut stop = StopReason::PageCap;

        for page in 1..=max_pages {
            let url = query.page_url(&self.base_url, page, offset)?;
            tracing::debug!("Fetching page {}: {}", page, url);
            pages_fetched = page;

            let body = match fetch_page(&self.client, url.as_str(), None).await {
                FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                } => {
                    if final_url != url.as_str() {
                        tracing::debug!("Page {} redirected to {}", page, final_url);
                    }
                    tracing::debug!("Page {}: HTTP {}, {} bytes", page, status_code, body.len());
                    body
                }
                failure => {
                    let reason = failure.failure_reason().unwrap_or_default();
                    tracing::warn!("Error fetching page {} ({}): {}", page, url, reason);
                    stop = StopReason::FetchFailed { page, reason };
                    break;
                }
            };

            let parsed = parse_results_page(&body);
            if parsed.listings.is_empty() {
                tracing::info!(
                    "No more listings found on page {} ({} cards)",
                    page,
                    parsed.card_count
                );
                stop = StopReason::EmptyPage { page };
                break;
            }

            tracing::debug!(
                "Page {}: {} listings from {} cards",
                page,
                parsed.listings.len(),
                parsed.card_count
            );
            offset += parsed.card_count;
            listings.extend(parsed.listings);

            if page < max_pages && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(PageCollection {
            listings,
            pages_fetched,
            stop,
        })
    }
}

/// Runs a single search with a freshly built searcher
pub async fn run_search(
    config: Config,
    version: &str,
    year: &str,
) -> Result<SearchAggregate, SearchError> {
    Searcher::new(config)?.search(version, year).await
}
