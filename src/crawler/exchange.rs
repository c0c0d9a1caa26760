//! Official exchange rate lookup
//!
//! The rate is read from the bank's public page. This is a soft dependency:
//! any failure degrades to the configured fallback rate, and callers cannot
//! tell a fallback apart from a live value.

use crate::config::ExchangeRateConfig;
use crate::crawler::fetcher::{fetch_page, FetchResult};
use reqwest::Client;
use scraper::{Html, Selector};

/// Element holding the official sell rate on the bank page
const SELL_RATE: &str = "span.value.sell";

/// Fetches the official sell rate, or the fallback rate on any failure
///
/// Returns `config.fallback_rate` (1155.0 by default) when the request fails,
/// the server answers with a non-success status, the rate element is missing,
/// or its text is not a positive number. Never returns an error.
pub async fn fetch_official_rate(client: &Client, config: &ExchangeRateConfig) -> f64 {
    let body = match fetch_page(client, &config.url, Some(config.timeout())).await {
        FetchResult::Success { body, .. } => body,
        failure => {
            tracing::warn!(
                "Exchange rate fetch from {} failed ({}), using fallback {}",
                config.url,
                failure.failure_reason().unwrap_or_default(),
                config.fallback_rate
            );
            return config.fallback_rate;
        }
    };

    match parse_rate(&body) {
        Some(rate) => {
            tracing::debug!("Official sell rate: {}", rate);
            rate
        }
        None => {
            tracing::warn!(
                "No usable sell rate found at {}, using fallback {}",
                config.url,
                config.fallback_rate
            );
            config.fallback_rate
        }
    }
}

/// Reads the sell rate out of the bank page markup
///
/// The page formats numbers with `.` thousands separators and a `,` decimal
/// separator (`1.155,50`).
pub fn parse_rate(html: &str) -> Option<f64> {
    let selector = Selector::parse(SELL_RATE).ok()?;
    let document = Html::parse_document(html);

    let text = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();

    let normalized = text.trim().replace('.', "").replacen(',', ".", 1);
    normalized
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}
