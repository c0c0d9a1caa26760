use crate::config::types::{Config, ExchangeRateConfig, HttpConfig, MarketplaceConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on result pages per search
const MAX_PAGE_CAP: u32 = 50;

/// Upper bound on the inter-page delay (milliseconds)
const MAX_PAGE_DELAY_MS: u64 = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_marketplace_config(&config.marketplace)?;
    validate_exchange_rate_config(&config.exchange_rate)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the listings source configuration
fn validate_marketplace_config(config: &MarketplaceConfig) -> Result<(), ConfigError> {
    let url = validate_http_url("base-url", &config.base_url)?;

    // The query slug is pushed as a path segment
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' cannot carry path segments",
            config.base_url
        )));
    }

    if config.max_pages < 1 || config.max_pages > MAX_PAGE_CAP {
        return Err(ConfigError::Validation(format!(
            "max-pages must be between 1 and {}, got {}",
            MAX_PAGE_CAP, config.max_pages
        )));
    }

    if config.page_delay_ms > MAX_PAGE_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "page-delay-ms must be <= {}ms, got {}ms",
            MAX_PAGE_DELAY_MS, config.page_delay_ms
        )));
    }

    Ok(())
}

/// Validates the exchange rate source configuration
fn validate_exchange_rate_config(config: &ExchangeRateConfig) -> Result<(), ConfigError> {
    validate_http_url("exchange-rate url", &config.url)?;

    if !config.fallback_rate.is_finite() || config.fallback_rate <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "fallback-rate must be a positive number, got {}",
            config.fallback_rate
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "exchange-rate timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "http timeouts must be >= 1s, got timeout-secs={} connect-timeout-secs={}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Parses `value` and requires an http or https scheme
fn validate_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(url)
}
