use serde::Deserialize;
use std::time::Duration;

/// Browser user agent sent to both the marketplace and the bank
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Rate used whenever the live rate cannot be obtained
pub const DEFAULT_FALLBACK_RATE: f64 = 1155.0;

/// Main configuration structure
///
/// Every section and key has a default, so an empty TOML document (or no file
/// at all) yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub marketplace: MarketplaceConfig,
    #[serde(rename = "exchange-rate")]
    pub exchange_rate: ExchangeRateConfig,
    pub http: HttpConfig,
}

/// Listings source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Search base URL; the query slug is appended as a path segment
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Hard cap on result pages fetched per search
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pause between consecutive page fetches (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,
}

impl MarketplaceConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://autos.mercadolibre.com.ar/".to_string(),
            max_pages: 5,
            page_delay_ms: 500,
        }
    }
}

/// Exchange rate source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeRateConfig {
    /// Bank page carrying the official sell rate
    pub url: String,

    /// Value substituted when the rate cannot be fetched or parsed
    #[serde(rename = "fallback-rate")]
    pub fallback_rate: f64,

    /// Timeout for the rate request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl ExchangeRateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            url: "https://www.bna.com.ar/".to_string(),
            fallback_rate: DEFAULT_FALLBACK_RATE,
            timeout_secs: 5,
        }
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Overall request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
