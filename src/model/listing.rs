//! Listing record definitions
//!
//! A `ListingRecord` is what the extractor reads off one result card. Price
//! normalization wraps it in a `NormalizedListing` rather than mutating it, so
//! the derived local price is attached exactly once.

use serde::{Deserialize, Serialize};

/// Title used when a card carries no heading
pub const TITLE_PLACEHOLDER: &str = "N/D";

/// Link used when a card carries no usable href
pub const LINK_PLACEHOLDER: &str = "#";

/// Seller identity is not extracted; every record carries this value
pub const SELLER_PLACEHOLDER: &str = "N/A";

/// One marketplace entry as parsed from a result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Listing headline, or [`TITLE_PLACEHOLDER`]
    #[serde(rename = "titulo")]
    pub title: String,

    /// Absolute or relative URL of the listing, or [`LINK_PLACEHOLDER`]
    pub link: String,

    /// Always [`SELLER_PLACEHOLDER`]
    #[serde(rename = "vendedor")]
    pub seller: String,

    /// Price as shown on the card, before currency conversion
    #[serde(rename = "bruto")]
    pub raw_amount: u64,

    /// True when the card is priced in the foreign currency
    #[serde(rename = "es_usd")]
    pub is_foreign_currency: bool,

    /// First card attribute (the vehicle's model year)
    #[serde(rename = "modelo")]
    pub model_year: String,

    /// Second card attribute with every non-digit stripped
    #[serde(rename = "km")]
    pub distance_km: u64,

    /// Seller location, empty when absent
    #[serde(rename = "ubic")]
    pub location: String,
}

impl Default for ListingRecord {
    fn default() -> Self {
        Self {
            title: TITLE_PLACEHOLDER.to_string(),
            link: LINK_PLACEHOLDER.to_string(),
            seller: SELLER_PLACEHOLDER.to_string(),
            raw_amount: 0,
            is_foreign_currency: false,
            model_year: String::new(),
            distance_km: 0,
            location: String::new(),
        }
    }
}

impl ListingRecord {
    /// Price in local currency units given `rate` local units per foreign unit
    pub fn local_price(&self, rate: f64) -> f64 {
        if self.is_foreign_currency {
            self.raw_amount as f64 * rate
        } else {
            self.raw_amount as f64
        }
    }
}

/// A listing with its price converted to local currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    #[serde(flatten)]
    pub record: ListingRecord,

    /// `raw_amount * rate` for foreign listings, `raw_amount` otherwise
    #[serde(rename = "precio_ars")]
    pub local_price: f64,
}

impl NormalizedListing {
    pub fn new(record: ListingRecord, rate: f64) -> Self {
        let local_price = record.local_price(rate);
        Self {
            record,
            local_price,
        }
    }
}

/// Converts every record using a single exchange rate, preserving order
pub fn normalize_listings(records: Vec<ListingRecord>, rate: f64) -> Vec<NormalizedListing> {
    records
        .into_iter()
        .map(|record| NormalizedListing::new(record, rate))
        .collect()
}
