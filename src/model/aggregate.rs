//! Aggregate pricing statistics over a normalized listing set

use crate::model::listing::NormalizedListing;
use serde::{Deserialize, Serialize};

/// Summary of one search: the listings plus price and distance statistics
///
/// Every statistic is 0 when its input set is empty, and `records` is always
/// present (an empty array when nothing was found).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchAggregate {
    /// Listings in page-then-card discovery order
    #[serde(rename = "datos")]
    pub records: Vec<NormalizedListing>,

    /// Rounded mean of all positive local prices
    #[serde(rename = "promedio")]
    pub mean_local_price: u64,

    #[serde(rename = "price_min")]
    pub min_local_price: u64,

    #[serde(rename = "price_max")]
    pub max_local_price: u64,

    #[serde(rename = "km_min")]
    pub min_distance_km: u64,

    #[serde(rename = "km_max")]
    pub max_distance_km: u64,
}

impl SearchAggregate {
    /// The zero-valued aggregate returned when a search finds nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Computes statistics over `records` and takes ownership of them
    ///
    /// Price statistics only consider listings with a positive local price;
    /// distance statistics consider every listing.
    pub fn from_listings(records: Vec<NormalizedListing>) -> Self {
        let prices: Vec<f64> = records
            .iter()
            .map(|l| l.local_price)
            .filter(|p| *p > 0.0)
            .collect();

        let (mean_local_price, min_local_price, max_local_price) = if prices.is_empty() {
            (0, 0, 0)
        } else {
            let sum: f64 = prices.iter().sum();
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (
                to_whole(sum / prices.len() as f64),
                to_whole(min),
                to_whole(max),
            )
        };

        let distances = records.iter().map(|l| l.record.distance_km);
        let min_distance_km = distances.clone().min().unwrap_or(0);
        let max_distance_km = distances.max().unwrap_or(0);

        Self {
            records,
            mean_local_price,
            min_local_price,
            max_local_price,
            min_distance_km,
            max_distance_km,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of listings priced in the foreign currency
    pub fn foreign_count(&self) -> usize {
        self.records
            .iter()
            .filter(|l| l.record.is_foreign_currency)
            .count()
    }
}

/// Rounds half away from zero; inputs here are never negative
fn to_whole(value: f64) -> u64 {
    value.round() as u64
}
