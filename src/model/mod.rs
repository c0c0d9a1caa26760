//! Model module for search results
//!
//! # Components
//!
//! - `ListingRecord`: one parsed result card
//! - `NormalizedListing`: a record with its price converted to local currency
//! - `SearchAggregate`: the listing set plus price and distance statistics

mod aggregate;
mod listing;

// Re-export main types
pub use aggregate::SearchAggregate;
pub use listing::{
    normalize_listings, ListingRecord, NormalizedListing, LINK_PLACEHOLDER, SELLER_PLACEHOLDER,
    TITLE_PLACEHOLDER,
};
