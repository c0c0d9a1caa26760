//! Human-readable search statistics

use crate::model::SearchAggregate;

/// Formats the aggregate statistics as a plain-text block
pub fn format_summary(query: &str, aggregate: &SearchAggregate) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Search: {} ===\n\n", query));

    if aggregate.is_empty() {
        out.push_str("No listings found.\n");
        return out;
    }

    out.push_str(&format!("Listings: {}\n", aggregate.records.len()));
    out.push_str(&format!(
        "  Priced in foreign currency: {}\n\n",
        aggregate.foreign_count()
    ));

    out.push_str("Price (local currency):\n");
    out.push_str(&format!("  Mean: {}\n", aggregate.mean_local_price));
    out.push_str(&format!("  Min:  {}\n", aggregate.min_local_price));
    out.push_str(&format!("  Max:  {}\n\n", aggregate.max_local_price));

    out.push_str("Distance (km):\n");
    out.push_str(&format!("  Min:  {}\n", aggregate.min_distance_km));
    out.push_str(&format!("  Max:  {}\n", aggregate.max_distance_km));

    out
}

/// Prints the statistics block to stdout
pub fn print_summary(query: &str, aggregate: &SearchAggregate) {
    print!("{}", format_summary(query, aggregate));
}
