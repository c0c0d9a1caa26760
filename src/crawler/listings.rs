//! Listing extractor for marketplace search-result pages
//!
//! Every piece of knowledge about the marketplace's markup lives in this
//! module. Extraction is a pure function of the page text: no network I/O,
//! no failure mode. Missing structure yields fewer records, missing fields
//! yield defaults.

use crate::model::{ListingRecord, LINK_PLACEHOLDER, SELLER_PLACEHOLDER, TITLE_PLACEHOLDER};
use scraper::{ElementRef, Html, Selector};

/// Currency symbol marking a listing priced in the foreign currency
pub const FOREIGN_CURRENCY_MARKER: &str = "U$S";

const CARD: &str = "li.ui-search-layout__item";
const CONTENT: &str = "div.ui-search-result__content-wrapper";
const TITLE_ANCHOR: &str = "a.ui-search-item__group__element.ui-search-link__title-card";
const TITLE_HEADING: &str = "h2.ui-search-item__title";
const PRICE_FRACTION: &str = "span.andes-money-amount__fraction";
const CURRENCY_SYMBOL: &str = "span.andes-money-amount__currency-symbol";
const ATTRIBUTES: &str = "ul.ui-search-card-attributes li";
const LOCATION: &str = "span.ui-search-item__group__element.ui-search-item__location";

/// One parsed page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPage {
    /// Number of listing cards on the page, including skipped ones
    pub card_count: usize,

    /// Records extracted from cards that had a content container
    pub listings: Vec<ListingRecord>,
}

struct CardSelectors {
    card: Selector,
    content: Selector,
    title_anchor: Selector,
    title_heading: Selector,
    price_fraction: Selector,
    currency_symbol: Selector,
    attributes: Selector,
    location: Selector,
}

impl CardSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            card: Selector::parse(CARD).ok()?,
            content: Selector::parse(CONTENT).ok()?,
            title_anchor: Selector::parse(TITLE_ANCHOR).ok()?,
            title_heading: Selector::parse(TITLE_HEADING).ok()?,
            price_fraction: Selector::parse(PRICE_FRACTION).ok()?,
            currency_symbol: Selector::parse(CURRENCY_SYMBOL).ok()?,
            attributes: Selector::parse(ATTRIBUTES).ok()?,
            location: Selector::parse(LOCATION).ok()?,
        })
    }
}

/// Extracts every listing record from one page of search-result markup
///
/// # Example
///
/// ```
/// use autoprecio::crawler::extract_listings;
///
/// let html = r#"<ul><li class="ui-search-layout__item">
///   <div class="ui-search-result__content-wrapper">
///     <span class="andes-money-amount__currency-symbol">U$S</span>
///     <span class="andes-money-amount__fraction">21.500</span>
///   </div>
/// </li></ul>"#;
///
/// let listings = extract_listings(html);
/// assert_eq!(listings.len(), 1);
/// assert_eq!(listings[0].raw_amount, 21500);
/// assert!(listings[0].is_foreign_currency);
/// ```
pub fn extract_listings(html: &str) -> Vec<ListingRecord> {
    parse_results_page(html).listings
}

/// Parses a results page, keeping the raw card count alongside the records
///
/// The marketplace paginates by card offset, so the orchestrator advances its
/// cursor by `card_count` rather than by the number of extracted records.
pub fn parse_results_page(html: &str) -> ResultsPage {
    let Some(selectors) = CardSelectors::new() else {
        return ResultsPage::default();
    };

    let document = Html::parse_document(html);
    let mut page = ResultsPage::default();

    for card in document.select(&selectors.card) {
        page.card_count += 1;

        let Some(content) = card.select(&selectors.content).next() else {
            tracing::trace!("Skipping listing card without content container");
            continue;
        };

        page.listings.push(extract_card(content, &selectors));
    }

    page
}

/// Reads one card's content container into a record
fn extract_card(content: ElementRef<'_>, selectors: &CardSelectors) -> ListingRecord {
    let anchor = content.select(&selectors.title_anchor).next();

    let title = anchor
        .and_then(|a| a.select(&selectors.title_heading).next())
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let link = anchor
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .unwrap_or(LINK_PLACEHOLDER)
        .to_string();

    let price_text = first_text(content, &selectors.price_fraction);
    let symbol_text = first_text(content, &selectors.currency_symbol);

    let attributes: Vec<String> = content
        .select(&selectors.attributes)
        .map(element_text)
        .collect();
    let model_year = attributes.first().cloned().unwrap_or_default();
    let distance_text = attributes.get(1).map(String::as_str).unwrap_or("");

    ListingRecord {
        title,
        link,
        seller: SELLER_PLACEHOLDER.to_string(),
        raw_amount: parse_price(&price_text),
        is_foreign_currency: is_foreign_currency(&symbol_text),
        model_year,
        distance_km: parse_distance(distance_text),
        location: first_text(content, &selectors.location),
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, empty when nothing matches
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// True iff the currency symbol is exactly the foreign marker
pub fn is_foreign_currency(symbol: &str) -> bool {
    symbol.trim() == FOREIGN_CURRENCY_MARKER
}

/// Parses a displayed price such as `1.234.567`
///
/// Thousands separators are stripped and the leading digit run is read;
/// anything unparseable (no digits, overflow) is 0.
pub fn parse_price(text: &str) -> u64 {
    let stripped = text.trim().replace('.', "");
    let digits: String = stripped.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Parses a distance such as `45.000 km` by dropping every non-digit
pub fn parse_distance(text: &str) -> u64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
