//! Search query and result-page URL construction

use crate::SearchError;
use url::Url;

/// Suffix the marketplace uses for its card-offset pagination cursor
const OFFSET_MARKER: &str = "_Desde_";

/// A vehicle search: the free-text query and its URL slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    slug: String,
}

impl SearchQuery {
    /// Builds the query `"{version} {year}"` and its slug
    ///
    /// The slug replaces whitespace runs with `-` and lowercases everything.
    /// Leading and trailing whitespace is dropped rather than becoming a
    /// dangling `-` (`"Fiat", "2021 "` gives `fiat-2021`), and [`page_url`]
    /// pushes the slug as a single percent-encoded path segment, so a `/` in
    /// the version never adds a path level.
    ///
    /// [`page_url`]: SearchQuery::page_url
    ///
    /// # Errors
    ///
    /// `SearchError::EmptyQuery` when both inputs are blank.
    ///
    /// # Example
    ///
    /// ```
    /// use autoprecio::crawler::SearchQuery;
    ///
    /// let query = SearchQuery::new("Toyota  Corolla XEi", "2020").unwrap();
    /// assert_eq!(query.slug(), "toyota-corolla-xei-2020");
    /// ```
    pub fn new(version: &str, year: &str) -> Result<Self, SearchError> {
        let text = format!("{} {}", version, year);
        let slug = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();

        if slug.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        Ok(Self { text, slug })
    }

    /// The query as typed, `"{version} {year}"`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// URL of a 1-indexed result page
    ///
    /// Page 1 is the bare slug; later pages carry the offset marker pointing
    /// at the first card not yet seen (`offset + 1`).
    ///
    /// # Arguments
    ///
    /// * `base` - The listings base URL
    /// * `page` - 1-indexed page number
    /// * `offset` - Number of cards seen on previous pages
    pub fn page_url(&self, base: &Url, page: u32, offset: usize) -> Result<Url, SearchError> {
        let segment = if page <= 1 {
            self.slug.clone()
        } else {
            format!("{}{}{}", self.slug, OFFSET_MARKER, offset + 1)
        };

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::InvalidBaseUrl(base.to_string()))?
            .pop_if_empty()
            .push(&segment);

        Ok(url)
    }
}
