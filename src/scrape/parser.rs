//! Price extraction from store search result pages.

use crate::pricing::normalize_str;
use scraper::{Html, Selector};
use tracing::trace;

/// Collects the trimmed text of the first `limit` elements matching `selector`.
pub fn extract_candidates(html: &str, selector: &Selector, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .take(limit)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .collect()
}

/// Returns the lowest positive price among the first `limit` candidates.
///
/// A search page lists several offers; accessories and bundles tend to be
/// listed too, so the lowest value is only as good as the store's search.
/// Zero prices are placeholders ("call for price") and are skipped.
pub fn lowest_price(html: &str, selector: &Selector, limit: usize) -> Option<f64> {
    let candidates = extract_candidates(html, selector, limit);
    trace!("Found {} price candidates", candidates.len());

    candidates
        .iter()
        .filter_map(|text| normalize_str(text))
        .filter(|price| *price > 0.0)
        .reduce(f64::min)
}
