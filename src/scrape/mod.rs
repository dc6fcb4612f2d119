//! Fetching store search pages and turning them into observations.

pub mod client;
pub mod parser;

pub use client::{StoreClient, StoreFetch};

use crate::pricing::Observations;
use crate::stores::StoreSet;
use tracing::{debug, warn};

/// Queries every store for one product and collects one observation per store.
///
/// Stores are visited in configured order. A failing store is logged and
/// recorded as absent; it never stops the remaining stores.
pub async fn scrape_product(
    fetcher: &impl StoreFetch,
    stores: &StoreSet,
    query: &str,
    max_candidates: usize,
) -> Observations {
    let mut observations = Observations::with_capacity(stores.len());

    for store in stores.iter() {
        let price = match fetcher.search(store, query).await {
            Ok(html) => {
                let price = parser::lowest_price(&html, store.selector(), max_candidates);
                if price.is_none() {
                    debug!("{}: no price found for '{}'", store.name(), query);
                }
                price
            }
            Err(e) => {
                warn!("{}: {:#}", store.name(), e);
                None
            }
        };

        observations.insert(store.name().to_string(), price);
    }

    observations
}
