//! Cheapest-store aggregation.

use super::models::{Cheapest, Observations, ProductPriceRecord, StorePrice};

/// Builds the price record for one product.
///
/// `order` is the configured store enumeration. The record lists every store
/// in that order; stores missing from `observations` are absent. Negative or
/// non-finite values are treated as absent. On a tie for the lowest price the
/// store that comes first in `order` wins.
pub fn aggregate<S: AsRef<str>>(
    product: &str,
    order: &[S],
    observations: &Observations,
) -> ProductPriceRecord {
    let prices: Vec<StorePrice> = order
        .iter()
        .map(|store| {
            let store = store.as_ref();
            let price = observations
                .get(store)
                .copied()
                .flatten()
                .filter(|p| p.is_finite() && *p >= 0.0);
            StorePrice { store: store.to_string(), price }
        })
        .collect();

    let mut cheapest: Option<Cheapest> = None;
    for entry in &prices {
        let Some(price) = entry.price else {
            continue;
        };
        // Strict comparison keeps the earlier store on ties
        if cheapest.as_ref().is_none_or(|c| price < c.price) {
            cheapest = Some(Cheapest { store: entry.store.clone(), price });
        }
    }

    ProductPriceRecord { product: product.to_string(), prices, cheapest }
}
