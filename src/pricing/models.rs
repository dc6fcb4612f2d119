//! Data models for per-product price records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store name to normalized observation for a single product.
///
/// `None` means the store produced no usable price, for whatever reason.
pub type Observations = HashMap<String, Option<f64>>;

/// One store's observation inside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePrice {
    /// Store name as configured
    pub store: String,
    /// Normalized price, absent when the store gave nothing usable
    pub price: Option<f64>,
}

/// The winning store for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cheapest {
    /// Store name
    pub store: String,
    /// Lowest price across all stores
    pub price: f64,
}

/// Aggregated prices for one product in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceRecord {
    /// Product name
    pub product: String,
    /// One entry per configured store, in store order
    pub prices: Vec<StorePrice>,
    /// Cheapest store and price, absent when no store had a price
    pub cheapest: Option<Cheapest>,
}

impl ProductPriceRecord {
    /// Returns the observation for a store, `None` if absent or unknown.
    pub fn price_for(&self, store: &str) -> Option<f64> {
        self.prices.iter().find(|p| p.store == store).and_then(|p| p.price)
    }

    /// Returns the cheapest store name.
    pub fn cheapest_store(&self) -> Option<&str> {
        self.cheapest.as_ref().map(|c| c.store.as_str())
    }

    /// Returns the cheapest price.
    pub fn cheapest_price(&self) -> Option<f64> {
        self.cheapest.as_ref().map(|c| c.price)
    }

    /// Number of stores with a present observation.
    pub fn available_count(&self) -> usize {
        self.prices.iter().filter(|p| p.price.is_some()).count()
    }

    /// True if at least one store reported a price.
    pub fn has_prices(&self) -> bool {
        self.cheapest.is_some()
    }

    /// Highest present price, if any.
    pub fn highest_price(&self) -> Option<f64> {
        self.prices.iter().filter_map(|p| p.price).reduce(f64::max)
    }

    /// Spread between the most expensive and the cheapest store.
    pub fn max_savings(&self) -> Option<f64> {
        match (self.cheapest_price(), self.highest_price()) {
            (Some(low), Some(high)) => Some(high - low),
            _ => None,
        }
    }
}
