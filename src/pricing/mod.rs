//! Price normalization and per-product cheapest-store aggregation.

pub mod aggregate;
pub mod models;
pub mod normalize;

pub use aggregate::aggregate;
pub use models::{Cheapest, Observations, ProductPriceRecord, StorePrice};
pub use normalize::{normalize, normalize_str};
