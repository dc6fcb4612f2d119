//! pricelist-updater - Daily cheapest-store price list for Egyptian electronics retailers
//!
//! Scrapes store search pages with TLS fingerprint emulation, normalizes the
//! price text, picks the cheapest store per product and writes a spreadsheet.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod format;
pub mod pricing;
pub mod scrape;
pub mod sheet;
pub mod stores;

pub use catalog::{Catalog, Product};
pub use config::Config;
pub use pricing::{aggregate, normalize, Cheapest, Observations, ProductPriceRecord, StorePrice};
pub use stores::{Store, StoreSet, StoreSpec};
