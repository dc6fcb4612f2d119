//! Store registry: the ordered list of retailers scraped on every run.
//!
//! The order of the set matters. It is the column order of the sheet and the
//! tie-break order when two stores report the same lowest price.

mod defaults;

pub use defaults::default_stores;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building a store set from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store list is empty")]
    Empty,

    #[error("store name is empty")]
    EmptyName,

    #[error("duplicate store: {0}")]
    Duplicate(String),

    #[error("invalid price selector for {store}: {reason}")]
    InvalidSelector { store: String, reason: String },

    #[error("invalid search URL for {store}: {url}")]
    InvalidUrl { store: String, url: String },
}

/// Static description of a retailer, as found in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSpec {
    /// Display name, also the sheet column header
    pub name: String,
    /// Search URL prefix; the query is appended to it
    pub search_url: String,
    /// CSS selector matching price elements on the search results page
    pub price_selector: String,
}

impl StoreSpec {
    /// Creates a new store spec.
    pub fn new(
        name: impl Into<String>,
        search_url: impl Into<String>,
        price_selector: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            search_url: search_url.into(),
            price_selector: price_selector.into(),
        }
    }
}

/// A validated store with its compiled price selector.
#[derive(Debug, Clone)]
pub struct Store {
    spec: StoreSpec,
    selector: Selector,
}

impl Store {
    /// Validates a spec and compiles its selector.
    pub fn compile(spec: StoreSpec) -> Result<Self, StoreError> {
        if spec.name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }

        if !spec.search_url.starts_with("http://") && !spec.search_url.starts_with("https://") {
            return Err(StoreError::InvalidUrl { store: spec.name, url: spec.search_url });
        }

        let selector = Selector::parse(&spec.price_selector).map_err(|e| {
            StoreError::InvalidSelector { store: spec.name.clone(), reason: e.to_string() }
        })?;

        Ok(Self { spec, selector })
    }

    /// Store name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Underlying configuration.
    pub fn spec(&self) -> &StoreSpec {
        &self.spec
    }

    /// Compiled price selector.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Builds the search URL for a product query.
    ///
    /// Words are joined with `+`; anything else that is not URL-safe is
    /// percent-encoded.
    pub fn query_url(&self, query: &str) -> String {
        format!("{}{}", self.spec.search_url, encode_query(query))
    }

    /// Same as [`Store::query_url`] but with scheme and host replaced.
    pub fn query_url_with_base(&self, base_url: &str, query: &str) -> String {
        format!(
            "{}{}{}",
            base_url.trim_end_matches('/'),
            path_and_query(&self.spec.search_url),
            encode_query(query)
        )
    }
}

/// Ordered, duplicate-free collection of stores.
#[derive(Debug, Clone)]
pub struct StoreSet {
    stores: Vec<Store>,
}

impl StoreSet {
    /// Builds a store set, keeping the given order.
    pub fn new(specs: Vec<StoreSpec>) -> Result<Self, StoreError> {
        if specs.is_empty() {
            return Err(StoreError::Empty);
        }

        let mut seen = HashSet::new();
        let mut stores = Vec::with_capacity(specs.len());

        for spec in specs {
            if !seen.insert(spec.name.clone()) {
                return Err(StoreError::Duplicate(spec.name));
            }
            stores.push(Store::compile(spec)?);
        }

        Ok(Self { stores })
    }

    /// The 11 default Egyptian retailers.
    pub fn defaults() -> Result<Self, StoreError> {
        Self::new(default_stores())
    }

    /// Store names in configured order.
    pub fn order(&self) -> Vec<&str> {
        self.stores.iter().map(Store::name).collect()
    }

    /// Iterates stores in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Store> {
        self.stores.iter()
    }

    /// Looks a store up by name.
    pub fn get(&self, name: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.name() == name)
    }

    /// Number of stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// True when the set holds no stores.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

fn encode_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(|w| urlencoding::encode(w).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

/// Strips `scheme://host` from a URL, keeping path and query.
fn path_and_query(url: &str) -> &str {
    let after_scheme = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[after_scheme..].find('/') {
        Some(i) => &url[after_scheme + i..],
        None => "/",
    }
}
