//! Full price list update: scrape every product, aggregate, write the sheet.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::pricing::{aggregate, ProductPriceRecord};
use crate::scrape::{scrape_product, StoreClient, StoreFetch};
use crate::sheet::{header, CsvSheet, SheetWriter};
use crate::stores::StoreSet;
use anyhow::{Context, Result};
use tracing::{error, info};

/// Outcome of one update run.
#[derive(Debug, Default)]
pub struct UpdateSummary {
    /// Records written, in catalog order
    pub records: Vec<ProductPriceRecord>,
    /// Products whose row could not be written
    pub failed: Vec<String>,
}

impl UpdateSummary {
    /// Products with at least one store price.
    pub fn priced(&self) -> usize {
        self.records.iter().filter(|r| r.has_prices()).count()
    }

    /// Products no store had a price for.
    pub fn unpriced(&self) -> usize {
        self.records.len() - self.priced()
    }
}

impl std::fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Updated {} products ({} priced, {} without prices, {} failed)",
            self.records.len(),
            self.priced(),
            self.unpriced(),
            self.failed.len()
        )
    }
}

/// Runs the daily update.
pub struct UpdateCommand {
    config: Config,
}

impl UpdateCommand {
    /// Creates a new update command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs against the live stores and the configured sheet file.
    pub async fn execute(&self) -> Result<UpdateSummary> {
        let stores = self.config.store_set()?;
        let client = StoreClient::new(&self.config).context("Failed to create HTTP client")?;
        let mut sheet = CsvSheet::open(&self.config.sheet_path)?;

        self.execute_with(&client, &stores, &mut sheet).await
    }

    /// Runs with a provided fetcher and sheet (for testing).
    pub async fn execute_with(
        &self,
        fetcher: &impl StoreFetch,
        stores: &StoreSet,
        sheet: &mut impl SheetWriter,
    ) -> Result<UpdateSummary> {
        let order = stores.order();
        sheet.ensure_header(&header(&order))?;

        let names = sheet.ensure_products(&self.config.seed_products())?;
        let catalog = Catalog::from_names(names);
        sheet.save()?;

        let total = catalog.len();
        let mut summary = UpdateSummary::default();

        for (i, product) in catalog.iter().enumerate() {
            info!("[{}/{}] Fetching: {}", i + 1, total, product.name);

            let observations =
                scrape_product(fetcher, stores, &product.name, self.config.max_candidates).await;
            let record = aggregate(&product.name, &order, &observations);

            match sheet.write_record(product.row, &record) {
                Ok(()) => {
                    // Persist row by row so an interrupted run keeps its progress
                    sheet.save()?;
                    summary.records.push(record);
                }
                Err(e) => {
                    error!("{}: {:#}", product.name, e);
                    summary.failed.push(product.name.clone());
                }
            }
        }

        info!("{}", summary);
        Ok(summary)
    }
}
