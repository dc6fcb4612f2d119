//! Single product price check, without touching the sheet.

use crate::config::Config;
use crate::format::Formatter;
use crate::pricing::aggregate;
use crate::scrape::{scrape_product, StoreClient, StoreFetch};
use crate::stores::StoreSet;
use anyhow::{Context, Result};
use tracing::info;

/// Looks up one product across every store and formats the result.
pub struct CheckCommand {
    config: Config,
}

impl CheckCommand {
    /// Creates a new check command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Checks `product` against the live stores.
    pub async fn execute(&self, product: &str) -> Result<String> {
        let stores = self.config.store_set()?;
        let client = StoreClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, &stores, product).await
    }

    /// Checks a product with a provided fetcher (for testing).
    pub async fn execute_with_client(
        &self,
        fetcher: &impl StoreFetch,
        stores: &StoreSet,
        product: &str,
    ) -> Result<String> {
        let product = product.trim();
        if product.is_empty() {
            anyhow::bail!("Product name cannot be empty");
        }

        info!("Checking {} across {} stores", product, stores.len());

        let observations =
            scrape_product(fetcher, stores, product, self.config.max_candidates).await;
        let record = aggregate(product, &stores.order(), &observations);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_record(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::stores::{Store, StoreSpec};
    use async_trait::async_trait;

    struct MockFetcher;

    #[async_trait]
    impl StoreFetch for MockFetcher {
        async fn search(&self, store: &Store, _query: &str) -> Result<String> {
            match store.name() {
                "Jumia" => Ok(r#"<div class="prc">EGP 13,499.00</div>"#.to_string()),
                "Noon" => Ok(r#"<strong class="amount">12999</strong>"#.to_string()),
                _ => anyhow::bail!("Simulated 503"),
            }
        }
    }

    fn make_stores() -> StoreSet {
        StoreSet::new(vec![
            StoreSpec::new("Jumia", "https://jumia.example/catalog/?q=", "div.prc"),
            StoreSpec::new("BTECH", "https://btech.example/search?q=", ".price"),
            StoreSpec::new("Noon", "https://noon.example/search?q=", "strong.amount"),
        ])
        .unwrap()
    }

    fn make_config(format: OutputFormat) -> Config {
        Config { format, ..Config::default() }
    }

    #[tokio::test]
    async fn test_check_json() {
        let cmd = CheckCommand::new(make_config(OutputFormat::Json));
        let output =
            cmd.execute_with_client(&MockFetcher, &make_stores(), "Galaxy A55").await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["product"], "Galaxy A55");
        assert_eq!(value["cheapest"]["store"], "Noon");
        assert_eq!(value["cheapest"]["price"], 12999.0);
        assert_eq!(value["prices"][1]["price"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_check_table() {
        let cmd = CheckCommand::new(make_config(OutputFormat::Table));
        let output =
            cmd.execute_with_client(&MockFetcher, &make_stores(), "  Galaxy A55  ").await.unwrap();

        assert!(output.contains("📦 Galaxy A55"));
        assert!(output.contains("🏆 Noon"));
    }

    #[tokio::test]
    async fn test_check_rejects_empty_product() {
        let cmd = CheckCommand::new(Config::default());
        let result = cmd.execute_with_client(&MockFetcher, &make_stores(), "   ").await;
        assert!(result.is_err());
    }
}
