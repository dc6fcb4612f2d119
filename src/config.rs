//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog;
use crate::stores::{StoreSet, StoreSpec};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet file the price list is written to
    #[serde(default = "default_sheet_path")]
    pub sheet_path: PathBuf,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between store requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of price elements inspected per search page
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Output format for the check command
    #[serde(default)]
    pub format: OutputFormat,

    /// Store list override; the built-in stores are used when absent
    #[serde(default)]
    pub stores: Option<Vec<StoreSpec>>,

    /// Products seeded into an empty sheet; the built-in catalog when absent
    #[serde(default)]
    pub products: Option<Vec<String>>,
}

fn default_sheet_path() -> PathBuf {
    PathBuf::from("pricelist.csv")
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_delay_jitter_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    45
}

fn default_max_candidates() -> usize {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_path: default_sheet_path(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            timeout_secs: default_timeout_secs(),
            max_candidates: default_max_candidates(),
            format: OutputFormat::Table,
            stores: None,
            products: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("pricelist.toml");
        if local_config.exists() {
            debug!("Found pricelist.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pricelist-updater").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(sheet) = std::env::var("PRICELIST_SHEET") {
            if !sheet.is_empty() {
                self.sheet_path = PathBuf::from(sheet);
            }
        }

        if let Ok(proxy) = std::env::var("PRICELIST_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("PRICELIST_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }

    /// Builds the validated store set from the configured or built-in stores.
    pub fn store_set(&self) -> Result<StoreSet> {
        let set = match &self.stores {
            Some(specs) => StoreSet::new(specs.clone()).context("Invalid store configuration")?,
            None => StoreSet::defaults().context("Invalid built-in store list")?,
        };
        Ok(set)
    }

    /// Product names to seed into an empty sheet.
    pub fn seed_products(&self) -> Vec<String> {
        match &self.products {
            Some(products) => products.clone(),
            None => catalog::default_names(),
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sheet_path, PathBuf::from("pricelist.csv"));
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.delay_jitter_ms, 1000);
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.max_candidates, 30);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.proxy.is_none());
        assert!(config.stores.is_none());
        assert!(config.products.is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("table, json, markdown, csv"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            sheet_path = "/var/lib/pricelist/prices.csv"
            delay_ms = 300
            max_candidates = 10
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sheet_path, PathBuf::from("/var/lib/pricelist/prices.csv"));
        assert_eq!(config.delay_ms, 300);
        assert_eq!(config.max_candidates, 10);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn test_config_with_stores_and_products() {
        let toml = r#"
            products = ["Apple iPhone 15 128GB", "POCO X6 8GB 256GB"]

            [[stores]]
            name = "Noon"
            search_url = "https://www.noon.com/egypt-en/search?q="
            price_selector = "[data-qa='product-price']"

            [[stores]]
            name = "Jumia"
            search_url = "https://www.jumia.com.eg/catalog/?q="
            price_selector = "article.prd div.prc"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let set = config.store_set().unwrap();
        assert_eq!(set.order(), vec!["Noon", "Jumia"]);
        assert_eq!(config.seed_products(), vec!["Apple iPhone 15 128GB", "POCO X6 8GB 256GB"]);
    }

    #[test]
    fn test_invalid_store_config() {
        let toml = r#"
            [[stores]]
            name = "Noon"
            search_url = "https://www.noon.com/egypt-en/search?q="
            price_selector = ".price"

            [[stores]]
            name = "Noon"
            search_url = "https://www.noon.com/egypt-en/search?q="
            price_selector = ".price"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let err = config.store_set().unwrap_err();
        assert!(err.to_string().contains("Invalid store configuration"));
        assert!(format!("{:#}", err).contains("duplicate store: Noon"));
    }

    #[test]
    fn test_default_store_set_and_seed() {
        let config = Config::default();
        assert_eq!(config.store_set().unwrap().len(), 11);
        assert_eq!(config.seed_products().len(), 80);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            sheet_path = "daily.csv"
            delay_ms = 4000
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.sheet_path, PathBuf::from("daily.csv"));
        assert_eq!(config.delay_ms, 4000);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 10").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_with_env() {
        let orig_sheet = std::env::var("PRICELIST_SHEET").ok();
        let orig_proxy = std::env::var("PRICELIST_PROXY").ok();
        let orig_delay = std::env::var("PRICELIST_DELAY").ok();

        std::env::set_var("PRICELIST_SHEET", "/tmp/env-prices.csv");
        std::env::set_var("PRICELIST_PROXY", "http://proxy:8080");
        std::env::set_var("PRICELIST_DELAY", "not_a_number");

        let config = Config::new().with_env();
        assert_eq!(config.sheet_path, PathBuf::from("/tmp/env-prices.csv"));
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        // Invalid values are ignored
        assert_eq!(config.delay_ms, 1000);

        match orig_sheet {
            Some(v) => std::env::set_var("PRICELIST_SHEET", v),
            None => std::env::remove_var("PRICELIST_SHEET"),
        }
        match orig_proxy {
            Some(v) => std::env::set_var("PRICELIST_PROXY", v),
            None => std::env::remove_var("PRICELIST_PROXY"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("PRICELIST_DELAY", v),
            None => std::env::remove_var("PRICELIST_DELAY"),
        }
    }
}
