//! pricelist-updater - Daily cheapest-store price list for Egyptian electronics retailers
//!
//! Scrapes store search pages with TLS fingerprint emulation and keeps a CSV price sheet.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pricelist_updater::catalog::Catalog;
use pricelist_updater::commands::{CheckCommand, UpdateCommand};
use pricelist_updater::config::{Config, OutputFormat};
use pricelist_updater::format::Formatter;
use pricelist_updater::pricing::normalize_str;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricelist-updater",
    version,
    about = "Daily cheapest-store price list for electronics retailers",
    long_about = "Scrapes store search pages for a fixed product catalog, picks the cheapest store per product and writes a CSV price sheet."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Price sheet file (CSV)
    #[arg(short, long, global = true)]
    sheet: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every product and rewrite the price sheet
    #[command(alias = "u")]
    Update {
        /// Print the updated records after the run
        #[arg(long)]
        report: bool,
    },

    /// Check one product across all stores without touching the sheet
    #[command(alias = "c")]
    Check {
        /// Product name, used as the search query
        product: String,
    },

    /// List the configured stores in column order
    Stores,

    /// List the product catalog
    Products,

    /// Show how a raw price string is normalized
    Normalize {
        /// Raw price text, e.g. "EGP 1,250.00"
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(sheet) = cli.sheet {
        config.sheet_path = sheet;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Update { report } => {
            let format = config.format;
            let cmd = UpdateCommand::new(config);
            let summary = cmd.execute().await?;

            if report {
                println!("{}", Formatter::new(format).format_records(&summary.records));
                println!();
            }
            println!("{}", summary);

            if !summary.failed.is_empty() {
                eprintln!("Failed rows: {}", summary.failed.join(", "));
            }
        }

        Commands::Check { product } => {
            let cmd = CheckCommand::new(config);
            let output = cmd.execute(&product).await?;
            println!("{}", output);
        }

        Commands::Stores => {
            let stores = config.store_set()?;

            println!("{:<4} {:<16} {}", "#", "Store", "Search URL");
            println!("{:-<4} {:-<16} {:-<40}", "", "", "");

            for (i, store) in stores.iter().enumerate() {
                println!("{:<4} {:<16} {}", i + 1, store.name(), store.spec().search_url);
            }
        }

        Commands::Products => {
            let catalog = Catalog::from_names(config.seed_products());

            println!("{:<4} {:<16} {}", "Row", "Category", "Product");
            println!("{:-<4} {:-<16} {:-<40}", "", "", "");

            for product in catalog.iter() {
                let category = product.category.map(|c| c.to_string());
                println!(
                    "{:<4} {:<16} {}",
                    product.row + 1,
                    category.as_deref().unwrap_or("-"),
                    product.name
                );
            }
        }

        Commands::Normalize { text } => match normalize_str(&text) {
            Some(value) => println!("{}", value),
            None => println!("(absent)"),
        },
    }

    Ok(())
}
