//! Output formatting for price records (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::pricing::ProductPriceRecord;
use crate::sheet;
use anyhow::{Context, Result};

/// Formats price records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product record.
    pub fn format_record(&self, record: &ProductPriceRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(record),
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Markdown => self.markdown_single(record),
            OutputFormat::Csv => self.csv_records(std::slice::from_ref(record)),
        }
    }

    /// Formats multiple product records.
    pub fn format_records(&self, records: &[ProductPriceRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => String::new(),
                _ => "No products priced.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    // JSON formatting

    fn json_single(&self, record: &ProductPriceRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_records(&self, records: &[ProductPriceRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, record: &ProductPriceRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("📦 {}", record.product));
        lines.push(String::new());

        match &record.cheapest {
            Some(cheapest) => {
                lines.push(format!("Best at {}: EGP {:.2}", cheapest.store, cheapest.price));
            }
            None => lines.push("No store reported a price.".to_string()),
        }
        lines.push(String::new());

        let store_width = record.prices.iter().map(|p| p.store.len()).max().unwrap_or(5);
        let cheapest_price = record.cheapest_price();

        for entry in &record.prices {
            let is_winner = record.cheapest_store() == Some(entry.store.as_str());
            let marker = if is_winner { "🏆" } else { "  " };

            let line = match (entry.price, cheapest_price) {
                (Some(price), Some(low)) if !is_winner && price > low => {
                    format!(
                        "{} {:<store_width$}  EGP {:>12.2}  (+{:.0})",
                        marker,
                        entry.store,
                        price,
                        price - low
                    )
                }
                (Some(price), _) => {
                    format!("{} {:<store_width$}  EGP {:>12.2}", marker, entry.store, price)
                }
                (None, _) => format!("{} {:<store_width$}  {:>16}", marker, entry.store, "N/A"),
            };
            lines.push(line);
        }

        if let Some(savings) = record.max_savings().filter(|s| *s > 0.0) {
            lines.push(String::new());
            lines.push(format!("💰 Max savings: EGP {:.2}", savings));
        }

        lines.join("\n")
    }

    fn table_records(&self, records: &[ProductPriceRecord]) -> String {
        let product_width = 45;
        let store_width = 16;
        let price_width = 12;
        let found_width = 6;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<product_width$}  {:<store_width$}  {:>price_width$}  {:>found_width$}",
            "Product", "Cheapest Store", "Price", "Stores"
        ));
        lines.push(format!(
            "{:-<product_width$}  {:-<store_width$}  {:->price_width$}  {:->found_width$}",
            "", "", "", ""
        ));

        for record in records {
            let product = truncate(&record.product, product_width);
            let store = record.cheapest_store().unwrap_or("-");
            let price = record
                .cheapest_price()
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "N/A".to_string());
            let found = format!("{}/{}", record.available_count(), record.prices.len());

            lines.push(format!(
                "{:<product_width$}  {:<store_width$}  {:>price_width$}  {:>found_width$}",
                product, store, price, found
            ));
        }

        let priced = records.iter().filter(|r| r.has_prices()).count();
        lines.push(String::new());
        lines.push(format!("Total: {} products, {} with prices", records.len(), priced));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, record: &ProductPriceRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", record.product));
        lines.push(String::new());

        if let Some(cheapest) = &record.cheapest {
            lines.push(format!("**Cheapest:** {} at EGP {:.2}", cheapest.store, cheapest.price));
            lines.push(String::new());
        }

        lines.push("| Store | Price |".to_string());
        lines.push("|-------|-------|".to_string());
        for entry in &record.prices {
            let price = entry.price.map(|p| format!("{:.2}", p)).unwrap_or_default();
            lines.push(format!("| {} | {} |", entry.store, price));
        }

        lines.join("\n")
    }

    fn markdown_records(&self, records: &[ProductPriceRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Product | Cheapest Store | Price |".to_string());
        lines.push("|---------|----------------|-------|".to_string());

        for record in records {
            let price = record.cheapest_price().map(|p| format!("{:.2}", p)).unwrap_or_default();
            lines.push(format!(
                "| {} | {} | {} |",
                record.product,
                record.cheapest_store().unwrap_or_default(),
                price
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products*", records.len()));

        lines.join("\n")
    }

    // CSV formatting, same layout as the sheet

    fn csv_records(&self, records: &[ProductPriceRecord]) -> String {
        Self::write_csv(records).unwrap_or_default()
    }

    fn write_csv(records: &[ProductPriceRecord]) -> Result<String> {
        let order: Vec<&str> = records[0].prices.iter().map(|p| p.store.as_str()).collect();
        let header = sheet::header(&order);

        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&header).context("Failed to write CSV header")?;

        for record in records {
            let row = std::iter::once(record.product.clone())
                .chain(sheet::record_cells(&header, record));
            writer.write_record(row).context("Failed to write CSV row")?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        let output = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
        Ok(output.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
