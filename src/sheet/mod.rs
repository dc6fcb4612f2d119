//! Spreadsheet output: one row per product, one column per store.

mod csv_sheet;

pub use csv_sheet::CsvSheet;

use crate::pricing::ProductPriceRecord;
use anyhow::Result;

/// First column header.
pub const PRODUCT_COLUMN: &str = "Product";
/// Summary column holding the winning store.
pub const CHEAPEST_STORE_COLUMN: &str = "Cheapest Store";
/// Summary column holding the winning price.
pub const CHEAPEST_PRICE_COLUMN: &str = "Cheapest Price";

/// Builds the sheet header for a store order.
pub fn header<S: AsRef<str>>(order: &[S]) -> Vec<String> {
    std::iter::once(PRODUCT_COLUMN)
        .chain(order.iter().map(|s| s.as_ref()))
        .chain([CHEAPEST_STORE_COLUMN, CHEAPEST_PRICE_COLUMN])
        .map(String::from)
        .collect()
}

/// Formats a price cell; absent prices are blank.
pub fn price_cell(price: Option<f64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}

/// Row cells after the product name: each store's price, then the summary.
pub fn record_cells(header: &[String], record: &ProductPriceRecord) -> Vec<String> {
    header
        .iter()
        .skip(1)
        .map(|column| match column.as_str() {
            CHEAPEST_STORE_COLUMN => record.cheapest_store().unwrap_or_default().to_string(),
            CHEAPEST_PRICE_COLUMN => price_cell(record.cheapest_price()),
            store => price_cell(record.price_for(store)),
        })
        .collect()
}

/// Destination for the daily price list.
///
/// Rows are addressed by the product's 0-based catalog position; the header
/// row is not counted.
pub trait SheetWriter {
    /// Makes sure the first row is `header`, clearing the sheet otherwise.
    fn ensure_header(&mut self, header: &[String]) -> Result<()>;

    /// Returns the product column, seeding it with `seed` when it is empty.
    fn ensure_products(&mut self, seed: &[String]) -> Result<Vec<String>>;

    /// Writes the store prices and the cheapest store/price of one row.
    fn write_record(&mut self, row: usize, record: &ProductPriceRecord) -> Result<()>;

    /// Persists pending changes.
    fn save(&mut self) -> Result<()>;
}
