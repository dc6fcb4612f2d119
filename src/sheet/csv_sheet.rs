//! CSV-file backed sheet.

use super::{record_cells, SheetWriter};
use crate::pricing::ProductPriceRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A sheet kept as a CSV file: header row, then one row per product.
///
/// The whole file is loaded on open and rewritten on [`SheetWriter::save`].
#[derive(Debug)]
pub struct CsvSheet {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl CsvSheet {
    /// Opens the sheet at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("Sheet {} not found, it will be created", path.display());
            return Ok(Self { path, rows: Vec::new() });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open sheet: {}", path.display()))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("Failed to read sheet: {}", path.display()))?;
            rows.push(record.iter().map(String::from).collect());
        }

        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(Self { path, rows })
    }

    /// Sheet file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header row, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Data rows, header excluded.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

impl SheetWriter for CsvSheet {
    fn ensure_header(&mut self, header: &[String]) -> Result<()> {
        if self.header() == Some(header) {
            return Ok(());
        }

        if !self.rows.is_empty() {
            info!("Sheet header does not match the store list, clearing sheet");
        }

        self.rows.clear();
        self.rows.push(header.to_vec());
        Ok(())
    }

    fn ensure_products(&mut self, seed: &[String]) -> Result<Vec<String>> {
        if self.rows.is_empty() {
            anyhow::bail!("Sheet has no header row");
        }

        let mut existing: Vec<String> =
            self.data_rows().iter().map(|r| r.first().cloned().unwrap_or_default()).collect();
        while existing.last().is_some_and(|name| name.trim().is_empty()) {
            existing.pop();
        }

        if !existing.is_empty() {
            debug!("Sheet already lists {} products", existing.len());
            return Ok(existing);
        }

        info!("Seeding sheet with {} products", seed.len());
        let width = self.width();
        self.rows.truncate(1);
        for name in seed {
            let mut row = vec![String::new(); width];
            row[0] = name.clone();
            self.rows.push(row);
        }

        Ok(seed.to_vec())
    }

    fn write_record(&mut self, row: usize, record: &ProductPriceRecord) -> Result<()> {
        let header = self.header().context("Sheet has no header row")?.to_vec();
        let cells = record_cells(&header, record);

        let line = self
            .rows
            .get_mut(row + 1)
            .with_context(|| format!("Row {} is outside the sheet", row + 1))?;

        line.resize(header.len(), String::new());
        for (cell, value) in line.iter_mut().skip(1).zip(cells) {
            *cell = value;
        }

        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;

            for row in &self.rows {
                writer.write_record(row).context("Failed to write sheet row")?;
            }
            writer.flush().context("Failed to flush sheet")?;
        }

        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace sheet: {}", self.path.display()))?;

        debug!("Saved {} rows to {}", self.rows.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{aggregate, Observations};
    use crate::sheet::header;
    use tempfile::TempDir;

    const ORDER: [&str; 3] = ["Jumia", "2B", "Noon"];

    fn seed() -> Vec<String> {
        vec!["Phone A".to_string(), "Phone B".to_string()]
    }

    fn record(product: &str, prices: &[(&str, Option<f64>)]) -> ProductPriceRecord {
        let obs: Observations = prices.iter().map(|(s, p)| (s.to_string(), *p)).collect();
        aggregate(product, &ORDER, &obs)
    }

    #[test]
    fn test_first_run_creates_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("pricelist.csv");

        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.ensure_header(&header(&ORDER)).unwrap();
        let products = sheet.ensure_products(&seed()).unwrap();
        assert_eq!(products, seed());

        sheet
            .write_record(1, &record("Phone B", &[("Jumia", Some(120.0)), ("2B", Some(115.5))]))
            .unwrap();
        sheet.save().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Product,Jumia,2B,Noon,Cheapest Store,Cheapest Price");
        assert_eq!(lines[1], "Phone A,,,,,");
        assert_eq!(lines[2], "Phone B,120,115.5,,2B,115.5");
        assert!(!path.with_extension("csv.tmp").exists());
    }

    #[test]
    fn test_existing_products_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricelist.csv");
        std::fs::write(
            &path,
            "Product,Jumia,2B,Noon,Cheapest Store,Cheapest Price\n\
             My TV,1,2,3,Jumia,1\n\
             My AC,,,,,\n",
        )
        .unwrap();

        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.ensure_header(&header(&ORDER)).unwrap();
        let products = sheet.ensure_products(&seed()).unwrap();
        assert_eq!(products, vec!["My TV", "My AC"]);

        // Previous values are replaced, not merged
        sheet.write_record(0, &record("My TV", &[("Noon", Some(900.0))])).unwrap();
        assert_eq!(sheet.data_rows()[0], vec!["My TV", "", "", "900", "Noon", "900"]);
    }

    #[test]
    fn test_mismatched_header_clears_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pricelist.csv");
        std::fs::write(&path, "Product,Amazon\nOld Product,5\n").unwrap();

        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.ensure_header(&header(&ORDER)).unwrap();

        assert_eq!(sheet.header().unwrap(), header(&ORDER).as_slice());
        assert!(sheet.data_rows().is_empty());

        let products = sheet.ensure_products(&seed()).unwrap();
        assert_eq!(products, seed());
        assert_eq!(sheet.data_rows().len(), 2);
        assert_eq!(sheet.data_rows()[0].len(), 6);
    }

    #[test]
    fn test_all_absent_written_blank() {
        let dir = TempDir::new().unwrap();
        let mut sheet = CsvSheet::open(dir.path().join("p.csv")).unwrap();
        sheet.ensure_header(&header(&ORDER)).unwrap();
        sheet.ensure_products(&seed()).unwrap();

        sheet.write_record(0, &record("Phone A", &[])).unwrap();
        assert_eq!(sheet.data_rows()[0], vec!["Phone A", "", "", "", "", ""]);
    }

    #[test]
    fn test_write_outside_sheet() {
        let dir = TempDir::new().unwrap();
        let mut sheet = CsvSheet::open(dir.path().join("p.csv")).unwrap();
        sheet.ensure_header(&header(&ORDER)).unwrap();
        sheet.ensure_products(&seed()).unwrap();

        let err = sheet.write_record(5, &record("Ghost", &[])).unwrap_err();
        assert!(err.to_string().contains("outside the sheet"));
    }

    #[test]
    fn test_products_without_header() {
        let dir = TempDir::new().unwrap();
        let mut sheet = CsvSheet::open(dir.path().join("p.csv")).unwrap();
        assert!(sheet.ensure_products(&seed()).is_err());
    }

    #[test]
    fn test_quoted_product_names_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.csv");

        let names = vec!["Samsung 55\" QLED, 4K".to_string()];
        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.ensure_header(&header(&ORDER)).unwrap();
        sheet.ensure_products(&names).unwrap();
        sheet.save().unwrap();

        let mut reopened = CsvSheet::open(&path).unwrap();
        reopened.ensure_header(&header(&ORDER)).unwrap();
        assert_eq!(reopened.ensure_products(&seed()).unwrap(), names);
    }
}
