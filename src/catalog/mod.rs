//! Product catalog: the fixed list of products priced on every run.

pub mod defaults;

use serde::{Deserialize, Serialize};

/// Product family, used only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tv,
    Phone,
    AirConditioner,
}

impl Category {
    /// Looks up the category of a default catalog entry.
    pub fn of(name: &str) -> Option<Self> {
        if defaults::TVS.contains(&name) {
            Some(Category::Tv)
        } else if defaults::PHONES.contains(&name) {
            Some(Category::Phone)
        } else if defaults::AIR_CONDITIONERS.contains(&name) {
            Some(Category::AirConditioner)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Tv => write!(f, "TV"),
            Category::Phone => write!(f, "Phone"),
            Category::AirConditioner => write!(f, "Air Conditioner"),
        }
    }
}

/// A catalog entry with its fixed sheet position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name, also the search query
    pub name: String,
    /// 0-based position in the catalog (sheet data row)
    pub row: usize,
    /// Category if the product is part of the default catalog
    pub category: Option<Category>,
}

/// Ordered list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from names; positions follow the given order.
    ///
    /// Blank names are skipped but still occupy their row, so the remaining
    /// products keep the position they have in the sheet.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let products = names
            .into_iter()
            .map(Into::<String>::into)
            .enumerate()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(row, name)| {
                let category = Category::of(&name);
                Product { name, row, category }
            })
            .collect();

        Self { products }
    }

    /// The default 80-product catalog: TVs, then phones, then air conditioners.
    pub fn defaults() -> Self {
        Self::from_names(default_names())
    }

    /// Iterates products in row order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Product names in row order.
    pub fn names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Default product names in catalog order.
pub fn default_names() -> Vec<String> {
    defaults::TVS
        .iter()
        .chain(defaults::PHONES.iter())
        .chain(defaults::AIR_CONDITIONERS.iter())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_size() {
        let catalog = Catalog::defaults();
        assert_eq!(catalog.len(), 80);
        assert_eq!(catalog.iter().filter(|p| p.category == Some(Category::Tv)).count(), 20);
        assert_eq!(catalog.iter().filter(|p| p.category == Some(Category::Phone)).count(), 40);
        assert_eq!(
            catalog.iter().filter(|p| p.category == Some(Category::AirConditioner)).count(),
            20
        );
    }

    #[test]
    fn test_default_names_unique() {
        let names = default_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_rows_follow_order() {
        let catalog = Catalog::defaults();
        for (i, product) in catalog.iter().enumerate() {
            assert_eq!(product.row, i);
        }
        assert_eq!(catalog.names()[0], "Samsung 43 inch Crystal UHD 4K TV");
        assert_eq!(catalog.names()[20], "Samsung Galaxy A15 6GB 128GB");
        assert_eq!(catalog.names()[79], "Unionaire Artify 1.5 HP Cool");
    }

    #[test]
    fn test_from_names_skips_blank() {
        let catalog = Catalog::from_names(vec!["Custom Phone", "", "  ", "Other"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["Custom Phone", "Other"]);
        let rows: Vec<usize> = catalog.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![0, 3]);
        assert!(catalog.iter().all(|p| p.category.is_none()));
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(Category::of("LG 65 inch OLED Smart TV"), Some(Category::Tv));
        assert_eq!(Category::of("POCO X6 8GB 256GB"), Some(Category::Phone));
        assert_eq!(
            Category::of("Sharp Plasmacluster 1.5 HP Cool"),
            Some(Category::AirConditioner)
        );
        assert_eq!(Category::of("Toaster"), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Tv.to_string(), "TV");
        assert_eq!(Category::AirConditioner.to_string(), "Air Conditioner");
    }
}
