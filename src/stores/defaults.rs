//! Built-in retailer definitions.
//!
//! Update the selectors here when a store changes its search page markup.

use super::StoreSpec;

/// The default stores in sheet column order.
pub fn default_stores() -> Vec<StoreSpec> {
    vec![
        StoreSpec::new("Jumia", "https://www.jumia.com.eg/catalog/?q=", "article.prd div.prc"),
        StoreSpec::new("2B", "https://2b.com.eg/en/search?query=", ".price, .price-wrapper .price"),
        StoreSpec::new(
            "BTECH",
            "https://btech.com/en/search?q=",
            "[data-cy='product-price'], .product-card [class*=price]",
        ),
        StoreSpec::new(
            "Rizkalla",
            "https://rizkalla.com/search?q=",
            ".price, .card-product .price, .product-price",
        ),
        StoreSpec::new(
            "Carrefour",
            "https://www.carrefouregypt.com/mafegy/en/search?q=",
            "[data-test='product-price'], .product-price, .price",
        ),
        StoreSpec::new(
            "Vodafone Shop",
            "https://eshop.vodafone.com.eg/shop/search?q=",
            ".product-price, .price, [class*=price]",
        ),
        StoreSpec::new(
            "Etisalat",
            "https://www.etisalat.eg/etisalat/portal/Search?text=",
            ".price, .prd-price, [class*=price]",
        ),
        StoreSpec::new(
            "Raneen",
            "https://raneen.com/en/catalogsearch/result/?q=",
            ".price, .special-price .price, .old-price .price",
        ),
        StoreSpec::new(
            "Raya Shop",
            "https://www.rayashop.com/search?q=",
            ".price, .product-price, [class*=price]",
        ),
        StoreSpec::new(
            "Shaheen Center",
            "https://shaheen.center/en/search?q=",
            ".price, .woocommerce-Price-amount, [class*=price]",
        ),
        StoreSpec::new(
            "Noon",
            "https://www.noon.com/egypt-en/search?q=",
            "[data-qa='product-price'], .price, [class*=price]",
        ),
    ]
}
