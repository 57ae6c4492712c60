//! # Catalog Crate
//!
//! This crate holds the marketplace's product catalog as the browsing
//! pages see it: a list of approved listings fetched once per load.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Product, Brand, SizeAvailability, Currency)
//! - **parser**: Parse JSON catalog exports into Rust structs
//! - **source**: Candidate sources (approved, newest-first product lists)
//! - **index**: In-memory catalog plus distinct brand/size option lists
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, JsonFileSource};
//!
//! let source = JsonFileSource::new("data/catalog.json");
//! let index = CatalogIndex::load(&source)?;
//!
//! for brand in index.distinct_brands() {
//!     println!("{}", brand);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod source;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::{compare_sizes, CatalogIndex};
pub use source::{approved_newest_first, CandidateSource, JsonFileSource, StaticSource};
pub use types::{
    // Type aliases
    ProductId,
    Timestamp,
    // Core types
    Brand,
    Product,
    ProductImage,
    SizeAvailability,
    // Enums
    Currency,
    ProductStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, brand: Option<&str>, sizes: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: 50.0,
            currency: Currency::Usd,
            images: vec![],
            sizes: sizes
                .iter()
                .map(|s| SizeAvailability {
                    size: s.to_string(),
                    in_stock: true,
                })
                .collect(),
            brand: brand.map(|name| Brand {
                name: name.to_string(),
                country: None,
            }),
            status: ProductStatus::Approved,
            created_at: 0,
        }
    }

    #[test]
    fn test_empty_index() {
        let index = CatalogIndex::new();

        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
        assert!(index.distinct_brands().is_empty());
        assert!(index.distinct_sizes().is_empty());
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_lookup_by_id_keeps_fetch_order() {
        let index = CatalogIndex::from_products(vec![
            product("b", Some("Stussy"), &[]),
            product("a", Some("Palace"), &[]),
        ]);

        assert_eq!(index.products()[0].id, "b");
        assert_eq!(index.get("a").unwrap().brand_name(), "Palace");
    }

    #[test]
    fn test_distinct_brands() {
        let index = CatalogIndex::from_products(vec![
            product("1", Some("Stussy"), &[]),
            product("2", None, &[]),
            product("3", Some("Carhartt WIP"), &[]),
            product("4", Some("Stussy"), &[]),
            product("5", Some("stussy"), &[]),
        ]);

        // Exact strings, no case folding, unbranded listings skipped
        assert_eq!(
            index.distinct_brands(),
            vec!["Carhartt WIP", "Stussy", "stussy"]
        );
        assert_eq!(
            index.brand_counts(),
            vec![
                ("Carhartt WIP".to_string(), 1),
                ("Stussy".to_string(), 2),
                ("stussy".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_distinct_sizes_apparel_order() {
        let index = CatalogIndex::from_products(vec![
            product("1", None, &["XL", "M", "42"]),
            product("2", None, &["S", "9.5", "M"]),
            product("3", None, &["One Size", "XS", "10"]),
        ]);

        assert_eq!(
            index.distinct_sizes(),
            vec!["XS", "S", "M", "XL", "9.5", "10", "42", "One Size"]
        );
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::from_code("eur"), Some(Currency::Eur));
        assert_eq!(Currency::from_code("XYZ"), None);
        assert_eq!(Currency::Gbp.to_string(), "GBP");
    }

    #[test]
    fn test_display_price() {
        let mut item = product("1", None, &[]);
        item.price = 120.0;
        assert_eq!(item.display_price(), "$120.00");

        item.currency = Currency::Jpy;
        item.price = 18000.0;
        assert_eq!(item.display_price(), "¥18000");
    }
}
