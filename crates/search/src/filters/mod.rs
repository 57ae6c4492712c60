//! Filter implementations for the catalog pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod brand;
pub mod price_range;
pub mod size;
pub mod text_query;

// Re-export for convenience
pub use brand::BrandFilter;
pub use price_range::PriceRangeFilter;
pub use size::SizeFilter;
pub use text_query::TextQueryFilter;

#[cfg(test)]
pub(crate) mod fixtures {
    use catalog::{Brand, Currency, Product, ProductStatus, SizeAvailability};

    /// Product with the given brand, price and `(size, in_stock)` pairs
    pub fn product(
        id: &str,
        name: &str,
        brand: Option<&str>,
        price: f64,
        sizes: &[(&str, bool)],
    ) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price,
            currency: Currency::Usd,
            images: vec![],
            sizes: sizes
                .iter()
                .map(|&(size, in_stock)| SizeAvailability {
                    size: size.to_string(),
                    in_stock,
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

    pub fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }
}
