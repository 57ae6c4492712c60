//! The in-memory catalog held by a page for the duration of a load.
//!
//! `CatalogIndex` owns the fetched products in fetch order (newest first)
//! and derives the option lists the filter panel offers: distinct brands
//! and distinct sizes.

use crate::error::Result;
use crate::source::CandidateSource;
use crate::types::*;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Products fetched once per load, plus a lookup by id.
#[derive(Debug, Default, Clone)]
pub struct CatalogIndex {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over products that are already approved and ordered.
    pub fn from_products(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();
        Self { products, by_id }
    }

    /// Fetch from a candidate source and index the result.
    pub fn load(source: &dyn CandidateSource) -> Result<Self> {
        let products = source.fetch_approved()?;
        info!(
            "Loaded {} products from {}",
            products.len(),
            source.name()
        );
        Ok(Self::from_products(products))
    }

    /// All products in fetch order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&position| &self.products[position])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct non-empty brand names, alphabetically.
    ///
    /// These are the exact strings the brand filter compares against, so
    /// no normalization is applied.
    pub fn distinct_brands(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|product| product.brand_name())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of listings per brand, in `distinct_brands` order
    pub fn brand_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in &self.products {
            let name = product.brand_name();
            if !name.is_empty() {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
        self.distinct_brands()
            .into_iter()
            .map(|name| {
                let count = counts.get(name.as_str()).copied().unwrap_or(0);
                (name, count)
            })
            .collect()
    }

    /// Distinct size labels in apparel order: letter sizes from XXS to
    /// XXXL, then numeric sizes ascending, then anything else alphabetically.
    pub fn distinct_sizes(&self) -> Vec<String> {
        let mut sizes: Vec<String> = self
            .products
            .iter()
            .flat_map(|product| product.sizes.iter().map(|s| s.size.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        sizes.sort_by(|a, b| compare_sizes(a, b));
        sizes
    }
}

const LETTER_SIZES: [&str; 9] = ["XXS", "XS", "S", "M", "L", "XL", "XXL", "XXXL", "OS"];

#[derive(PartialEq, PartialOrd)]
enum SizeKey<'a> {
    Letter(usize),
    Numeric(f64),
    Other(&'a str),
}

fn size_key(size: &str) -> SizeKey<'_> {
    let upper = size.trim().to_ascii_uppercase();
    if let Some(rank) = LETTER_SIZES.iter().position(|&s| s == upper) {
        return SizeKey::Letter(rank);
    }
    match size.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => SizeKey::Numeric(n),
        _ => SizeKey::Other(size),
    }
}

/// Ordering used for size option lists
pub fn compare_sizes(a: &str, b: &str) -> Ordering {
    size_key(a)
        .partial_cmp(&size_key(b))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.cmp(b))
}
