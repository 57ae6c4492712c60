//! Candidate sources.
//!
//! A candidate source stands in for the hosted query layer: it returns
//! the approved listings, newest first. The search pipeline never talks
//! to a source directly; it only sees the slice the source produced.

use crate::error::Result;
use crate::parser;
use crate::types::Product;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can produce the approved, newest-first product list.
pub trait CandidateSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch approved products ordered by creation time, newest first.
    fn fetch_approved(&self) -> Result<Vec<Product>>;
}

/// Keep approved listings and order them newest first.
///
/// The sort is stable so listings created in the same second keep their
/// export order.
pub fn approved_newest_first(products: Vec<Product>) -> Vec<Product> {
    let total = products.len();
    let mut approved: Vec<Product> = products
        .into_iter()
        .filter(|product| product.is_approved())
        .collect();
    approved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    debug!(
        "Kept {} approved products out of {} exported",
        approved.len(),
        total
    );
    approved
}

/// Reads a JSON catalog export from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandidateSource for JsonFileSource {
    fn name(&self) -> &str {
        "JsonFileSource"
    }

    fn fetch_approved(&self) -> Result<Vec<Product>> {
        let products = parser::parse_products(&self.path)?;
        Ok(approved_newest_first(products))
    }
}

/// Serves a fixed in-memory product list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Vec<Product>,
}

impl StaticSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CandidateSource for StaticSource {
    fn name(&self) -> &str {
        "StaticSource"
    }

    fn fetch_approved(&self) -> Result<Vec<Product>> {
        Ok(approved_newest_first(self.products.clone()))
    }
}
