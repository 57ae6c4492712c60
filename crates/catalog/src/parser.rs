//! Parser for catalog exports.
//!
//! The hosted query layer exports products as JSON with brand, images and
//! sizes joined inline. Two shapes are accepted:
//! - a bare array: `[ {product}, ... ]`
//! - an envelope: `{ "products": [ {product}, ... ] }`
//!
//! Parsing is strict: a malformed row fails the whole load, since a
//! partially loaded catalog would silently hide listings from buyers.

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogExport {
    Bare(Vec<Product>),
    Envelope { products: Vec<Product> },
}

impl CatalogExport {
    fn into_products(self) -> Vec<Product> {
        match self {
            CatalogExport::Bare(products) => products,
            CatalogExport::Envelope { products } => products,
        }
    }
}

/// Parse a catalog export file
pub fn parse_products(path: &Path) -> Result<Vec<Product>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_products_str(&file, &content)
}

/// Parse catalog JSON that is already in memory.
///
/// `file` is only used to label errors.
pub fn parse_products_str(file: &str, content: &str) -> Result<Vec<Product>> {
    let export: CatalogExport =
        serde_json::from_str(content).map_err(|source| CatalogError::ParseError {
            file: file.to_string(),
            source,
        })?;
    let products = export.into_products();
    validate_products(&products)?;
    debug!("Parsed {} products from {}", products.len(), file);
    Ok(products)
}

fn validate_products(products: &[Product]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(products.len());
    for product in products {
        if product.id.trim().is_empty() {
            return Err(CatalogError::InvalidValue {
                product: product.name.clone(),
                field: "id".to_string(),
                value: product.id.clone(),
            });
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CatalogError::InvalidValue {
                product: product.id.clone(),
                field: "price".to_string(),
                value: product.price.to_string(),
            });
        }
        if !seen.insert(product.id.as_str()) {
            return Err(CatalogError::DuplicateProduct(product.id.clone()));
        }
    }
    Ok(())
}
