//! Error types for the catalog crate.
//!
//! Only loading can fail. Once a catalog is in memory every lookup is
//! infallible and returns `Option` or an empty slice.

use thiserror::Error;

/// Errors that can occur while loading a catalog export
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The export is not valid JSON for the expected shape
    ///
    /// serde_json reports the line/column itself, we add the file name.
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A product field had an invalid value
    #[error("Invalid value for {field} on product {product}: {value}")]
    InvalidValue {
        product: String,
        field: String,
        value: String,
    },

    /// Two products share the same identifier
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
