//! Result ordering, applied after every filter.

use catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the filtered list is ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep arrival order. The candidate source already returns the
    /// newest listings first.
    #[default]
    Recent,
    #[serde(rename = "price-asc")]
    PriceAscending,
    #[serde(rename = "price-desc")]
    PriceDescending,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown sort mode: {0} (expected recent, price-asc or price-desc)")]
pub struct UnknownSortMode(pub String);

impl SortMode {
    pub const ALL: [SortMode; 3] = [
        SortMode::Recent,
        SortMode::PriceAscending,
        SortMode::PriceDescending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::PriceAscending => "price-asc",
            SortMode::PriceDescending => "price-desc",
        }
    }

    /// Comparator for this mode. `Recent` reports every pair as equal.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortMode::Recent => Ordering::Equal,
            SortMode::PriceAscending => {
                nan_last(a.price, b.price).then(a.price.total_cmp(&b.price))
            }
            SortMode::PriceDescending => {
                nan_last(a.price, b.price).then(b.price.total_cmp(&a.price))
            }
        }
    }

    /// Stable sort in place; ties keep their incoming order.
    pub fn sort(&self, products: &mut [&Product]) {
        if *self == SortMode::Recent {
            return;
        }
        products.sort_by(|a, b| self.compare(a, b));
    }
}

/// Unpriced (NaN) listings go to the end in either direction
fn nan_last(a: f64, b: f64) -> Ordering {
    a.is_nan().cmp(&b.is_nan())
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" | "newest" => Ok(SortMode::Recent),
            "price-asc" | "price_asc" | "price-ascending" => Ok(SortMode::PriceAscending),
            "price-desc" | "price_desc" | "price-descending" => Ok(SortMode::PriceDescending),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}
