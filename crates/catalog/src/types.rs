//! Core domain types for the marketplace catalog.
//!
//! A `Product` is the unit everything else works on: the candidate source
//! hands out products, the search pipeline filters and orders borrowed
//! products, and the storefront renders them. Nested brand, image and
//! size data arrive inline, the way the hosted query layer joins them.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a product (a UUID string in the hosted tables)
pub type ProductId = String;

/// Unix timestamp in seconds
pub type Timestamp = i64;

// =============================================================================
// Brand
// =============================================================================

/// The brand a product is listed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    /// Country of origin, free text as entered by the seller
    #[serde(default)]
    pub country: Option<String>,
}

// =============================================================================
// Product-related Types
// =============================================================================

/// Currency a price is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Sek,
    Krw,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Sek => "SEK",
            Currency::Krw => "KRW",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd | Currency::Cad | Currency::Aud => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Chf => "CHF ",
            Currency::Sek => "kr ",
            Currency::Krw => "₩",
        }
    }

    /// Parse an ISO code, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "JPY" => Some(Currency::Jpy),
            "CAD" => Some(Currency::Cad),
            "AUD" => Some(Currency::Aud),
            "CHF" => Some(Currency::Chf),
            "SEK" => Some(Currency::Sek),
            "KRW" => Some(Currency::Krw),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Moderation state of a listing. Only approved listings reach buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// One product photo. Images are kept in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub position: u32,
}

/// A size label and whether it can currently be bought.
///
/// `in_stock` only drives per-size selectability in the add-to-cart
/// control. Size filtering ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeAvailability {
    pub size: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// A listing in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub sizes: Vec<SizeAvailability>,
    /// Listings can exist without a brand record
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Product {
    /// Brand name, or the empty string for unbranded listings
    pub fn brand_name(&self) -> &str {
        self.brand.as_ref().map(|b| b.name.as_str()).unwrap_or("")
    }

    /// First image in display order
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.iter().min_by_key(|image| image.position)
    }

    /// Size labels that can currently be bought
    pub fn in_stock_sizes(&self) -> impl Iterator<Item = &str> {
        self.sizes
            .iter()
            .filter(|s| s.in_stock)
            .map(|s| s.size.as_str())
    }

    pub fn is_approved(&self) -> bool {
        self.status == ProductStatus::Approved
    }

    /// Price formatted with its currency symbol, e.g. `$120.00`
    pub fn display_price(&self) -> String {
        match self.currency {
            Currency::Jpy | Currency::Krw => {
                format!("{}{:.0}", self.currency.symbol(), self.price)
            }
            _ => format!("{}{:.2}", self.currency.symbol(), self.price),
        }
    }
}
