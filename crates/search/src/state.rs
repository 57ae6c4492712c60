//! Filter state: what the buyer has selected in the filter panel.
//!
//! A plain value object. The storefront owns one and mutates it in
//! response to input; the pipeline only ever reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Debounced query text, as typed (normalized when applied)
    pub query: String,
    /// Exact brand names, as offered by `CatalogIndex::distinct_brands`
    pub selected_brands: BTreeSet<String>,
    pub selected_sizes: BTreeSet<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price_range(mut self, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        self.min_price = min_price.filter(|p| p.is_finite());
        self.max_price = max_price.filter(|p| p.is_finite());
        self
    }

    /// Query as the matcher expects it: trimmed and lower-cased.
    ///
    /// An empty result means the text stage is skipped.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Select or deselect a brand. Returns whether it is now selected.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        toggle(&mut self.selected_brands, brand)
    }

    /// Select or deselect a size. Returns whether it is now selected.
    pub fn toggle_size(&mut self, size: &str) -> bool {
        toggle(&mut self.selected_sizes, size)
    }

    /// Set the lower bound from free text; non-numeric text clears it.
    pub fn set_min_price_input(&mut self, input: &str) {
        self.min_price = parse_price_bound(input);
    }

    /// Set the upper bound from free text; non-numeric text clears it.
    pub fn set_max_price_input(&mut self, input: &str) {
        self.max_price = parse_price_bound(input);
    }

    /// Reset every field at once
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no stage of the pipeline would drop anything
    pub fn is_unfiltered(&self) -> bool {
        self.normalized_query().is_empty()
            && self.selected_brands.is_empty()
            && self.selected_sizes.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}

/// Parse a price bound typed by the buyer.
///
/// Blank, non-numeric, NaN and infinite input all mean "no bound".
pub fn parse_price_bound(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}
