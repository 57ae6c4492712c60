//! Filter to keep only the brands the buyer selected.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Product;

/// Keeps products whose brand name is one of the selected brands.
///
/// Membership is exact string equality: selections come from the same
/// collection's distinct brand names, so no normalization is needed.
/// Unbranded products never match a non-empty selection.
pub struct BrandFilter;

impl Filter for BrandFilter {
    fn name(&self) -> &str {
        "BrandFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.selected_brands.is_empty()
    }

    fn apply<'a>(&self, candidates: Vec<&'a Product>, state: &FilterState) -> Vec<&'a Product> {
        if !self.is_active(state) {
            return candidates;
        }
        candidates
            .into_iter()
            .filter(|product| state.selected_brands.contains(product.brand_name()))
            .collect()
    }
}
