//! Filter to keep only products offered in a selected size.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Product;

/// Keeps products with at least one size entry in the selection.
///
/// Stock is deliberately not consulted: an out-of-stock size still
/// matches. Stock only decides whether the size is selectable in the
/// add-to-cart control.
pub struct SizeFilter;

impl Filter for SizeFilter {
    fn name(&self) -> &str {
        "SizeFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.selected_sizes.is_empty()
    }

    fn apply<'a>(&self, candidates: Vec<&'a Product>, state: &FilterState) -> Vec<&'a Product> {
        if !self.is_active(state) {
            return candidates;
        }
        candidates
            .into_iter()
            .filter(|product| {
                product
                    .sizes
                    .iter()
                    .any(|entry| state.selected_sizes.contains(&entry.size))
            })
            .collect()
    }
}
