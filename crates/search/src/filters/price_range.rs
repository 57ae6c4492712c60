//! Filter on an inclusive price range.

use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Product;

/// Drops products priced below `min_price` or above `max_price`.
///
/// ## Algorithm
/// 1. Missing and non-finite bounds impose nothing
/// 2. `price < min` drops, so a price equal to `min` stays
/// 3. `price > max` drops, so a price equal to `max` stays
///
/// Prices are compared as listed; currency is not converted.
pub struct PriceRangeFilter;

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        let (min_price, max_price) = bounds(state);
        min_price.is_some() || max_price.is_some()
    }

    fn apply<'a>(&self, candidates: Vec<&'a Product>, state: &FilterState) -> Vec<&'a Product> {
        let (min_price, max_price) = bounds(state);
        if min_price.is_none() && max_price.is_none() {
            return candidates;
        }
        candidates
            .into_iter()
            .filter(|product| {
                let above_min = min_price.is_none_or(|min| product.price >= min);
                let below_max = max_price.is_none_or(|max| product.price <= max);
                above_min && below_max
            })
            .collect()
    }
}

/// The usable bounds in `state`; NaN and infinite values count as absent
fn bounds(state: &FilterState) -> (Option<f64>, Option<f64>) {
    (
        state.min_price.filter(|min| min.is_finite()),
        state.max_price.filter(|max| max.is_finite()),
    )
}
