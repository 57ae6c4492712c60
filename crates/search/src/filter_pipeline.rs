//! The FilterPipeline orchestrates filters and the final sort.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{BrandFilter, PriceRangeFilter, SizeFilter, TextQueryFilter};
use crate::sort::SortMode;
use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Product;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// The pipeline holds no state between calls: every `apply` is a fresh
/// pass over the whole collection. Cost is one matcher evaluation per
/// product and field when a query is set (each evaluation is
/// O(|query| × |token|) per token), plus O(n log n) for a price sort.
/// Catalog pages hold at most a few thousand listings, which keeps a full
/// pass well under a frame.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TextQueryFilter::default())
///     .add_filter(BrandFilter)
///     .add_filter(SizeFilter)
///     .add_filter(PriceRangeFilter);
///
/// let visible = pipeline.apply(index.products(), &state, SortMode::PriceAscending);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The catalog pipeline: text, brand, size, then price.
    pub fn standard() -> Self {
        Self::with_text_filter(TextQueryFilter::default())
    }

    /// The catalog pipeline with a custom text stage.
    pub fn with_text_filter(text_filter: TextQueryFilter) -> Self {
        Self::new()
            .add_filter(text_filter)
            .add_filter(BrandFilter)
            .add_filter(SizeFilter)
            .add_filter(PriceRangeFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Apply all filters in sequence, without sorting.
    pub fn filter<'a>(&self, candidates: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
        let mut current: Vec<&'a Product> = candidates.iter().collect();
        for filter in &self.filters {
            if !filter.is_active(state) {
                continue;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, state);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Apply all filters in sequence, then sort.
    ///
    /// ## Algorithm
    /// 1. Start with every product, in the order given
    /// 2. For each filter with something to do:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Stable-sort the survivors by `sort`
    ///
    /// # Arguments
    /// * `candidates` - Products as delivered by the candidate source
    /// * `state` - The buyer's selections
    /// * `sort` - Display order
    ///
    /// # Returns
    /// Borrowed products, ready to render
    pub fn apply<'a>(
        &self,
        candidates: &'a [Product],
        state: &FilterState,
        sort: SortMode,
    ) -> Vec<&'a Product> {
        let mut current = self.filter(candidates, state);
        sort.sort(&mut current);
        tracing::debug!("Sorted {} products by {}", current.len(), sort);
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::fixtures::{ids, product};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let items = vec![
            product("1", "Hoodie", None, 10.0, &[]),
            product("2", "Tee", None, 20.0, &[]),
        ];
        let state = FilterState::new().with_query("jacket");

        let filtered = pipeline.apply(&items, &state, SortMode::Recent);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(BrandFilter);
        let items = vec![
            product("1", "Hoodie", Some("Supreme"), 10.0, &[]),
            product("2", "Tee", Some("Stussy"), 20.0, &[]),
        ];
        let state = FilterState::new().with_brands(["Stussy"]);

        let filtered = pipeline.apply(&items, &state, SortMode::Recent);
        assert_eq!(ids(&filtered), vec!["2"]);
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            FilterPipeline::standard().filter_names(),
            vec!["TextQueryFilter", "BrandFilter", "SizeFilter", "PriceRangeFilter"]
        );
    }

    #[test]
    fn test_sort_runs_after_filters() {
        let items = vec![
            product("1", "Black Hoodie", None, 80.0, &[("M", true)]),
            product("2", "Grey Hoodie", None, 40.0, &[("M", false)]),
            product("3", "Hoodie Dress", None, 60.0, &[("S", true)]),
            product("4", "Plain Tee", None, 10.0, &[("M", true)]),
        ];
        let state = FilterState::new().with_query("hoodie").with_sizes(["M"]);

        let filtered = FilterPipeline::standard().apply(&items, &state, SortMode::PriceAscending);
        assert_eq!(ids(&filtered), vec!["2", "1"]);
    }
}
