//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to a product collection.

use crate::state::FilterState;
use catalog::Product;

/// Core trait for filtering products.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters work on borrowed products: the collection belongs to the page
///   and is never mutated by a filter pass
/// - A filter whose part of the state is empty must return its input
///   unchanged, so clearing a selection restores exactly what it removed
/// - Filtering is total; there is no error path
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `state` gives this filter anything to do
    fn is_active(&self, state: &FilterState) -> bool;

    /// Apply this filter to a set of products.
    ///
    /// # Arguments
    /// * `candidates` - The products to filter, in display order
    /// * `state` - The buyer's current selections
    ///
    /// # Returns
    /// The surviving products, relative order preserved
    fn apply<'a>(&self, candidates: Vec<&'a Product>, state: &FilterState) -> Vec<&'a Product>;
}
