//! Filter on typo-tolerant text relevance.
//!
//! Each product is scored against the query on its brand name and its
//! product name; the better of the two must reach the threshold.

use crate::fuzzy::best_field_score;
use crate::state::FilterState;
use crate::traits::Filter;
use catalog::Product;
use rayon::prelude::*;

/// Minimum best-field score for a product to stay in the results.
///
/// Admits prefix and one- or two-typo matches, rejects weak overlaps.
pub const MATCH_THRESHOLD: f32 = 0.5;

/// Collections at least this large are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// Drops products whose best field score is below the threshold.
///
/// ## Algorithm
/// 1. Normalize the query (trim, lower-case); empty means pass-through
/// 2. Score brand name and product name, keep the max
/// 3. Keep products scoring at least `threshold`
///
/// Large collections are scored in parallel. Rayon's indexed collect keeps
/// the input order, so the output is identical to the sequential pass.
pub struct TextQueryFilter {
    threshold: f32,
    parallel_threshold: usize,
}

impl TextQueryFilter {
    /// Create a new TextQueryFilter.
    ///
    /// # Arguments
    /// * `threshold` - Minimum best-field score (product default: 0.5)
    /// * `parallel_threshold` - Collection size at which scoring goes parallel
    pub fn new(threshold: f32, parallel_threshold: usize) -> Self {
        Self {
            threshold,
            parallel_threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for TextQueryFilter {
    fn default() -> Self {
        Self::new(MATCH_THRESHOLD, DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl Filter for TextQueryFilter {
    fn name(&self) -> &str {
        "TextQueryFilter"
    }

    fn is_active(&self, state: &FilterState) -> bool {
        !state.normalized_query().is_empty()
    }

    fn apply<'a>(&self, candidates: Vec<&'a Product>, state: &FilterState) -> Vec<&'a Product> {
        let query = state.normalized_query();
        if query.is_empty() {
            return candidates;
        }

        let keep = |product: &&'a Product| best_field_score(&query, product) >= self.threshold;

        if candidates.len() >= self.parallel_threshold {
            candidates.into_par_iter().filter(keep).collect()
        } else {
            candidates.into_iter().filter(keep).collect()
        }
    }
}
