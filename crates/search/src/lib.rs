//! Fuzzy catalog search and the filter/sort pipeline.
//!
//! This crate provides:
//! - A typo-tolerant matcher (`score`) for query vs. text field
//! - Filter trait and implementations for text, brand, size and price
//! - FilterPipeline for composing filters and applying the final sort
//! - FilterState and SortMode, the inputs a page holds
//!
//! ## Architecture
//! Everything here is a pure function of (products, filter state, sort
//! mode). Products are borrowed, never mutated, and nothing is cached
//! between calls:
//! 1. The text filter drops products whose best field score is below 0.5
//! 2. Brand, size and price filters drop non-matching products
//! 3. The survivors are stably sorted
//!
//! ## Example Usage
//! ```ignore
//! use search::{apply, FilterState, SortMode};
//!
//! let state = FilterState::new().with_query("hodie").with_sizes(["M"]);
//! let visible = apply(index.products(), &state, SortMode::PriceAscending);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod fuzzy;
pub mod sort;
pub mod state;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use filters::text_query::MATCH_THRESHOLD;
pub use fuzzy::{best_field_score, levenshtein_distance, score};
pub use sort::{SortMode, UnknownSortMode};
pub use state::{parse_price_bound, FilterState};
pub use traits::Filter;

use catalog::Product;

/// Run the standard catalog pipeline over `candidates`.
///
/// Total: never fails. An empty collection gives an empty result and
/// identical arguments always give the identical ordered result.
pub fn apply<'a>(
    candidates: &'a [Product],
    state: &FilterState,
    sort: SortMode,
) -> Vec<&'a Product> {
    FilterPipeline::standard().apply(candidates, state, sort)
}
