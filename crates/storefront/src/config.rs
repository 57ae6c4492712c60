//! Tunables for a catalog page.

use search::filters::text_query::{DEFAULT_PARALLEL_THRESHOLD, TextQueryFilter};
use search::{FilterPipeline, MATCH_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Quiet period before typed query text is applied
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub debounce_ms: u64,
    pub match_threshold: f32,
    /// Catalog size at which text scoring moves to the rayon pool
    pub parallel_threshold: usize,
    /// Buffered events per subscriber before lagging ones drop events
    pub event_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            match_threshold: MATCH_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            event_capacity: 16,
        }
    }
}

impl StorefrontConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Standard pipeline with this config's text stage
    pub fn pipeline(&self) -> FilterPipeline {
        FilterPipeline::with_text_filter(TextQueryFilter::new(
            self.match_threshold,
            self.parallel_threshold,
        ))
    }
}
