//! # Catalog Controller
//!
//! Owns everything the catalog page keeps between renders:
//! 1. The loaded catalog (fetched once per load)
//! 2. The raw query text and its debouncer
//! 3. The filter state and sort mode
//! 4. Page-wide UI state driven by events (display currency, open popup)
//!
//! It mutates that state in response to input, one change at a time, and
//! re-runs the pipeline from scratch whenever results are requested.

use std::sync::Arc;
use std::time::Instant;

use catalog::{CatalogIndex, Currency, Product, ProductId};
use search::{FilterPipeline, FilterState, SortMode};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::StorefrontConfig;
use crate::debounce::{DebouncedQueries, DebouncedQuery, QueryDebouncer};
use crate::events::{EventBus, Popup, UiEvent};

/// A product as the catalog grid renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    pub currency: Currency,
    pub display_price: String,
    pub image_url: Option<String>,
    /// `(size, in_stock)` in listing order
    pub sizes: Vec<(String, bool)>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.as_ref().map(|b| b.name.clone()),
            price: product.price,
            currency: product.currency,
            display_price: product.display_price(),
            image_url: product.primary_image().map(|image| image.url.clone()),
            sizes: product
                .sizes
                .iter()
                .map(|s| (s.size.clone(), s.in_stock))
                .collect(),
        }
    }
}

/// State holder for one catalog page
pub struct CatalogController {
    catalog: Arc<CatalogIndex>,
    pipeline: FilterPipeline,
    state: FilterState,
    sort: SortMode,
    raw_query: String,
    debouncer: QueryDebouncer,
    display_currency: Option<Currency>,
    open_popup: Option<Popup>,
}

impl CatalogController {
    /// Create a controller over a loaded catalog.
    ///
    /// Debounced query values arrive on the returned receiver; feed them
    /// back through [`CatalogController::receive_query`].
    pub fn new(catalog: Arc<CatalogIndex>, config: &StorefrontConfig) -> (Self, DebouncedQueries) {
        let (debouncer, queries) = QueryDebouncer::new(config.debounce());
        let controller = Self {
            catalog,
            pipeline: config.pipeline(),
            state: FilterState::new(),
            sort: SortMode::default(),
            raw_query: String::new(),
            debouncer,
            display_currency: None,
            open_popup: None,
        };
        (controller, queries)
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Text currently in the search box (not necessarily applied yet)
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    // =========================================================================
    // Query input
    // =========================================================================

    /// Record a keystroke and restart the quiet-period timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn type_query(&mut self, raw: impl Into<String>) {
        self.raw_query = raw.into();
        self.debouncer.push(self.raw_query.clone());
    }

    /// Apply a debounced value. Stale values (superseded or cancelled by
    /// "clear all") are ignored. Returns whether the filter state changed.
    pub fn receive_query(&mut self, message: DebouncedQuery) -> bool {
        if !self.debouncer.is_current(&message) {
            debug!("Dropping stale debounced query (seq {})", message.seq);
            return false;
        }
        self.apply_query(message.query)
    }

    /// Apply query text immediately, bypassing the debouncer.
    pub fn apply_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.state.query == query {
            return false;
        }
        debug!("Applying query {:?}", query);
        self.state.query = query;
        true
    }

    // =========================================================================
    // Filter panel
    // =========================================================================

    /// Returns whether the brand is now selected
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        self.state.toggle_brand(brand)
    }

    /// Returns whether the size is now selected
    pub fn toggle_size(&mut self, size: &str) -> bool {
        self.state.toggle_size(size)
    }

    /// Free-text lower bound; anything non-numeric clears it
    pub fn set_min_price(&mut self, input: &str) {
        self.state.set_min_price_input(input);
    }

    /// Free-text upper bound; anything non-numeric clears it
    pub fn set_max_price(&mut self, input: &str) {
        self.state.set_max_price_input(input);
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// Reset every filter and the search box together.
    ///
    /// A keystroke still waiting out its quiet period is cancelled so it
    /// cannot re-apply the old query afterwards. The sort mode is kept.
    pub fn clear_all(&mut self) {
        self.debouncer.cancel();
        self.raw_query.clear();
        self.state.clear();
        info!("Cleared all catalog filters");
    }

    /// Brand options for the filter panel
    pub fn brand_options(&self) -> Vec<String> {
        self.catalog.distinct_brands()
    }

    /// Size options for the filter panel
    pub fn size_options(&self) -> Vec<String> {
        self.catalog.distinct_sizes()
    }

    // =========================================================================
    // Page-wide events
    // =========================================================================

    pub fn display_currency(&self) -> Option<Currency> {
        self.display_currency
    }

    pub fn open_popup(&self) -> Option<Popup> {
        self.open_popup
    }

    /// Open a popup and ask every other component to close theirs.
    pub fn show_popup(&mut self, popup: Popup, bus: &EventBus) {
        self.open_popup = Some(popup);
        bus.publish(UiEvent::ClosePopups { except: Some(popup) });
    }

    /// React to a page-wide event
    pub fn handle_event(&mut self, event: &UiEvent) {
        match event {
            UiEvent::CurrencyChanged(currency) => {
                self.display_currency = Some(*currency);
            }
            UiEvent::ClosePopups { except } => {
                if self.open_popup != *except {
                    self.open_popup = None;
                }
            }
        }
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Run the pipeline over the whole catalog with the current state.
    pub fn results(&self) -> Vec<&Product> {
        let start_time = Instant::now();
        let results = self
            .pipeline
            .apply(self.catalog.products(), &self.state, self.sort);
        debug!(
            "Filtered {} products down to {} in {:.2?}",
            self.catalog.len(),
            results.len(),
            start_time.elapsed()
        );
        results
    }

    /// Results converted for rendering
    pub fn result_cards(&self) -> Vec<ProductCard> {
        self.results().into_iter().map(ProductCard::from).collect()
    }
}
