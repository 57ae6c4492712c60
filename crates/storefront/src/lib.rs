//! Storefront crate for the catalog browsing pages.
//!
//! This crate holds the state that lives around the pure search pipeline:
//! the catalog controller that owns filter state, the debounced query
//! input, the page-wide event bus, and the favorites list.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod events;
pub mod favorites;

pub use config::StorefrontConfig;
pub use controller::{CatalogController, ProductCard};
pub use debounce::{DebouncedQueries, DebouncedQuery, QueryDebouncer};
pub use events::{EventBus, Popup, UiEvent};
pub use favorites::Favorites;
