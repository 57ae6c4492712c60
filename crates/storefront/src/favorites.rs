//! The buyer's favorites list.
//!
//! Favorites are stored as product ids, most recently added first. The
//! favorites page resolves them against the loaded catalog and offers the
//! same typo-tolerant search as the catalog page.

use anyhow::{Context, Result};
use catalog::{CatalogIndex, Product, ProductId};
use search::filters::TextQueryFilter;
use search::{Filter, FilterState};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<ProductId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON array of product ids, most recent first
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read favorites from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse favorites in {}", path.display()))
    }

    /// Add or remove a product. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.ids.iter().position(|fav| fav == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.insert(0, id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorited products still listed in `catalog`, most recent first.
    ///
    /// Listings that were delisted or are no longer approved are skipped.
    pub fn products<'a>(&self, catalog: &'a CatalogIndex) -> Vec<&'a Product> {
        self.ids.iter().filter_map(|id| catalog.get(id)).collect()
    }

    /// Favorites matching `query`, with the catalog's text matching rules.
    pub fn search<'a>(&self, catalog: &'a CatalogIndex, query: &str) -> Vec<&'a Product> {
        let state = FilterState::new().with_query(query);
        TextQueryFilter::default().apply(self.products(catalog), &state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Brand, Currency, ProductStatus};

    fn product(id: &str, name: &str, brand: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: 50.0,
            currency: Currency::Usd,
            images: vec![],
            sizes: vec![],
            brand: Some(Brand {
                name: brand.to_string(),
                country: None,
            }),
            status: ProductStatus::Approved,
            created_at: 0,
        }
    }

    fn catalog() -> CatalogIndex {
        CatalogIndex::from_products(vec![
            product("hoodie", "Box Logo Hoodie", "Supreme"),
            product("tee", "Stock Logo Tee", "Stussy"),
            product("jacket", "Detroit Jacket", "Carhartt WIP"),
        ])
    }

    #[test]
    fn test_toggle_orders_most_recent_first() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle("tee"));
        assert!(favorites.toggle("hoodie"));
        assert_eq!(favorites.ids(), ["hoodie", "tee"]);

        assert!(!favorites.toggle("tee"));
        assert!(!favorites.contains("tee"));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_delisted_favorites_are_skipped() {
        let index = catalog();
        let mut favorites = Favorites::new();
        favorites.toggle("jacket");
        favorites.toggle("sold-and-removed");

        let ids: Vec<&str> = favorites
            .products(&index)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["jacket"]);
    }

    #[test]
    fn test_search_uses_fuzzy_matching() {
        let index = catalog();
        let mut favorites = Favorites::new();
        favorites.toggle("hoodie");
        favorites.toggle("tee");
        favorites.toggle("jacket");

        let found: Vec<&str> = favorites
            .search(&index, "Jakcet")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(found, vec!["jacket"]);

        // Blank query lists every favorite
        assert_eq!(favorites.search(&index, " ").len(), 3);
    }

    #[test]
    fn test_json_is_a_plain_id_array() {
        let favorites: Favorites = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(favorites.ids(), ["a", "b"]);
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["a","b"]"#);
    }
}
