//! Integration tests for the search pipeline.
//!
//! These tests run the standard pipeline over a realistic catalog and
//! check the behaviors buyers rely on.

use catalog::{Brand, Currency, Product, ProductStatus, SizeAvailability};
use search::{apply, score, FilterState, SortMode};

fn product(
    id: &str,
    name: &str,
    brand: Option<&str>,
    price: f64,
    sizes: &[(&str, bool)],
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        currency: Currency::Usd,
        images: vec![],
        sizes: sizes
            .iter()
            .map(|&(size, in_stock)| SizeAvailability {
                size: size.to_string(),
                in_stock,
            })
            .collect(),
        brand: brand.map(|name| Brand {
            name: name.to_string(),
            country: Some("USA".to_string()),
        }),
        status: ProductStatus::Approved,
        created_at: 0,
    }
}

/// Newest first, the way the candidate source delivers them
fn create_test_catalog() -> Vec<Product> {
    vec![
        product("hoodie", "Box Logo Hoodie", Some("Supreme"), 168.0, &[("S", true), ("M", false)]),
        product("tee", "Stock Logo Tee", Some("Stussy"), 45.0, &[("M", true), ("XL", true)]),
        product("jacket", "Detroit Jacket", Some("Carhartt WIP"), 229.0, &[("M", true)]),
        product("crew", "Tri-Ferg Crewneck", Some("Palace"), 98.0, &[("S", false)]),
        product(
            "essentials",
            "Essentials Hoodie",
            Some("Fear of God"),
            90.0,
            &[("XS", true), ("M", true)],
        ),
        product("vintage", "Vintage Washed Tee", None, 35.0, &[("M", true)]),
        product("puffer", "Nuptse Puffer Jacket", Some("The North Face"), 320.0, &[("L", true)]),
    ]
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn test_unfiltered_returns_everything_in_fetch_order() {
    let catalog = create_test_catalog();
    let result = apply(&catalog, &FilterState::new(), SortMode::Recent);

    assert_eq!(
        ids(&result),
        vec!["hoodie", "tee", "jacket", "crew", "essentials", "vintage", "puffer"]
    );
}

#[test]
fn test_typo_query_finds_hoodies() {
    let catalog = create_test_catalog();
    let state = FilterState::new().with_query("hodie");

    let result = apply(&catalog, &state, SortMode::Recent);
    assert_eq!(ids(&result), vec!["hoodie", "essentials"]);
}

#[test]
fn test_query_is_trimmed_and_case_folded() {
    let catalog = create_test_catalog();
    let state = FilterState::new().with_query("  JACKET ");

    let result = apply(&catalog, &state, SortMode::PriceDescending);
    assert_eq!(ids(&result), vec!["puffer", "jacket"]);
}

#[test]
fn test_brand_query_matches_unrelated_product_names() {
    let catalog = create_test_catalog();
    let state = FilterState::new().with_query("north face");

    let result = apply(&catalog, &state, SortMode::Recent);
    assert_eq!(ids(&result), vec!["puffer"]);
}

#[test]
fn test_combined_filters() {
    let catalog = create_test_catalog();
    let state = FilterState::new()
        .with_query("hoodie")
        .with_brands(["Supreme", "Fear of God"])
        .with_sizes(["M"])
        .with_price_range(Some(90.0), Some(200.0));

    let result = apply(&catalog, &state, SortMode::PriceAscending);
    assert_eq!(ids(&result), vec!["essentials", "hoodie"]);
}

#[test]
fn test_price_bounds_inclusive() {
    let catalog = vec![
        product("10", "A", None, 10.0, &[]),
        product("20", "B", None, 20.0, &[]),
        product("30", "C", None, 30.0, &[]),
    ];
    let state = FilterState::new().with_price_range(Some(10.0), Some(20.0));

    for mode in SortMode::ALL {
        let mut result = ids(&apply(&catalog, &state, mode));
        result.sort();
        assert_eq!(result, vec!["10", "20"]);
    }
}

#[test]
fn test_unpriced_listings_do_not_break_sorting() {
    let catalog: Vec<Product> = (0..64)
        .map(|i| {
            let price = if i % 5 == 0 { f64::NAN } else { (i * 7 % 50) as f64 };
            product(&i.to_string(), "Plain Tee", None, price, &[])
        })
        .collect();

    for mode in [SortMode::PriceAscending, SortMode::PriceDescending] {
        let result = apply(&catalog, &FilterState::new(), mode);
        assert_eq!(result.len(), 64);
        assert!(result[51..].iter().all(|p| p.price.is_nan()));
    }

    // A NaN bound set on the state directly is no bound at all
    let mut state = FilterState::new();
    state.min_price = Some(f64::NAN);
    assert_eq!(apply(&catalog, &state, SortMode::Recent).len(), 64);
}

#[test]
fn test_out_of_stock_size_still_matches() {
    let catalog = vec![
        product("only-m-sold-out", "Tee", None, 10.0, &[("M", false)]),
        product("no-m", "Tee", None, 10.0, &[("L", true)]),
    ];
    let state = FilterState::new().with_sizes(["M"]);

    let result = apply(&catalog, &state, SortMode::Recent);
    assert_eq!(ids(&result), vec!["only-m-sold-out"]);
}

#[test]
fn test_empty_catalog() {
    let catalog: Vec<Product> = vec![];
    let state = FilterState::new()
        .with_query("hoodie")
        .with_brands(["Supreme"])
        .with_sizes(["M"])
        .with_price_range(Some(1.0), Some(2.0));

    for mode in SortMode::ALL {
        assert!(apply(&catalog, &state, mode).is_empty());
    }
}

#[test]
fn test_brand_with_no_remaining_products() {
    let catalog = create_test_catalog();
    let state = FilterState::new().with_query("jacket").with_brands(["Supreme"]);

    assert!(apply(&catalog, &state, SortMode::Recent).is_empty());
}

#[test]
fn test_toggling_a_filter_off_restores_results() {
    let catalog = create_test_catalog();
    let base = FilterState::new().with_query("tee");
    let before = ids(&apply(&catalog, &base, SortMode::Recent));

    let mut state = base.clone();
    state.toggle_size("XL");
    let narrowed = ids(&apply(&catalog, &state, SortMode::Recent));
    assert_eq!(narrowed, vec!["tee"]);

    state.toggle_size("XL");
    assert_eq!(ids(&apply(&catalog, &state, SortMode::Recent)), before);
}

#[test]
fn test_clear_all_matches_initial_load() {
    let catalog = create_test_catalog();
    let initial = ids(&apply(&catalog, &FilterState::new(), SortMode::Recent));

    let mut state = FilterState::new()
        .with_query("jakcet")
        .with_brands(["Carhartt WIP"])
        .with_sizes(["M"])
        .with_price_range(Some(100.0), None);
    assert_eq!(ids(&apply(&catalog, &state, SortMode::Recent)), vec!["jacket"]);

    state.clear();
    assert_eq!(ids(&apply(&catalog, &state, SortMode::Recent)), initial);
}

#[test]
fn test_candidates_are_not_mutated() {
    let catalog = create_test_catalog();
    let snapshot = catalog.clone();
    let state = FilterState::new().with_query("tee").with_sizes(["M"]);

    let _ = apply(&catalog, &state, SortMode::PriceDescending);
    assert_eq!(catalog, snapshot);
}

#[test]
fn test_documented_scores() {
    assert_eq!(score("hoodie", "Black Hoodie"), 1.0);
    let expected = (1.0_f32 - 1.0 / 6.0) * 0.8;
    assert!((score("hodie", "hoodie") - expected).abs() < 1e-6);
}
