use catalog::{CatalogIndex, JsonFileSource};
use std::time::Instant;

fn main() {
    let source = JsonFileSource::new("data/catalog.json");

    println!("Loading catalog from {}...\n", source.path().display());

    let start = Instant::now();
    let index = CatalogIndex::load(&source).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Products: {}", index.len());
    println!("Brands: {}", index.distinct_brands().join(", "));
    println!("Sizes: {}", index.distinct_sizes().join(", "));
}
