use anyhow::{anyhow, Context, Result};
use catalog::{CatalogIndex, Currency, JsonFileSource};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::Rng;
use search::{score, FilterState, SortMode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use storefront::{
    CatalogController, EventBus, Favorites, Popup, ProductCard, StorefrontConfig, UiEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Catalog search for the streetwear marketplace
#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(
    about = "Typo-tolerant catalog search with brand, size and price filters",
    long_about = None
)]
struct Cli {
    /// Path to the catalog export (JSON)
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Search {
        /// Free-text query, matched against brand and product names
        #[arg(long, default_value = "")]
        query: String,

        /// Brand to include (repeatable, exact name)
        #[arg(long = "brand")]
        brands: Vec<String>,

        /// Size to include (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// Minimum price, inclusive (non-numeric means no bound)
        #[arg(long, default_value = "")]
        min_price: String,

        /// Maximum price, inclusive (non-numeric means no bound)
        #[arg(long, default_value = "")]
        max_price: String,

        /// recent, price-asc or price-desc
        #[arg(long, default_value = "recent")]
        sort: SortMode,

        /// Maximum number of results to print
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List brands with their listing counts
    Brands,

    /// List the sizes offered across the catalog
    Sizes,

    /// Show the match score of a query against a piece of text
    Score {
        #[arg(long)]
        query: String,

        #[arg(long)]
        text: String,
    },

    /// Show (and optionally search) a favorites list
    Favorites {
        /// JSON array of product ids, most recent first
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value = "")]
        query: String,
    },

    /// Browse interactively; typed text is debounced like the search box
    Interactive {
        /// Quiet period before typed text is applied
        #[arg(long, default_value = "150")]
        debounce_ms: u64,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of pipeline runs
        #[arg(long, default_value = "1000")]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search {
            query,
            brands,
            sizes,
            min_price,
            max_price,
            sort,
            limit,
            json,
        } => {
            let mut state = FilterState::new()
                .with_query(query)
                .with_brands(brands)
                .with_sizes(sizes);
            state.set_min_price_input(&min_price);
            state.set_max_price_input(&max_price);
            handle_search(load_catalog(&cli.catalog)?, state, sort, limit, json)?
        }
        Commands::Brands => handle_brands(&*load_catalog(&cli.catalog)?),
        Commands::Sizes => handle_sizes(&*load_catalog(&cli.catalog)?),
        Commands::Score { query, text } => handle_score(&query, &text)?,
        Commands::Favorites { file, query } => {
            handle_favorites(&*load_catalog(&cli.catalog)?, file, &query)?
        }
        Commands::Interactive { debounce_ms } => {
            handle_interactive(load_catalog(&cli.catalog)?, debounce_ms).await?
        }
        Commands::Benchmark { iterations } => {
            handle_benchmark(load_catalog(&cli.catalog)?, iterations)?
        }
    }

    Ok(())
}

/// Load the approved, newest-first catalog from an export file
fn load_catalog(path: &Path) -> Result<Arc<CatalogIndex>> {
    let start = Instant::now();
    let source = JsonFileSource::new(path);
    let catalog = CatalogIndex::load(&source)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
    info!("Loaded {} products in {:?}", catalog.len(), start.elapsed());
    Ok(Arc::new(catalog))
}

/// Handle the 'search' command
fn handle_search(
    catalog: Arc<CatalogIndex>,
    state: FilterState,
    sort: SortMode,
    limit: usize,
    json: bool,
) -> Result<()> {
    let known_brands = catalog.distinct_brands();
    for brand in &state.selected_brands {
        if !known_brands.contains(brand) {
            warn!("No listings for brand {:?} (see the 'brands' command for exact names)", brand);
        }
    }

    let results = search::apply(catalog.products(), &state, sort);
    let cards: Vec<ProductCard> = results
        .into_iter()
        .take(limit)
        .map(ProductCard::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        print_cards(&cards, None);
    }
    Ok(())
}

/// Handle the 'brands' command
fn handle_brands(catalog: &CatalogIndex) {
    println!("{}", "Brands:".bold().blue());
    for (brand, count) in catalog.brand_counts() {
        println!("  {} {} ({} listings)", "•".green(), brand, count);
    }
}

/// Handle the 'sizes' command
fn handle_sizes(catalog: &CatalogIndex) {
    println!("{}", "Sizes:".bold().blue());
    println!("  {}", catalog.distinct_sizes().join(", "));
}

/// Handle the 'score' command
fn handle_score(query: &str, text: &str) -> Result<()> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(anyhow!("Query must not be blank"));
    }
    let value = score(&normalized, text);
    let verdict = if value >= search::MATCH_THRESHOLD {
        "match".green()
    } else {
        "no match".red()
    };
    println!("score({:?}, {:?}) = {:.4} [{}]", normalized, text, value, verdict);
    Ok(())
}

/// Handle the 'favorites' command
fn handle_favorites(catalog: &CatalogIndex, file: PathBuf, query: &str) -> Result<()> {
    let favorites = Favorites::load(&file)?;
    let found = favorites.search(catalog, query);
    let missing = favorites.len() - favorites.products(catalog).len();

    let cards: Vec<ProductCard> = found.into_iter().map(ProductCard::from).collect();
    print_cards(&cards, None);
    if missing > 0 {
        println!("{}", format!("{} favorites are no longer listed", missing).dimmed());
    }
    Ok(())
}

/// Handle the 'interactive' command
async fn handle_interactive(catalog: Arc<CatalogIndex>, debounce_ms: u64) -> Result<()> {
    let config = StorefrontConfig {
        debounce_ms,
        ..StorefrontConfig::default()
    };
    let (mut controller, mut queries) = CatalogController::new(catalog, &config);
    let bus = EventBus::new(config.event_capacity);
    let mut events = bus.subscribe();

    print_help();
    print_cards(&controller.result_cards(), controller.display_currency());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if !handle_line(&mut controller, &bus, line.trim_end()) {
                    break;
                }
            }
            Some(message) = queries.recv() => {
                if controller.receive_query(message) {
                    print_cards(&controller.result_cards(), controller.display_currency());
                }
            }
            Ok(event) = events.recv() => {
                controller.handle_event(&event);
            }
        }
    }
    Ok(())
}

/// Apply one line of interactive input. Returns false to quit.
fn handle_line(controller: &mut CatalogController, bus: &EventBus, line: &str) -> bool {
    let Some(command) = line.strip_prefix(':') else {
        // Plain text is the search box content
        controller.type_query(line);
        return true;
    };

    let (name, argument) = match command.split_once(' ') {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };
    match name {
        "brand" => {
            controller.show_popup(Popup::FilterPanel, bus);
            controller.toggle_brand(argument);
        }
        "size" => {
            controller.show_popup(Popup::FilterPanel, bus);
            controller.toggle_size(argument);
        }
        "min" => controller.set_min_price(argument),
        "max" => controller.set_max_price(argument),
        "sort" => match argument.parse::<SortMode>() {
            Ok(sort) => {
                controller.show_popup(Popup::SortMenu, bus);
                controller.set_sort(sort);
            }
            Err(err) => {
                println!("{}", err.to_string().red());
                return true;
            }
        },
        "currency" => match Currency::from_code(argument) {
            Some(currency) => {
                bus.publish(UiEvent::CurrencyChanged(currency));
                println!("Display currency set to {}", currency);
                return true;
            }
            None => {
                println!("{}", format!("Unknown currency {:?}", argument).red());
                return true;
            }
        },
        "brands" => {
            println!("{}", controller.brand_options().join(", "));
            return true;
        }
        "sizes" => {
            println!("{}", controller.size_options().join(", "));
            return true;
        }
        "clear" => controller.clear_all(),
        "help" => {
            print_help();
            return true;
        }
        "quit" | "q" => return false,
        other => {
            println!("{}", format!("Unknown command :{}", other).red());
            return true;
        }
    }

    print_cards(&controller.result_cards(), controller.display_currency());
    true
}

/// Handle the 'benchmark' command
fn handle_benchmark(catalog: Arc<CatalogIndex>, iterations: usize) -> Result<()> {
    if catalog.is_empty() {
        return Err(anyhow!("Catalog is empty, nothing to benchmark"));
    }
    let iterations = iterations.max(1);

    // Queries are product name tokens with one pair of letters swapped
    let mut rng = rand::rng();
    let queries: Vec<String> = (0..iterations)
        .map(|_| {
            let product = &catalog.products()[rng.random_range(0..catalog.len())];
            let tokens: Vec<&str> = product.name.split_whitespace().collect();
            let token = tokens
                .get(rng.random_range(0..tokens.len().max(1)))
                .copied()
                .unwrap_or("");
            let mut chars: Vec<char> = token.to_lowercase().chars().collect();
            if chars.len() >= 3 {
                let i = rng.random_range(0..chars.len() - 1);
                chars.swap(i, i + 1);
            }
            chars.into_iter().collect()
        })
        .collect();

    let mut timings = Vec::with_capacity(iterations);
    let mut total_results = 0usize;
    for query in &queries {
        let state = FilterState::new().with_query(query.as_str());
        let start = Instant::now();
        let results = search::apply(catalog.products(), &state, SortMode::PriceAscending);
        timings.push(start.elapsed());
        total_results += results.len();
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Catalog size: {}", catalog.len());
    println!("Runs: {}", iterations);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!(
        "Average results per query: {:.2}",
        total_results as f64 / iterations as f64
    );

    Ok(())
}

fn print_help() {
    println!("{}", "Type to search. Commands:".bold().blue());
    println!("  :brand NAME   toggle a brand        :size SIZE    toggle a size");
    println!("  :min PRICE    minimum price         :max PRICE    maximum price");
    println!("  :sort MODE    recent|price-asc|price-desc");
    println!("  :currency CODE  display currency    :brands / :sizes  list options");
    println!("  :clear        reset everything      :quit");
}

/// Helper function to format and print product cards
fn print_cards(cards: &[ProductCard], display_currency: Option<Currency>) {
    println!("{}", format!("{} products:", cards.len()).bold().blue());
    for (rank, card) in cards.iter().enumerate() {
        let sizes = card
            .sizes
            .iter()
            .map(|(size, in_stock)| {
                if *in_stock {
                    size.normal().to_string()
                } else {
                    size.dimmed().strikethrough().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let listed_in = match display_currency {
            Some(currency) if currency != card.currency => {
                format!(" (listed in {})", card.currency).dimmed().to_string()
            }
            _ => String::new(),
        };
        println!(
            "{}. {} {} - {}{} [{}]",
            (rank + 1).to_string().green(),
            card.brand.as_deref().unwrap_or("Unbranded").bold(),
            card.name,
            card.display_price,
            listed_in,
            sizes
        );
    }
}
