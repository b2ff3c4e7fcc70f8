//! # Seed Data Generator
//!
//! Populates the inventory store with a demo user and demo products.
//!
//! ## Usage
//! ```bash
//! # 40 products, database from STOCKROOM_DB_PATH or ./stockroom.db
//! cargo run -p stockroom-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p stockroom-db --bin seed -- --count 200 --db ./data/inv.db
//!
//! # Demo login
//! cargo run -p stockroom-db --bin seed -- --user admin --password admin
//! ```
//!
//! Quantities cycle through 0..=20 so the low-stock report always has
//! something to show.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockroom_core::ProductDraft;
use stockroom_db::{DbConfig, InventoryConfig, InventoryError, InventoryService};

/// Demo product names.
const PRODUCTS: &[&str] = &[
    "Widget",
    "Gadget",
    "Sprocket",
    "Gizmo",
    "Flange",
    "Bracket",
    "Hinge",
    "Washer",
    "Bolt",
    "Nut",
    "Spring",
    "Bearing",
    "Gasket",
    "Pulley",
    "Valve",
    "Coupling",
    "Clamp",
    "Rivet",
    "Spacer",
    "Bushing",
];

/// Size variants appended to product names.
const SIZES: &[(&str, f64)] = &[("Small", 0.0), ("Large", 1.50)];

struct Args {
    count: usize,
    db_path: Option<String>,
    user: Option<(String, String)>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args() {
        Some(args) => args,
        None => return ExitCode::SUCCESS,
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Seeding failed");
            eprintln!("✗ {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

/// Parses command line arguments. Returns `None` after printing help.
fn parse_args() -> Option<Args> {
    let args: Vec<String> = std::env::args().collect();

    let mut count = 40;
    let mut db_path = None;
    let mut username = None;
    let mut password = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = Some(value.clone());
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if let Some(value) = args.get(i + 1) {
                    username = Some(value.clone());
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if let Some(value) = args.get(i + 1) {
                    password = Some(value.clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of products to generate (default: 40)");
                println!("  -d, --db <PATH>        Database file path (default: $STOCKROOM_DB_PATH or ./stockroom.db)");
                println!("  -u, --user <NAME>      Register a demo user");
                println!("  -p, --password <PW>    Password for the demo user (default: same as name)");
                println!("  -h, --help             Show this help message");
                return None;
            }
            _ => {}
        }
        i += 1;
    }

    let user = username.map(|name| {
        let pw = password.unwrap_or_else(|| name.clone());
        (name, pw)
    });

    Some(Args {
        count,
        db_path,
        user,
    })
}

async fn run(args: Args) -> Result<(), InventoryError> {
    let mut config = match InventoryConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠ {e}; using defaults");
            InventoryConfig::default()
        }
    };
    if let Some(path) = args.db_path {
        config.db = DbConfig::new(path);
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", config.db.database_path.display());
    println!("Products: {}", args.count);
    println!();

    let service = InventoryService::new(config);
    service.initialize().await?;
    println!("✓ Store initialized");

    if let Some((username, password)) = &args.user {
        if service.register(username, password).await? {
            println!("✓ Registered user '{}'", username);
        } else {
            println!("⚠ User '{}' already exists, left unchanged", username);
        }
    }

    let existing = service.product_count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping product seed to avoid duplicates.");
    } else {
        let start = std::time::Instant::now();
        let mut generated = 0;

        for (seed, draft) in demo_products().take(args.count).enumerate() {
            service
                .add_product(&draft.name, draft.quantity, draft.price)
                .await?;
            generated += 1;

            if (seed + 1) % 100 == 0 {
                println!("  Generated {} products...", seed + 1);
            }
        }

        info!(generated = generated, elapsed = ?start.elapsed(), "Seeded products");
        println!("✓ Generated {} products in {:?}", generated, start.elapsed());
    }

    let threshold = service.config().low_stock_threshold;
    let low = service.low_stock(None).await?;

    println!();
    println!("Low stock (quantity <= {}):", threshold);
    if low.is_empty() {
        println!("  All stocks are sufficient.");
    } else {
        for product in &low {
            println!("  {}: {} in stock", product.name, product.quantity);
        }
    }

    service.close().await;

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

/// Endless stream of demo products: every name in every size, then again
/// with a numeric suffix.
fn demo_products() -> impl Iterator<Item = ProductDraft> {
    (0..).map(|seed: usize| {
        let per_round = PRODUCTS.len() * SIZES.len();
        let round = seed / per_round;
        let name = PRODUCTS[(seed / SIZES.len()) % PRODUCTS.len()];
        let (size, price_addon) = SIZES[seed % SIZES.len()];

        let full_name = if round == 0 {
            format!("{} {}", name, size)
        } else {
            format!("{} {} #{}", name, size, round + 1)
        };

        // Price: 0.99 - 19.98 plus size addon, rounded to cents
        let base = 0.99 + ((seed * 17) % 1900) as f64 / 100.0;
        let price = ((base + price_addon) * 100.0).round() / 100.0;

        let quantity = (seed * 7 % 21) as i64;

        ProductDraft::new(full_name, quantity, price)
    })
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show per-statement debug messages
/// - Default: INFO, debug for stockroom crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_products_are_valid_and_unique() {
        let drafts: Vec<_> = demo_products().take(200).collect();

        let names: HashSet<_> = drafts.iter().map(|d| d.name.clone()).collect();
        assert_eq!(names.len(), drafts.len());

        for draft in &drafts {
            assert!(draft.validate().is_ok(), "invalid draft: {draft:?}");
            assert!((0..=20).contains(&draft.quantity));
        }
    }

    #[test]
    fn test_demo_products_include_low_stock() {
        assert!(demo_products().take(40).any(|d| d.quantity <= 5));
    }
}
