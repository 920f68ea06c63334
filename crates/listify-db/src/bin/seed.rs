//! # Seed Data Generator
//!
//! Populates a database with sample items and saved lists for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./listify_dev.db
//! cargo run -p listify-db --bin seed
//!
//! # Specify database path
//! cargo run -p listify-db --bin seed -- --db ./data/listify.db
//!
//! # Mark every other item as bought
//! cargo run -p listify-db --bin seed -- --bought
//! ```
//!
//! ## Generated Data
//! - Live items across Dairy, Bakery, Produce, Pantry and Household
//! - Two saved lists ("Weekly Groceries", "Party") built from those items
//! - A few custom units

use std::env;

use listify_core::{ItemFilter, NewItem};
use listify_db::{Database, DbConfig};

/// Sample items: (category, [(name, quantity, unit)])
const CATALOG: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "Dairy",
        &[
            ("Milk", "1", "L"),
            ("Eggs", "1", "dozen"),
            ("Butter", "250", "g"),
            ("Greek Yogurt", "4", "pcs"),
            ("Cheddar", "200", "g"),
        ],
    ),
    (
        "Bakery",
        &[
            ("Bread", "1", "pcs"),
            ("Bagels", "6", "pcs"),
            ("Croissants", "4", "pcs"),
        ],
    ),
    (
        "Produce",
        &[
            ("Apples", "1", "kg"),
            ("Bananas", "6", "pcs"),
            ("Spinach", "1", "pack"),
            ("Tomatoes", "500", "g"),
            ("Onions", "1", "kg"),
        ],
    ),
    (
        "Pantry",
        &[
            ("Rice", "2", "kg"),
            ("Pasta", "500", "g"),
            ("Olive Oil", "1", "L"),
            ("Chips", "2", "pack"),
            ("Salsa", "1", "jar"),
        ],
    ),
    (
        "Household",
        &[
            ("Dish Soap", "1", "pcs"),
            ("Paper Towels", "1", "pack"),
            ("Trash Bags", "1", "box"),
        ],
    ),
];

const CUSTOM_UNITS: &[&str] = &["jar", "bottle", "can"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = "./listify_dev.db".to_string();
    let mut mark_bought = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--bought" | "-b" => mark_bought = true,
            "--help" | "-h" => {
                println!("Listify Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./listify_dev.db)");
                println!("  -b, --bought       Mark every other item as bought");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Listify Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating items...");

    let items = db.items();
    let mut generated = 0;

    for (category, entries) in CATALOG {
        for (name, quantity, unit) in entries.iter() {
            let mut item = items
                .insert(&NewItem::new(*name, *quantity, *unit, *category))
                .await?;

            if mark_bought && generated % 2 == 1 {
                item.is_bought = true;
                items.update(&item).await?;
            }

            generated += 1;
        }
    }

    println!("✓ Generated {} items", generated);

    println!();
    println!("Saving lists...");

    let all = items.list(&ItemFilter::All).await?;

    let weekly: Vec<_> = all
        .iter()
        .filter(|i| matches!(i.category.as_str(), "Dairy" | "Bakery" | "Produce"))
        .cloned()
        .collect();
    let weekly_id = db.lists().save_snapshot("Weekly Groceries", &weekly).await?;
    println!("  Weekly Groceries: {} items (id {})", weekly.len(), weekly_id);

    let party: Vec<_> = all
        .iter()
        .filter(|i| matches!(i.name.as_str(), "Chips" | "Salsa" | "Bagels" | "Cheddar"))
        .cloned()
        .collect();
    let party_id = db.lists().save_snapshot("Party", &party).await?;
    println!("  Party: {} items (id {})", party.len(), party_id);

    for unit in CUSTOM_UNITS {
        db.preferences().add_custom_unit(unit).await?;
    }
    println!("✓ Added {} custom units", CUSTOM_UNITS.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
