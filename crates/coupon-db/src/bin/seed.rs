//! # Seed Data Generator
//!
//! Populates a coupon database with demo coupons for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./coupons_dev.db (default)
//! cargo run -p coupon-db --bin seed
//!
//! # Specify database path
//! cargo run -p coupon-db --bin seed -- --db ./data/coupons.db
//! ```

use coupon_core::{Coupon, Money};
use coupon_db::{CouponStore, Database, DbConfig, DbError};
use std::env;

/// Demo coupons: (code, discount cents, min basket cents)
const DEMO_COUPONS: &[(&str, i64, i64)] = &[
    ("1111", 1000, 5000),
    ("1234", 500, 2000),
    ("spring10", 1000, 10000),
    ("welcome5", 500, 0),
    ("bigspender", 2500, 20000),
];

/// Inserts every demo coupon, skipping codes already present.
///
/// Returns `(inserted, failed)`.
async fn seed_demo_coupons(store: &dyn CouponStore) -> (usize, usize) {
    let mut inserted = 0;
    let mut failed = 0;
    for (code, discount, min) in DEMO_COUPONS {
        let coupon = Coupon::new(*code, Money::from_minor(*discount), Money::from_minor(*min));

        match store.save(&coupon).await {
            Ok(_) => {
                inserted += 1;
                println!("  + {} (discount {}, min {})", code, coupon.discount, coupon.min_basket_value);
            }
            Err(DbError::UniqueViolation { .. }) => println!("  = {} already present", code),
            Err(e) => {
                failed += 1;
                eprintln!("  ! {} failed: {}", code, e);
            }
        }
    }
    (inserted, failed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./coupons_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Coupon Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./coupons_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Coupon Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let repo = db.coupons();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let (inserted, failed) = seed_demo_coupons(&repo).await;

    println!();
    println!("✓ Inserted {} coupons ({} total)", inserted, repo.count().await?);

    db.close().await;

    if failed > 0 {
        return Err(format!("{} demo coupon(s) could not be inserted", failed).into());
    }
    Ok(())
}
