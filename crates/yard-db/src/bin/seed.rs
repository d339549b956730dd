//! # Seed Data Generator
//!
//! Populates the database with demo receipts for the management screens.
//!
//! ## Usage
//! ```bash
//! # 30 days of tickets, 6 per day (default)
//! cargo run -p yard-db --bin seed
//!
//! # Custom span
//! cargo run -p yard-db --bin seed -- --days 90 --per-day 12
//!
//! # Specify database path
//! cargo run -p yard-db --bin seed -- --db ./data/yard.db
//! ```
//!
//! ## Generated Receipts
//! Each ticket carries 1-4 lines drawn from the seeded price board, with
//! gross/tare readings that look like a pickup bed on a platform scale.
//! Roughly one ticket in twenty is voided so reports have something to
//! exclude.

use chrono::{Duration, Local, NaiveDateTime};
use std::env;
use yard_core::{DraftReceipt, Material, Weight, WALK_IN_CLIENT_CODE};
use yard_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 30;
    let mut per_day: usize = 6;
    let mut db_path = String::from("./yard_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--per-day" | "-p" => {
                if i + 1 < args.len() {
                    per_day = args[i + 1].parse().unwrap_or(6);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Yard Ticket Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>       Days of history to generate (default: 30)");
                println!("  -p, --per-day <N>    Receipts per day (default: 6)");
                println!("  -d, --db <PATH>      Database file path (default: ./yard_dev.db)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Yard Ticket Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!("Per day:  {}", per_day);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.receipts().count_receipts().await?;
    if existing > 0 {
        println!("⚠ Database already has {} receipts", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let client = db
        .clients()
        .get_by_code(WALK_IN_CLIENT_CODE)
        .await?
        .ok_or("walk-in client missing; migrations incomplete")?
        .snapshot();
    let operator = db
        .operators()
        .first_active()
        .await?
        .ok_or("no active operator")?
        .snapshot();

    let mut catalog: Vec<Material> = Vec::new();
    for category in db.materials().list_categories().await? {
        catalog.extend(db.materials().list_by_category(category.id).await?);
    }
    if catalog.is_empty() {
        return Err("material catalog is empty".into());
    }

    println!();
    println!("Generating receipts...");

    let start = std::time::Instant::now();
    let today = Local::now().naive_local();
    let mut created = 0usize;
    let mut voided = 0usize;

    for day in (0..days).rev() {
        for slot in 0..per_day {
            let seed = (day as usize) * 97 + slot * 13;
            let issue_time = ticket_time(today, day, slot);

            let mut draft = DraftReceipt::new();
            for n in 0..(1 + seed % 4) {
                let material = &catalog[(seed + n * 7) % catalog.len()];
                let (gross, tare) = readings(seed + n);
                draft.add_catalog_line(material, material.unit_price, gross, tare)?;
            }

            let commit = draft.commit(&client, &operator, issue_time)?;
            let detail = match db.receipts().create_receipt(&commit).await {
                Ok(detail) => detail,
                Err(e) => {
                    eprintln!("Failed to create receipt for {}: {}", issue_time, e);
                    continue;
                }
            };
            created += 1;

            if seed % 20 == 3 {
                db.receipts().void_receipt(detail.receipt.id).await?;
                voided += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} receipts ({} voided) in {:?}", created, voided, elapsed);

    println!();
    println!("Monthly summary:");
    for row in db.receipts().aggregate(yard_core::Granularity::Month).await? {
        println!(
            "  {:<8} {:>5} tickets  {:>12} lb  {:>12}",
            row.display_label(yard_core::Granularity::Month),
            row.receipt_count,
            row.net_weight,
            row.total_amount
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Spreads tickets across opening hours (7:00-16:59).
fn ticket_time(today: NaiveDateTime, days_ago: i64, slot: usize) -> NaiveDateTime {
    let date = (today - Duration::days(days_ago)).date();
    let minutes = 7 * 60 + ((slot * 83 + days_ago as usize * 11) % (10 * 60));
    date.and_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
        .unwrap_or(today)
}

/// Gross between 20 and 1,200 lb with a 0-40 lb bin tare.
fn readings(seed: usize) -> (Weight, Weight) {
    let gross = 2_000 + ((seed * 7_919) % 118_000) as i64;
    let tare = ((seed * 331) % 4_000) as i64;
    (Weight::from_hundredths(gross), Weight::from_hundredths(tare))
}
