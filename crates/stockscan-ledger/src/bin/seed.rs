//! # Demo Ledger Generator
//!
//! Writes a ledger file full of plausible stock for trying the scanner
//! without a real inventory.
//!
//! ## Usage
//! ```bash
//! # 200 items into ./inventory_dataset.csv (default)
//! cargo run -p stockscan-ledger --bin seed
//!
//! # Custom amount and path
//! cargo run -p stockscan-ledger --bin seed -- --count 1000 --ledger ./data/stock.csv
//! ```
//!
//! Each item gets a valid EAN-13 barcode (`590` prefix), so printed labels
//! from any barcode generator scan back to the same record.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stockscan_core::{InventoryRecord, Money, NewItem};
use stockscan_ledger::{Ledger, LedgerResult};

/// Product families for realistic test data
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "STA",
        &[
            "Ballpoint Pen",
            "Gel Pen",
            "Pencil HB",
            "Eraser",
            "Sharpener",
            "Notebook A5",
            "Notebook A4",
            "Sticky Notes",
            "Stapler",
            "Paper Clips",
        ],
    ),
    (
        "BEV",
        &[
            "Mineral Water",
            "Sparkling Water",
            "Orange Juice",
            "Apple Juice",
            "Iced Tea",
            "Cola",
            "Energy Drink",
            "Ground Coffee",
        ],
    ),
    (
        "HOM",
        &[
            "Dish Soap",
            "Sponge",
            "Paper Towels",
            "Trash Bags",
            "Light Bulb",
            "AA Batteries",
            "Candle",
        ],
    ),
];

/// Pack variants and their price addon in cents
const PACKS: &[(&str, i64)] = &[("Single", 0), ("3-Pack", 150), ("6-Pack", 400), ("Box", 900)];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Write a demo StockScan ledger file")]
struct Args {
    /// Number of items to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Ledger file to write
    #[arg(short, long, default_value = "inventory_dataset.csv")]
    ledger: PathBuf,

    /// Overwrite a ledger that already has records
    #[arg(long)]
    force: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> LedgerResult<()> {
    println!("🌱 StockScan Demo Ledger Generator");
    println!("==================================");
    println!("Ledger: {}", args.ledger.display());
    println!("Items:  {}", args.count);
    println!();

    let existing = Ledger::load(&args.ledger)?;
    if !existing.is_empty() && !args.force {
        println!("⚠ Ledger already has {} items", existing.len());
        println!("  Skipping seed to avoid overwriting real stock.");
        println!("  Pass --force to replace it.");
        return Ok(());
    }

    let variants = catalogue();
    let mut ledger = Ledger::new();

    for (seed, &(family, name, pack, addon)) in
        variants.iter().cycle().enumerate().take(args.count)
    {
        // Later passes over the catalogue become newer product lines.
        let round = seed / variants.len();
        let name = if round == 0 {
            name.to_string()
        } else {
            format!("{} Mk{}", name, round + 1)
        };

        match generate_record(family, &name, pack, addon, seed) {
            Some(record) => ledger.append(record)?,
            None => eprintln!("Skipped {} {}", name, pack),
        }
    }

    ledger.save(&args.ledger)?;

    let summary = ledger.summary();
    println!("✓ Wrote {} items", summary.items);
    println!("  Units on hand: {}", summary.units_on_hand);
    println!("  Stock value:   {}", summary.stock_value);
    Ok(())
}

/// Every family × name × pack combination, in a fixed order.
fn catalogue() -> Vec<(&'static str, &'static str, &'static str, i64)> {
    FAMILIES
        .iter()
        .flat_map(|&(family, names)| {
            names.iter().flat_map(move |&name| {
                PACKS
                    .iter()
                    .map(move |&(pack, addon)| (family, name, pack, addon))
            })
        })
        .collect()
}

/// Builds one record; `None` if the generated values fail validation.
fn generate_record(
    family: &str,
    name: &str,
    pack: &str,
    price_addon: i64,
    seed: usize,
) -> Option<InventoryRecord> {
    // Selling price $0.99 - $8.98 plus pack addon
    let selling = 99 + ((seed * 37) % 800) as i64 + price_addon;
    // Cost 55-75% of price
    let cost = selling * (55 + (seed % 21) as i64) / 100;

    let item = NewItem {
        description: format!("{} {}", name, pack),
        code: format!("{}-{:04}", family, seed),
        purchase_price: Money::from_cents(cost),
        selling_price: Money::from_cents(selling),
        inventory_count: (seed % 61) as i64,
    };

    InventoryRecord::register(ean13(seed), item).ok()
}

/// `590` + zero-padded seed + check digit.
fn ean13(seed: usize) -> String {
    let body = format!("590{:09}", seed);
    let sum: u32 = body
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();
    format!("{}{}", body, (10 - sum % 10) % 10)
}
