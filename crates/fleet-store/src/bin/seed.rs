//! # Seed Data Generator
//!
//! Populates the data directory with a sample fleet for development.
//!
//! ## Usage
//! ```bash
//! # Generate 20 vehicles (default) into the configured data dir
//! cargo run -p fleet-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p fleet-store --bin seed -- --count 60
//!
//! # Specify data directory
//! cargo run -p fleet-store --bin seed -- --data-dir ./data
//! ```
//!
//! ## Generated Vehicles
//! Alternates between cars (`C001`, `C002`, ...) and motorcycles
//! (`M001`, ...). Motorcycles cover every licence class and category so
//! the insurance and touring rules all have something to show.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fleet_core::{Asset, Money, MotorcycleSpec};
use fleet_store::{Fleet, FleetConfig, SystemClock};

/// (make, model, daily rate in cents)
const CARS: &[(&str, &str, i64)] = &[
    ("Toyota", "Corolla", 5000),
    ("Honda", "Civic", 5500),
    ("Ford", "Focus", 4500),
    ("Volkswagen", "Golf", 5200),
    ("BMW", "320i", 8900),
    ("Tesla", "Model 3", 11000),
    ("Renault", "Clio", 3900),
    ("Skoda", "Octavia Estate", 6100),
];

/// (make, model, engine cc, category, daily rate in cents)
const MOTORCYCLES: &[(&str, &str, u32, &str, i64)] = &[
    ("Honda", "CB125R", 125, "Naked", 3000),
    ("KTM", "390 Duke", 373, "Naked", 4200),
    ("Kawasaki", "Versys 650", 649, "Touring", 6500),
    ("Ducati", "Panigale V4", 1103, "Sport", 14000),
    ("Harley-Davidson", "Street Bob", 1868, "Cruiser", 12000),
    ("BMW", "R1250RT", 1254, "Touring", 11500),
    ("Ural", "Gear Up", 749, "Adventure", 9000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut config = FleetConfig::load_or_default(None);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    config.storage.data_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fleet Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of vehicles to generate (default: 20)");
                println!("  -d, --data-dir <PATH>  Data directory (default: from fleet.toml)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    println!("Fleet Rental Seed Data Generator");
    println!("================================");
    println!("Data dir: {}", config.storage.data_dir.display());
    println!("Vehicles: {}", count);
    println!();

    let fleet = Fleet::open(config, Arc::new(SystemClock)).await?;
    let inventory = fleet.inventory();

    let existing = inventory.total_count().await;
    if existing > 0 {
        println!("Data dir already has {} vehicles", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data files to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let asset = generate_asset(seed)?;
        let name = asset.display_name();

        if let Err(e) = inventory.add(asset).await {
            warn!(vehicle = %name, error = %e, "Failed to add vehicle");
            continue;
        }
        generated += 1;
        info!(vehicle = %name, "Added");
    }

    println!();
    println!("Generated {} vehicles in {:?}", generated, start.elapsed());
    println!("  Available: {}", inventory.available_count().await);

    let touring = inventory
        .list()
        .await
        .into_iter()
        .filter(|a| {
            a.motorcycle_spec()
                .map(|s| s.is_suitable_for_touring())
                .unwrap_or(false)
        })
        .count();
    println!("  Touring-ready motorcycles: {}", touring);

    println!();
    println!("Seed complete!");

    Ok(())
}

/// Even seeds are cars, odd seeds motorcycles.
fn generate_asset(seed: usize) -> Result<Asset, Box<dyn std::error::Error>> {
    let round = seed / 2;

    if seed % 2 == 0 {
        let (make, model, rate) = CARS[round % CARS.len()];
        let id = format!("C{:03}", round + 1);
        // Later rounds of the same model get slightly pricier.
        let rate = Money::from_cents(rate + (round / CARS.len()) as i64 * 250);
        return Ok(Asset::new(id, make, model, rate)?);
    }

    let (make, model, engine_cc, category, rate) = MOTORCYCLES[round % MOTORCYCLES.len()];
    let mut spec = MotorcycleSpec::new(engine_cc, category)?;
    if category == "Touring" || engine_cc >= 1000 {
        spec.set_has_luggage(true);
    }
    if make == "Ural" {
        spec.set_has_sidecar(true);
    } else if category == "Sport" {
        spec.set_passenger_capacity(1)?;
    }

    let id = format!("M{:03}", round + 1);
    Ok(Asset::motorcycle(id, make, model, Money::from_cents(rate), spec)?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fleet=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
