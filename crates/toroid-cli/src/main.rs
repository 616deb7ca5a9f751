//! Command-line driver: seed a board, advance it, print every generation.

mod telemetry;
mod driver;

use anyhow::Result;
use clap::Parser;
use std::io;
use toroid_world::Pattern;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = driver::Cli::parse();

    telemetry::init_telemetry(cli.log_json)?;

    if cli.list_patterns {
        for pattern in Pattern::all() {
            println!("{:<10} {}", pattern.name, pattern.description);
        }
        return Ok(());
    }

    let config = cli.into_config()?;
    info!(
        generations = config.generations,
        delay_ms = config.delay_ms,
        seed = ?config.seed,
        seeding = ?config.seeding,
        "Starting toroid-life"
    );

    let stdout = io::stdout();
    match driver::run(&config, &mut stdout.lock()) {
        Ok(summary) => {
            info!(
                final_population = summary.final_population,
                oldest_age = summary.oldest_age,
                "Simulation complete"
            );
            Ok(())
        }
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            Err(e)
        }
    }
}
