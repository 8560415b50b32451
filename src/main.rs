use std::{error::Error, sync::Arc, time::Instant};

use dining_philosophers::{
    config::Config,
    observer::Narrator,
    philosopher::{dine, Stop},
    report::Report,
    table::{StateLine, Table},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// RUST_LOG が無ければ info を出す
fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    // 哲学者が 0 人なら何も始めない
    let config = Config::from_env()?;
    let start = Instant::now();

    println!("=== Dining Philosophers Problem ===");
    println!("Number of philosophers: {}", config.philosophers);
    println!("Simulation time: {} seconds", config.duration.as_secs());
    println!("Legend: T=Thinking, H=Hungry, E=Eating\n");

    let table = Arc::new(Table::with_observer(
        config.philosophers,
        Narrator::new(start),
    ));
    info!("State: {}", StateLine(&table.snapshot()));

    let stop = Stop::Deadline(start + config.duration);
    let meals = dine(&table, config.think, config.eat, stop)?;

    println!("\n{}", Report::new(meals));
    Ok(())
}
