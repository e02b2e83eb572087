//! Grapple mod demo runner
//!
//! Builds the scripted scenario against the simulated host, runs it at the
//! real tick rate, and prints a session report. The same mod code would sit
//! behind a real host's event and tick callbacks unchanged.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grapple_mod::config::Config;
use grapple_mod::sim::scenario;
use grapple_mod::util::time::{Timer, SIMULATION_TPS};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting grapple mod demo");
    info!(
        players = config.demo_players,
        ticks = config.demo_ticks,
        seed = config.demo_seed,
        tps = SIMULATION_TPS,
        "Scenario configured"
    );

    let mut session = scenario::build(&config);

    let timer = Timer::new();
    session.run_paced(config.demo_ticks).await;
    info!(elapsed_ms = timer.elapsed_ms(), "Session finished");

    let report = session.report();
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
