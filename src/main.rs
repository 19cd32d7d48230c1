mod analyzer;
mod config;
mod enricher;
mod fetcher;
mod model;
mod parser;
mod pipeline;
mod reporter;
mod storage;
mod utils;

use config::{load_config_or_default, AppConfig};
use fetcher::{HttpSource, MarketDataFetcher};
use pipeline::{Pipeline, RunOutcome, RunTimer};
use reporter::ConsoleSink;
use std::time::Duration;
use storage::JsonFileStorage;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let timer = RunTimer::start();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    info!("Run started at {}", timer.started_at.to_rfc3339());

    let config = match load_config_or_default("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load error, using defaults: {}", e);
            AppConfig::default()
        }
    };

    // Without a client every fetch falls back, which ends in the empty-listings abort.
    let source = match HttpSource::new() {
        Ok(s) => Some(s),
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            None
        }
    };

    let fetcher = MarketDataFetcher::new(
        source,
        config.endpoints.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    );
    let storage = JsonFileStorage::new(&config.output_path);
    let pipeline = Pipeline::new(fetcher, storage);

    let mut sink = ConsoleSink::new();
    match pipeline.run(timer, &mut sink).await {
        RunOutcome::Aborted => info!("Run aborted: no listings available."),
        RunOutcome::Completed { persisted, elapsed } => info!(
            "Run finished in {:.2}s (persisted: {})",
            elapsed.as_secs_f64(),
            persisted
        ),
    }
}
