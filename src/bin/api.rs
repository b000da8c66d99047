//! Sleep Dashboard API Server
//!
//! Run with: cargo run --bin sleep-dashboard-api
//!
//! # Configuration
//!
//! Settings come from the first config file found (see [`Config::load_default`]),
//! then environment variables:
//! - `SLEEP_DASHBOARD_CSV_PATH`: Sleep CSV (default: data/garmin_sleep_data.csv)
//! - `SLEEP_DASHBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SLEEP_DASHBOARD_PORT`: Port to listen on (default: 8082)
//! - `SLEEP_DASHBOARD_LOG_LEVEL`: Log level (default: info)
//! - `SLEEP_DASHBOARD_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, overrides the log level

use sleep_dashboard::api::{serve, AppState};
use sleep_dashboard::config::{Config, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = Config::load_default();

    init_tracing(&loaded.config.logging);
    loaded.log();

    let config = loaded.config;

    tracing::info!("Starting sleep dashboard API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Sleep data file: {:?}", config.data.csv_path());

    if !config.data.csv_path().exists() {
        tracing::warn!(
            "Sleep data file not found at {:?}; /api/sleep-data will return 500 until it exists",
            config.data.csv_path()
        );
    }

    let state = AppState::from_config(&config.data, config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Sleep dashboard API stopped");
    Ok(())
}

/// Initialize tracing with an env filter and a pretty or JSON formatter
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
