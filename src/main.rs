//! County Health Lookup Service
//!
//! Answers one question over HTTP: given a ZIP code and a measure name, what
//! are the county health statistics?
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /county_data
//!     ─────────────────▶ ┌──────────┐   ┌────────────┐   ┌─────────────────────┐
//!                        │   http   │──▶│ validation │──▶│ storage (SQLite)    │
//!                        │  server  │   │  pipeline  │   │ zip_county ⋈        │
//!     ◀───────────────── │          │◀──│            │◀──│ county_health_...   │
//!     200 / 400 / 404 /  └──────────┘   └────────────┘   └─────────────────────┘
//!     418 / 5xx                                                    ▲
//!                                                                  │ offline
//!                                                           csv-loader binary
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use county_health_api::config::{load_config, validation::validate_config, ConfigError, ServiceConfig};
use county_health_api::lifecycle::{self, signals, Shutdown};
use county_health_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "county-health-api")]
#[command(about = "ZIP code to county health statistics lookup service", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `storage.database_path`.
    #[arg(short, long)]
    database: Option<String>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(database) = &cli.database {
        config.storage.database_path = database.clone();
    }
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability);
    tracing::info!("county-health-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.storage.database_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // validated above
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let (server, listener) = lifecycle::prepare(config).await?;

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
