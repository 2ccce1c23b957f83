//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the store and check the join key before serving anything
//! - Assemble the lookup engine and HTTP server
//! - Bind the listener last, so traffic only arrives when ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lookup::LookupEngine;
use crate::storage::{SqliteStore, StorageError};
use crate::validation::MeasureCatalog;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("reference data check failed: {0}")]
    Storage(#[from] StorageError),

    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the engine for `config`, verifying the join key if configured.
pub fn build_engine(config: &ServiceConfig) -> Result<LookupEngine, StartupError> {
    let store = SqliteStore::from_config(&config.storage);

    if config.storage.verify_join_key {
        store.verify_join_key()?;
    } else {
        tracing::warn!("Join key verification disabled; mismatched county codes will look like missing data");
    }

    let catalog = MeasureCatalog::standard();
    tracing::info!(
        database = %store.path().display(),
        measures = catalog.len(),
        "Lookup engine ready"
    );
    Ok(LookupEngine::new(catalog, store))
}

/// Build the server and bind its listener.
pub async fn prepare(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let engine = build_engine(&config)?;

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    Ok((HttpServer::new(config, engine), listener))
}
