//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use county_health_api::config::ServiceConfig;
use county_health_api::ingest::load_csv;
use county_health_api::lifecycle::{self, Shutdown};
use tempfile::TempDir;

pub const ZIP_COUNTY_CSV: &str = "\
zip,county_code,county_name,state
02138,25017,Middlesex,MA
02139,25017,Middlesex,MA
36003,01001,Autauga,AL
";

pub const RANKINGS_CSV: &str = "\
state,county,county_code,year_span,measure_name,measure_id,numerator,denominator,raw_value,confidence_interval_lower_bound,confidence_interval_upper_bound,data_release_year
MA,Middlesex County,25017,2021,Adult obesity,11,,,0.22,0.2,0.24,2024
MA,Middlesex County,25017,2022,Unemployment,23,24000,880000,0.027,,,2024
AL,Autauga County,01001,2021,Adult obesity,11,,,0.38,0.35,0.41,2024
AL,Autauga County,01001,2020,Violent crime rate,43,248,55869,443.9,,,2024
";

/// Write both fixture CSVs and load them through the offline loader.
pub fn build_database(dir: &TempDir) -> PathBuf {
    let db = dir.path().join("data.db");
    for (name, content) in [
        ("zip_county.csv", ZIP_COUNTY_CSV),
        ("county_health_rankings.csv", RANKINGS_CSV),
    ] {
        let csv = dir.path().join(name);
        fs::write(&csv, content).unwrap();
        load_csv(&db, &csv).unwrap();
    }
    db
}

/// A running service bound to an ephemeral port.
pub struct TestService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    _dir: TempDir,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service against a freshly loaded fixture database.
pub async fn start_service() -> TestService {
    let dir = TempDir::new().unwrap();
    let db = build_database(&dir);

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.storage.database_path = db.to_string_lossy().into_owned();

    start_with_config(config, dir).await
}

/// Start the service with an explicit configuration.
pub async fn start_with_config(config: ServiceConfig, dir: TempDir) -> TestService {
    let (server, listener) = lifecycle::prepare(config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestService {
        addr,
        shutdown,
        _dir: dir,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
