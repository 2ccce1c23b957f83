//! Validation followed by the ZIP → county → measure join.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::lookup::error::{LookupError, LookupResult};
use crate::storage::{SqliteStore, StatisticRecord};
use crate::validation::{validate_payload, MeasureCatalog, Verdict};

/// Stateless request handler shared by every connection.
#[derive(Debug, Clone)]
pub struct LookupEngine {
    catalog: Arc<MeasureCatalog>,
    store: SqliteStore,
}

impl LookupEngine {
    pub fn new(catalog: MeasureCatalog, store: SqliteStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
        }
    }

    pub fn catalog(&self) -> &MeasureCatalog {
        &self.catalog
    }

    /// Validate `payload` and, only if it passes, query storage.
    ///
    /// Returns the matching rows in storage order; an empty join is
    /// [`LookupError::NoData`].
    pub async fn county_data(&self, payload: &Map<String, Value>) -> LookupResult<Vec<StatisticRecord>> {
        let (zip, measure) = match validate_payload(payload, &self.catalog) {
            Verdict::Teapot => return Err(LookupError::Teapot),
            Verdict::BadRequest(reason) => return Err(LookupError::Input(reason)),
            Verdict::MeasureNotFound => return Err(LookupError::UnknownMeasure),
            Verdict::Valid { zip, measure } => (zip, measure),
        };

        let records = self.store.lookup(&zip, &measure).await?;
        if records.is_empty() {
            return Err(LookupError::NoData);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::validation::request::{MALFORMED_ZIP, MISSING_FIELDS};
    use rusqlite::Connection;
    use serde_json::json;
    use tempfile::TempDir;

    fn engine_with_db() -> (TempDir, LookupEngine) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                r#"
                CREATE TABLE zip_county (zip TEXT, county_code TEXT);
                CREATE TABLE county_health_rankings (county_code TEXT, measure_name TEXT, raw_value TEXT);
                INSERT INTO zip_county VALUES ('02138', '25017');
                INSERT INTO county_health_rankings VALUES ('25017', 'Adult obesity', '0.22');
                "#,
            )
            .unwrap();
        let config = StorageConfig {
            database_path: path.to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        (dir, LookupEngine::new(MeasureCatalog::standard(), SqliteStore::from_config(&config)))
    }

    /// Engine pointed at a database that does not exist, so any storage
    /// access fails loudly.
    fn engine_without_db() -> (TempDir, LookupEngine) {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("missing.db").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        (dir, LookupEngine::new(MeasureCatalog::standard(), SqliteStore::from_config(&config)))
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_found() {
        let (_dir, engine) = engine_with_db();
        let rows = engine
            .county_data(&object(json!({"zip": "02138", "measure_name": "Adult obesity"})))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("raw_value"), Some("0.22"));
    }

    #[tokio::test]
    async fn test_no_data() {
        let (_dir, engine) = engine_with_db();
        let err = engine
            .county_data(&object(json!({"zip": "99999", "measure_name": "Adult obesity"})))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::NoData));
    }

    #[tokio::test]
    async fn test_rejections_never_reach_storage() {
        let (_dir, engine) = engine_without_db();

        let cases = [
            (json!({"coffee": "teapot", "zip": "bad"}), "teapot"),
            (json!({"measure_name": "Adult obesity"}), "bad_request"),
            (json!({"zip": "2138", "measure_name": "Adult obesity"}), "bad_request"),
            (json!({"zip": "02138", "measure_name": "Not A Real Measure"}), "unknown_measure"),
        ];
        for (payload, outcome) in cases {
            let err = engine.county_data(&object(payload)).await.unwrap_err();
            assert_eq!(err.outcome(), outcome);
        }
    }

    #[tokio::test]
    async fn test_input_reasons() {
        let (_dir, engine) = engine_without_db();
        let err = engine.county_data(&object(json!({}))).await.unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS);

        let err = engine
            .county_data(&object(json!({"zip": 2138, "measure_name": "Uninsured"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MALFORMED_ZIP);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_a_miss() {
        let (_dir, engine) = engine_without_db();
        let err = engine
            .county_data(&object(json!({"zip": "02138", "measure_name": "Adult obesity"})))
            .await
            .unwrap_err();
        match err {
            LookupError::Storage(inner) => assert!(inner.is_unavailable()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
