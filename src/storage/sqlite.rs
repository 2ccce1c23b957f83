//! SQLite-backed county lookup.
//!
//! The store is a descriptor, not a connection: every lookup opens its own
//! read-only handle on a blocking worker and drops it before returning.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use serde_json::Value;

use crate::config::StorageConfig;
use crate::storage::types::{StatisticRecord, StorageError, StorageResult};
use crate::validation::ZipCode;

/// Width of a normalized county identifier (state + county FIPS digits).
pub const COUNTY_CODE_WIDTH: usize = 5;

/// Read-only access to the ZIP mapping and statistics tables.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    zip_table: String,
    statistics_table: String,
    zip_county_column: String,
    statistics_county_column: String,
    busy_timeout: Duration,
    lookup_sql: Arc<str>,
}

impl SqliteStore {
    /// Build a store from validated configuration.
    ///
    /// Identifiers are spliced into SQL text, so they must already have passed
    /// `config::validation`.
    pub fn from_config(config: &StorageConfig) -> Self {
        let lookup_sql = format!(
            r#"SELECT c.* FROM "{zip}" AS z JOIN "{stats}" AS c ON z."{zip_col}" = c."{stats_col}" WHERE z.zip = ?1 AND c.measure_name = ?2"#,
            zip = config.zip_table,
            stats = config.statistics_table,
            zip_col = config.zip_county_column,
            stats_col = config.statistics_county_column,
        );

        Self {
            path: PathBuf::from(&config.database_path),
            zip_table: config.zip_table.clone(),
            statistics_table: config.statistics_table.clone(),
            zip_county_column: config.zip_county_column.clone(),
            statistics_county_column: config.statistics_county_column.clone(),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            lookup_sql: lookup_sql.into(),
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh read-only connection. Never creates the file.
    pub fn open(&self) -> StorageResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection =
            Connection::open_with_flags(&self.path, flags).map_err(|source| StorageError::Open {
                path: self.path.clone(),
                source,
            })?;
        connection.busy_timeout(self.busy_timeout)?;
        Ok(connection)
    }

    /// Every statistics row for the county `zip` maps to, filtered to `measure`.
    ///
    /// Rows come back in the database's scan order; an empty vector means
    /// either the ZIP is unmapped or the county has no row for the measure.
    pub async fn lookup(&self, zip: &ZipCode, measure: &str) -> StorageResult<Vec<StatisticRecord>> {
        let store = self.clone();
        let zip = zip.clone();
        let measure = measure.to_string();
        tokio::task::spawn_blocking(move || store.lookup_blocking(&zip, &measure)).await?
    }

    /// Synchronous form of [`SqliteStore::lookup`].
    pub fn lookup_blocking(&self, zip: &ZipCode, measure: &str) -> StorageResult<Vec<StatisticRecord>> {
        let connection = self.open()?;
        let mut stmt = connection.prepare(&self.lookup_sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let records = stmt
            .query_map(params![zip.as_str(), measure], |row| read_record(row, &columns))?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            zip = %zip,
            measure = %measure,
            rows = records.len(),
            "County lookup finished"
        );
        Ok(records)
    }

    /// Check that both sides of the join use 5-digit county codes.
    ///
    /// A table keyed by a differently formatted identifier would make every
    /// lookup return zero rows instead of failing, so this runs at startup.
    pub fn verify_join_key(&self) -> StorageResult<()> {
        let connection = self.open()?;

        require_columns(&connection, &self.zip_table, &["zip", self.zip_county_column.as_str()])?;
        require_columns(
            &connection,
            &self.statistics_table,
            &[self.statistics_county_column.as_str(), "measure_name"],
        )?;

        for (table, column) in [
            (&self.zip_table, &self.zip_county_column),
            (&self.statistics_table, &self.statistics_county_column),
        ] {
            if let Some(sample) = first_unnormalized(&connection, table, column)? {
                return Err(StorageError::JoinKeyMismatch {
                    table: table.clone(),
                    column: column.clone(),
                    sample,
                });
            }
        }

        tracing::info!(
            zip_table = %self.zip_table,
            statistics_table = %self.statistics_table,
            "Join key normalization verified"
        );
        Ok(())
    }
}

fn require_columns(connection: &Connection, table: &str, required: &[&str]) -> StorageResult<()> {
    let mut stmt = connection.prepare(&format!(r#"PRAGMA table_info("{}")"#, table))?;
    let present: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<_, _>>()?;

    if present.is_empty() {
        return Err(StorageError::MissingTable(table.to_string()));
    }
    for &column in required {
        if !present.iter().any(|p| p == column) {
            return Err(StorageError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn first_unnormalized(connection: &Connection, table: &str, column: &str) -> StorageResult<Option<String>> {
    let sql = format!(
        r#"SELECT "{col}" FROM "{table}" WHERE "{col}" IS NOT NULL AND "{col}" != '' AND (typeof("{col}") != 'text' OR length("{col}") != {width} OR "{col}" GLOB '*[^0-9]*') LIMIT 1"#,
        col = column,
        table = table,
        width = COUNTY_CODE_WIDTH,
    );
    let sample = connection
        .query_row(&sql, [], |row| Ok(value_text(row.get_ref(0)?)))
        .optional()?;
    Ok(sample.flatten())
}

fn read_record(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<StatisticRecord> {
    let mut record = StatisticRecord::new();
    for (idx, name) in columns.iter().enumerate() {
        let value = value_text(row.get_ref(idx)?).map_or(Value::Null, Value::String);
        record.insert(name.clone(), value);
    }
    Ok(record)
}

/// Render a cell as text, `None` for NULL.
fn value_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(n) => Some(n.to_string()),
        // SQLite's own text form keeps the fraction: 1.0 → "1.0"
        ValueRef::Real(f) => Some(format!("{f:?}")),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
