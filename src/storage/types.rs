//! Storage record and error definitions.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while reading the reference database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file could not be opened (missing, unreadable, locked).
    #[error("cannot open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed after the connection was established.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("table '{0}' does not exist")]
    MissingTable(String),

    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    /// A county identifier is not in 5-digit form, so joins on it would
    /// silently return nothing.
    #[error("table '{table}' column '{column}' holds non-normalized county code {sample:?}")]
    JoinKeyMismatch {
        table: String,
        column: String,
        sample: String,
    },

    /// The blocking worker running the query panicked or was cancelled.
    #[error("storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl StorageError {
    /// Whether the store itself is unreachable, as opposed to a failed query.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Open { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// One row of the statistics table, every column, in table order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StatisticRecord(Map<String, Value>);

impl StatisticRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub(crate) fn insert(&mut self, column: String, value: Value) {
        self.0.insert(column, value);
    }

    /// Text value of `column`; `None` when absent or NULL.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(Value::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
