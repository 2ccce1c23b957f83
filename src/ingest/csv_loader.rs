//! CSV → SQLite table loader.
//!
//! One table per file, named after the file stem, every column `TEXT`.
//! Loading the same file twice appends its rows again.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use rusqlite::{params_from_iter, Connection};
use thiserror::Error;

use crate::config::validation::is_sql_identifier;

/// Errors raised while loading a CSV file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot derive a table name from {0}")]
    InvalidTableName(PathBuf),

    #[error("header '{0}' is not a plain SQL identifier")]
    InvalidIdentifier(String),

    #[error("{0} has no header row")]
    EmptyHeader(PathBuf),
}

/// What a single load wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: String,
    pub columns: usize,
    pub rows: usize,
}

/// Table name for `csv_path`: its file stem, which must be an identifier.
pub fn table_name(csv_path: &Path) -> Result<String, IngestError> {
    csv_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| is_sql_identifier(stem))
        .map(str::to_string)
        .ok_or_else(|| IngestError::InvalidTableName(csv_path.to_path_buf()))
}

/// Load `csv_path` into the database at `db_path`, creating it if needed.
///
/// All rows go in within one transaction, so a malformed record leaves the
/// table as it was.
pub fn load_csv(db_path: &Path, csv_path: &Path) -> Result<LoadSummary, IngestError> {
    let table = table_name(csv_path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(csv_path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyHeader(csv_path.to_path_buf()));
    }
    if let Some(bad) = headers.iter().find(|h| !is_sql_identifier(h)) {
        return Err(IngestError::InvalidIdentifier(bad.clone()));
    }

    let columns = headers
        .iter()
        .map(|h| format!(r#""{}" TEXT"#, h))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=headers.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    let mut connection = Connection::open(db_path)?;
    let tx = connection.transaction()?;
    tx.execute(
        &format!(r#"CREATE TABLE IF NOT EXISTS "{}" ({})"#, table, columns),
        [],
    )?;

    let mut rows = 0;
    {
        let mut insert = tx.prepare(&format!(r#"INSERT INTO "{}" VALUES ({})"#, table, placeholders))?;
        for record in reader.records() {
            let record = record?;
            insert.execute(params_from_iter(record.iter()))?;
            rows += 1;
        }
    }
    tx.commit()?;

    tracing::info!(
        table = %table,
        rows,
        source = %csv_path.display(),
        "CSV loaded"
    );

    Ok(LoadSummary {
        table,
        columns: headers.len(),
        rows,
    })
}
