//! Offline ingestion of the reference tables.
//!
//! Used by the `csv-loader` binary and by tests to build fixture databases.
//! The service itself never writes.

pub mod csv_loader;

pub use csv_loader::{load_csv, table_name, IngestError, LoadSummary};
