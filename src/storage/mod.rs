//! Reference data storage subsystem.
//!
//! # Data Flow
//! ```text
//! Valid(zip, measure)
//!     → sqlite.rs (open read-only handle on a blocking worker)
//!     → zip table ⋈ statistics table on 5-digit county code
//!     → Vec<StatisticRecord> (every column, scan order)
//!     → handle dropped
//! ```
//!
//! # Design Decisions
//! - No shared connection: each lookup owns its handle for its whole duration
//! - The tables are written only by `csv-loader`; the service never writes
//! - Join key normalization is verified once at startup

pub mod sqlite;
pub mod types;

pub use sqlite::{SqliteStore, COUNTY_CODE_WIDTH};
pub use types::{StatisticRecord, StorageError, StorageResult};
