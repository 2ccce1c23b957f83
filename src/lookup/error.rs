//! Request outcome taxonomy.

use thiserror::Error;

use crate::storage::StorageError;

/// Every way a `/county_data` request can fail. Each is terminal.
#[derive(Debug, Error)]
pub enum LookupError {
    /// `"coffee": "teapot"` override. Checked before anything else.
    #[error("I'm a teapot")]
    Teapot,

    /// Missing or malformed fields.
    #[error("{0}")]
    Input(&'static str),

    /// Measure name outside the closed catalog.
    #[error("Measure not found")]
    UnknownMeasure,

    /// Valid input, but the join produced no rows.
    #[error("No data for this zip/measure")]
    NoData,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LookupError {
    /// Stable label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            LookupError::Teapot => "teapot",
            LookupError::Input(_) => "bad_request",
            LookupError::UnknownMeasure => "unknown_measure",
            LookupError::NoData => "no_data",
            LookupError::Storage(_) => "storage_error",
        }
    }
}

/// Result type for lookups.
pub type LookupResult<T> = Result<T, LookupError>;
