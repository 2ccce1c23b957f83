//! Response mapping.
//!
//! # Responsibilities
//! - Map each [`LookupError`] to exactly one status code
//! - Render error bodies as `{"detail": "..."}`
//!
//! # Design Decisions
//! - Unknown measure and empty result share 404; only the message differs
//! - Storage faults are 5xx so they can never be mistaken for a miss

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::lookup::LookupError;

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::Teapot => StatusCode::IM_A_TEAPOT,
            LookupError::Input(_) => StatusCode::BAD_REQUEST,
            LookupError::UnknownMeasure | LookupError::NoData => StatusCode::NOT_FOUND,
            LookupError::Storage(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            LookupError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Storage details stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            LookupError::Storage(e) if e.is_unavailable() => "Storage unavailable".to_string(),
            LookupError::Storage(_) => "Storage error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody { detail: self.detail() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        assert_eq!(LookupError::Teapot.status_code().as_u16(), 418);
        assert_eq!(LookupError::Input("x").status_code().as_u16(), 400);
        assert_eq!(LookupError::UnknownMeasure.status_code().as_u16(), 404);
        assert_eq!(LookupError::NoData.status_code().as_u16(), 404);

        let unavailable = LookupError::Storage(StorageError::Open {
            path: PathBuf::from("data.db"),
            source: rusqlite::Error::InvalidQuery,
        });
        assert_eq!(unavailable.status_code().as_u16(), 503);

        let broken = LookupError::Storage(StorageError::MissingTable("zip_county".into()));
        assert_eq!(broken.status_code().as_u16(), 500);
    }

    #[test]
    fn test_details() {
        assert_eq!(LookupError::Teapot.detail(), "I'm a teapot");
        assert_eq!(LookupError::UnknownMeasure.detail(), "Measure not found");
        assert_eq!(LookupError::NoData.detail(), "No data for this zip/measure");
        assert_eq!(
            LookupError::Storage(StorageError::MissingTable("zip_county".into())).detail(),
            "Storage error"
        );
    }
}
