use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::request::{parse_payload, request_id};
use crate::http::server::AppState;
use crate::lookup::LookupError;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub measures: usize,
}

pub async fn get_health(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        measures: state.engine.catalog().len(),
    })
}

/// `POST /county_data`
pub async fn county_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    let result = match parse_payload(&body) {
        Ok(payload) => state.engine.county_data(&payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(rows) => {
            tracing::debug!(request_id = %request_id, rows = rows.len(), "County data found");
            metrics::record_request("found", StatusCode::OK.as_u16(), start_time);
            (StatusCode::OK, Json(rows)).into_response()
        }
        Err(err) => {
            let status = err.status_code();
            match &err {
                LookupError::Storage(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "County lookup failed");
                }
                other => {
                    tracing::debug!(
                        request_id = %request_id,
                        outcome = other.outcome(),
                        status = status.as_u16(),
                        "County lookup rejected"
                    );
                }
            }
            metrics::record_request(err.outcome(), status.as_u16(), start_time);
            err.into_response()
        }
    }
}
