//! Request handling.
//!
//! # Responsibilities
//! - Tag every request with an `x-request-id` (UUID v4 unless the client sent one)
//! - Turn the raw body into the JSON object the validator expects
//!
//! # Design Decisions
//! - The body is parsed by hand rather than with `Json<T>` so that malformed
//!   input maps to our own 400 instead of axum's 415/422 rejections

use axum::http::HeaderMap;
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::lookup::LookupError;

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

pub const NOT_AN_OBJECT: &str = "request body must be a JSON object";

/// Layer assigning a request ID to requests that arrive without one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Request ID for log correlation, `"unknown"` if the layer is absent.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse a request body into a JSON object.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, LookupError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(LookupError::Input(NOT_AN_OBJECT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_object() {
        let map = parse_payload(br#"{"zip": "02138", "measure_name": "Adult obesity"}"#).unwrap();
        assert_eq!(map["zip"], "02138");
    }

    #[test]
    fn test_reject_non_objects() {
        for body in ["", "not json", "[]", "\"02138\"", "null", "{\"zip\": "] {
            assert!(matches!(
                parse_payload(body.as_bytes()),
                Err(LookupError::Input(NOT_AN_OBJECT))
            ));
        }
    }

    #[test]
    fn test_request_id_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
