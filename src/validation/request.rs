//! Ordered validation of `/county_data` payloads.

use serde_json::{Map, Value};

use crate::validation::catalog::MeasureCatalog;
use crate::validation::zip::ZipCode;

pub const MISSING_FIELDS: &str = "missing zip or measure_name";
pub const MALFORMED_ZIP: &str = "zip must be a 5-digit string";

/// Result of running a payload through the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// `"coffee": "teapot"` was present.
    Teapot,
    BadRequest(&'static str),
    MeasureNotFound,
    Valid { zip: ZipCode, measure: String },
}

/// Validate a request object against the catalog.
///
/// Rules run in a fixed order and the first one that fires wins:
/// teapot, missing fields, ZIP shape, catalog membership.
pub fn validate_payload(payload: &Map<String, Value>, catalog: &MeasureCatalog) -> Verdict {
    if matches!(payload.get("coffee"), Some(Value::String(s)) if s == "teapot") {
        return Verdict::Teapot;
    }

    let (zip, measure) = match (present(payload, "zip"), present(payload, "measure_name")) {
        (Some(zip), Some(measure)) => (zip, measure),
        _ => return Verdict::BadRequest(MISSING_FIELDS),
    };

    let Some(zip) = zip.as_str().and_then(ZipCode::parse) else {
        return Verdict::BadRequest(MALFORMED_ZIP);
    };

    // Non-string measure values can never be catalog members.
    match measure.as_str() {
        Some(measure) if catalog.contains(measure) => Verdict::Valid {
            zip,
            measure: measure.to_string(),
        },
        _ => Verdict::MeasureNotFound,
    }
}

/// A key counts as absent when it is missing or explicitly `null`.
fn present<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(payload: Value) -> Verdict {
        let Value::Object(map) = payload else {
            panic!("test payloads must be objects");
        };
        validate_payload(&map, &MeasureCatalog::standard())
    }

    #[test]
    fn test_valid_request() {
        assert_eq!(
            check(json!({"zip": "02138", "measure_name": "Adult obesity"})),
            Verdict::Valid {
                zip: ZipCode::parse("02138").unwrap(),
                measure: "Adult obesity".into(),
            }
        );
    }

    #[test]
    fn test_teapot_beats_everything() {
        for payload in [
            json!({"coffee": "teapot"}),
            json!({"coffee": "teapot", "zip": "bad"}),
            json!({"coffee": "teapot", "zip": 2138, "measure_name": "nope"}),
            json!({"coffee": "teapot", "zip": "02138", "measure_name": "Adult obesity"}),
        ] {
            assert_eq!(check(payload), Verdict::Teapot);
        }
    }

    #[test]
    fn test_coffee_must_be_exactly_teapot() {
        assert_eq!(check(json!({"coffee": "Teapot"})), Verdict::BadRequest(MISSING_FIELDS));
        assert_eq!(check(json!({"coffee": ["teapot"]})), Verdict::BadRequest(MISSING_FIELDS));
        assert_eq!(
            check(json!({"coffee": "espresso", "zip": "02138", "measure_name": "Uninsured"})),
            Verdict::Valid {
                zip: ZipCode::parse("02138").unwrap(),
                measure: "Uninsured".into(),
            }
        );
    }

    #[test]
    fn test_missing_or_null_fields() {
        for payload in [
            json!({}),
            json!({"zip": "02138"}),
            json!({"measure_name": "Adult obesity"}),
            json!({"zip": null, "measure_name": "Adult obesity"}),
            json!({"zip": "02138", "measure_name": null}),
            // missing fields are reported before the zip shape
            json!({"zip": "bad"}),
        ] {
            assert_eq!(check(payload), Verdict::BadRequest(MISSING_FIELDS));
        }
    }

    #[test]
    fn test_malformed_zip() {
        for zip in [json!("1234"), json!("123456"), json!("0213a"), json!("02138 "), json!(2138), json!(true)] {
            assert_eq!(
                check(json!({"zip": zip, "measure_name": "Adult obesity"})),
                Verdict::BadRequest(MALFORMED_ZIP)
            );
        }
    }

    #[test]
    fn test_zip_checked_before_measure() {
        assert_eq!(
            check(json!({"zip": "1234", "measure_name": "Not A Real Measure"})),
            Verdict::BadRequest(MALFORMED_ZIP)
        );
    }

    #[test]
    fn test_unknown_measure() {
        for measure in [json!("Not A Real Measure"), json!("adult obesity"), json!(42), json!({})] {
            assert_eq!(
                check(json!({"zip": "02138", "measure_name": measure})),
                Verdict::MeasureNotFound
            );
        }
    }
}
