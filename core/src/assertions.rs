//! Response assertions used by the scenarios.
//!
//! Every helper panics with the expected and actual values so a failing
//! scenario reports what it was checking.

use serde_json::Value;

use crate::http::HttpResponse;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &HttpResponse, expected: u16) {
    let actual = response.status();
    assert_eq!(
        actual, expected,
        "expected status {expected}, got {actual} (body: {})",
        response.body
    );
}

/// True when `actual` contains everything in `expected`.
///
/// Objects match when every key of `expected` is present in `actual` with a
/// matching value; extra keys in `actual` are ignored. Arrays match
/// element-wise and must have the same length. Everything else compares by
/// equality.
pub fn is_superset(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(key, want)| actual.get(key).is_some_and(|have| is_superset(have, want))),
        (Value::Array(actual), Value::Array(expected)) => {
            actual.len() == expected.len()
                && actual
                    .iter()
                    .zip(expected)
                    .all(|(have, want)| is_superset(have, want))
        }
        _ => actual == expected,
    }
}

/// Asserts that `actual` is a superset of `expected`.
pub fn assert_subset(actual: &Value, expected: &Value) {
    assert!(
        is_superset(actual, expected),
        "expected body to contain {expected}, got {actual}"
    );
}

/// Asserts that `body[field]` is a non-empty string.
pub fn assert_non_empty_str(body: &Value, field: &str) {
    let value = body.get(field).and_then(Value::as_str).unwrap_or("");
    assert!(
        !value.is_empty(),
        "expected non-empty string field {field:?}, got {}",
        body.get(field).unwrap_or(&Value::Null)
    );
}

/// Asserts that `body` is a non-empty JSON array and returns its elements.
pub fn assert_non_empty_array(body: &Value) -> &Vec<Value> {
    let items = body
        .as_array()
        .unwrap_or_else(|| panic!("expected JSON array, got {body}"));
    assert!(!items.is_empty(), "expected non-empty array");
    items
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn object_superset_ignores_extra_fields() {
        let actual = json!({"id": 101, "title": "t", "body": "b", "userId": 1});
        assert!(is_superset(&actual, &json!({"title": "t", "userId": 1})));
        assert!(is_superset(&actual, &json!({})));
    }

    #[test]
    fn object_superset_detects_missing_or_different_fields() {
        let actual = json!({"id": 101, "title": "t"});
        assert!(!is_superset(&actual, &json!({"body": "b"})));
        assert!(!is_superset(&actual, &json!({"title": "other"})));
        assert!(!is_superset(&json!({"userId": "1"}), &json!({"userId": 1})));
    }

    #[test]
    fn nested_objects_match_recursively() {
        let actual = json!({"user": {"id": 1, "name": "Leanne"}, "ok": true});
        assert!(is_superset(&actual, &json!({"user": {"id": 1}})));
        assert!(!is_superset(&actual, &json!({"user": {"id": 2}})));
    }

    #[test]
    fn arrays_must_match_length() {
        assert!(is_superset(&json!([{"id": 1, "x": 0}]), &json!([{"id": 1}])));
        assert!(!is_superset(&json!([1, 2]), &json!([1])));
    }

    #[test]
    fn status_assertion_passes_on_match() {
        let resp = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: "{}".to_string(),
        };
        assert_status(&resp, 201);
    }

    #[test]
    #[should_panic(expected = "expected status 200, got 404")]
    fn status_assertion_reports_both_values() {
        let resp = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "{}".to_string(),
        };
        assert_status(&resp, 200);
    }

    #[test]
    #[should_panic(expected = "non-empty string field \"title\"")]
    fn empty_title_fails() {
        assert_non_empty_str(&json!({"title": ""}), "title");
    }

    #[test]
    #[should_panic(expected = "expected JSON array")]
    fn non_array_body_fails() {
        assert_non_empty_array(&json!({}));
    }
}
