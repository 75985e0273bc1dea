//! Lenient typed lookups into a `serde_json::Value` config object.
//!
//! Every helper falls back to its default when the key is missing or holds
//! the wrong JSON type, so a partially written page config never fails to
//! load.

use serde_json::Value;

/// `params[name]` as `f64` (integers accepted), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a non-negative integer, else `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// `params[name]` as `u32`; values that do not fit fall back to `default`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// `params[name]` as a string, `None` when missing, null or not a string.
pub fn param_opt_string(params: &Value, name: &str) -> Option<String> {
    params.get(name).and_then(Value::as_str).map(String::from)
}

/// Nested config object at `params[name]`; an empty object when absent.
pub fn param_object(params: &Value, name: &str) -> Value {
    match params.get(name) {
        Some(v @ Value::Object(_)) => v.clone(),
        _ => Value::Object(serde_json::Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_accepts_integers() {
        let params = json!({"link_distance": 150});
        assert_eq!(param_f64(&params, "link_distance", 120.0), 150.0);
    }

    #[test]
    fn param_f64_falls_back_on_wrong_type_or_non_object() {
        assert_eq!(param_f64(&json!({"speed": "fast"}), "speed", 0.25), 0.25);
        assert_eq!(param_f64(&json!(null), "speed", 0.25), 0.25);
        assert_eq!(param_f64(&json!([1, 2]), "speed", 0.25), 0.25);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional_values() {
        assert_eq!(param_usize(&json!({"count": -3}), "count", 70), 70);
        assert_eq!(param_usize(&json!({"count": 2.5}), "count", 70), 70);
        assert_eq!(param_usize(&json!({"count": 12}), "count", 70), 12);
    }

    #[test]
    fn param_u32_rejects_overflow() {
        let params = json!({"toast_ms": 5_000_000_000_u64});
        assert_eq!(param_u32(&params, "toast_ms", 2000), 2000);
        assert_eq!(param_u32(&json!({"toast_ms": 2200}), "toast_ms", 2000), 2200);
    }

    #[test]
    fn param_bool_and_string_fall_back() {
        assert!(param_bool(&json!({}), "tilt", true));
        assert!(!param_bool(&json!({"tilt": false}), "tilt", true));
        assert_eq!(param_string(&json!({"toast_id": 4}), "toast_id", "toast"), "toast");
        assert_eq!(param_string(&json!({"toast_id": "note"}), "toast_id", "toast"), "note");
    }

    #[test]
    fn param_opt_string_treats_null_as_missing() {
        assert_eq!(param_opt_string(&json!({"mailto": null}), "mailto"), None);
        assert_eq!(
            param_opt_string(&json!({"mailto": "hi@zettacars.ro"}), "mailto").as_deref(),
            Some("hi@zettacars.ro")
        );
    }

    #[test]
    fn param_object_returns_empty_object_when_absent_or_wrong_type() {
        assert_eq!(param_object(&json!({}), "particles"), json!({}));
        assert_eq!(param_object(&json!({"particles": 3}), "particles"), json!({}));
        assert_eq!(
            param_object(&json!({"particles": {"count": 10}}), "particles"),
            json!({"count": 10})
        );
    }
}
