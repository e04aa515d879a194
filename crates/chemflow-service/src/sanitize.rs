//! Snapshot sanitization for audit entries.

use serde_json::Value;

/// Marker written in place of redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Top-level keys that must never reach the audit log un-redacted.
const SENSITIVE_FIELDS: [&str; 4] = ["password", "token", "secret", "key"];

/// Replace sensitive top-level fields of a snapshot with [`REDACTED`].
///
/// Only top-level keys are inspected; sensitive data nested deeper (for
/// example inside `chemical_config.additionalParams`) is not redacted.
/// Known gap, kept to match observed behavior. Idempotent: sanitizing an
/// already-sanitized snapshot changes nothing.
pub fn sanitize_snapshot(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            for field in SENSITIVE_FIELDS {
                if let Some(entry) = map.get_mut(field) {
                    *entry = Value::String(REDACTED.to_string());
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_redacts_sensitive_top_level_fields() {
        let sanitized = sanitize_snapshot(json!({
            "password": "x",
            "title": "y",
        }));
        assert_eq!(sanitized, json!({"password": REDACTED, "title": "y"}));
    }

    #[test]
    fn test_redacts_all_four_fields() {
        let sanitized = sanitize_snapshot(json!({
            "password": "a",
            "token": "b",
            "secret": "c",
            "key": "d",
            "status": "DRAFT",
        }));
        for field in ["password", "token", "secret", "key"] {
            assert_eq!(sanitized[field], REDACTED);
        }
        assert_eq!(sanitized["status"], "DRAFT");
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize_snapshot(json!({"token": "t", "n": 1}));
        let twice = sanitize_snapshot(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let sanitized = sanitize_snapshot(json!({"Password": "x"}));
        assert_eq!(sanitized, json!({"Password": "x"}));
    }

    #[test]
    fn test_nested_keys_untouched() {
        let sanitized = sanitize_snapshot(json!({
            "chemical_config": {"secret": "deep"},
        }));
        assert_eq!(sanitized["chemical_config"]["secret"], "deep");
    }

    #[test]
    fn test_non_object_passthrough() {
        assert_eq!(sanitize_snapshot(json!(42)), json!(42));
        assert_eq!(sanitize_snapshot(Value::Null), Value::Null);
    }
}
