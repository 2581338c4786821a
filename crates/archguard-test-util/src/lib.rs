//! Shared test utilities for the archguard workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `archguard-types` would not suffice.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

const ENVELOPE_KEYS: [&str; 5] = ["schema", "tool", "verdict", "findings", "data"];
const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "finished_at"];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced only when the *root* object is a report envelope (has every
/// envelope key), so a finding `data` payload with a `tool` object is left alone. Timestamp
/// keys are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(v) = map.get_mut(key) {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_envelope_version_and_timestamps() {
        let input = json!({
            "schema": "archguard.report.v1",
            "tool": { "name": "archguard", "version": "0.1.0" },
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "verdict": "fail",
            "findings": [
                { "data": { "type": "App.Domain.Invoice", "tool": { "version": "9.9.9" } } }
            ],
            "data": { "profile": "strict" }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], VERSION_PLACEHOLDER);
        assert_eq!(result["tool"]["name"], "archguard");
        assert_eq!(result["started_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(result["finished_at"], TIMESTAMP_PLACEHOLDER);
        assert_eq!(
            result["findings"][0]["data"]["tool"]["version"], "9.9.9",
            "nested tool.version should NOT be normalized"
        );
        assert_eq!(result["findings"][0]["data"]["type"], "App.Domain.Invoice");
    }

    #[test]
    fn root_without_envelope_keys_keeps_version() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "nested": { "started_at": "2026-01-01T00:00:00Z" }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["nested"]["started_at"], TIMESTAMP_PLACEHOLDER);
    }
}
