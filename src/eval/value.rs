//! Structured values written to the value port

pub use serde_json::Value;

/// Canonical single-line text form of a value
///
/// Strings are quoted, map keys are sorted, and nothing is pretty-printed,
/// so the same value always renders the same way.
pub fn repr(value: &Value) -> String {
    value.to_string()
}

/// Convert a YAML value from a keymap file into a structured value
pub fn from_yaml(value: serde_yaml::Value) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("unsupported value: {}", e))
}
