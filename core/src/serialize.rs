//! Payload serialization: ordered key/value pairs to `application/x-www-form-urlencoded`.
//!
//! # Design
//! Both query strings and form bodies go through [`serialize`]. Input is an
//! ordered pair list, so output order is exactly input order. Scalar values
//! render as their plain text (strings unquoted), nested arrays and objects
//! as compact JSON; both sides of every pair are percent-encoded.

use serde_json::Value;

/// Render a JSON value as the text that gets percent-encoded into a pair.
///
/// Strings contribute their contents without the surrounding quotes; every
/// other value uses its compact JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Serialize pairs into `k=v&k=v` with percent-encoded keys and values.
///
/// An empty slice yields an empty string.
pub fn serialize(pairs: &[(String, Value)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value_text(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
