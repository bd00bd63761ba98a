//! Field decoders for values the backend does not type consistently.
//!
//! Ids arrive as strings or integers depending on the collection, and amounts
//! arrive as numbers or numeric strings depending on the endpoint.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an id that may be a string, an integer, or null.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Decode an amount that may be a number, a numeric string, or null (zero).
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid amount: {}", s))),
        Value::Null => Ok(0.0),
        other => Err(D::Error::custom(format!("invalid amount: {}", other))),
    }
}
