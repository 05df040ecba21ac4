//! Lenient field decoders for backend JSON.
//!
//! The backend is not consistent about scalar types: ids come back as numbers
//! from some collections and as strings (or Mongo `_id`s) from others, and a few
//! quote fields are booleans on old records. These helpers fold every scalar
//! into a `String` so a single odd row never fails a whole list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if b { "Yes" } else { "No" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Decode a string or number id into a `String`.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

/// Decode an optional scalar into `Option<String>`; empty strings become `None`.
pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(scalar_to_string)
        .filter(|s| !s.is_empty()))
}

/// Decode a number that may have been sent as a string.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id", alias = "_id")]
        id: String,
        #[serde(default, deserialize_with = "opt_text")]
        seo: Option<String>,
        #[serde(default, deserialize_with = "number")]
        amount: f64,
    }

    #[test]
    fn test_numeric_id() {
        let row: Row = serde_json::from_str(r#"{"id": 42, "amount": "12.5"}"#).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.amount, 12.5);
        assert!(row.seo.is_none());
    }

    #[test]
    fn test_mongo_id_and_bool_text() {
        let row: Row =
            serde_json::from_str(r#"{"_id": "65ab", "seo": true, "amount": 3}"#).unwrap();
        assert_eq!(row.id, "65ab");
        assert_eq!(row.seo.as_deref(), Some("Yes"));
        assert_eq!(row.amount, 3.0);
    }

    #[test]
    fn test_blank_text_is_none() {
        let row: Row = serde_json::from_str(r#"{"id": "a", "seo": ""}"#).unwrap();
        assert!(row.seo.is_none());
    }
}
