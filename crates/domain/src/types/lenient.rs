//! Tolerant deserializers for backend fields
//!
//! Laravel serializes decimals as strings, ids sometimes as strings, and
//! phone numbers sometimes as numbers. These helpers accept either form and
//! treat `null` or an empty string as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn non_empty(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(other),
    }
}

/// Number or numeric string → `f64`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)?.and_then(non_empty) else {
        return Ok(None);
    };

    match value {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got \"{s}\""))),
        other => Err(serde::de::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Unsigned integer or numeric string → `u64`.
pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)?.and_then(non_empty) else {
        return Ok(None);
    };

    match value {
        Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected an unsigned integer, got {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got \"{s}\""))),
        other => Err(serde::de::Error::custom(format!("expected an integer, got {other}"))),
    }
}

/// String, number or bool → `String`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)?.and_then(non_empty) else {
        return Ok(None);
    };

    match value {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!("expected a string, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::opt_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_u64")]
        id: Option<u64>,
        #[serde(default, deserialize_with = "super::opt_string")]
        phone: Option<String>,
    }

    fn parse(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let sample = parse(json!({ "amount": "12.50", "id": "7", "phone": 770123456 }));
        assert_eq!(sample.amount, Some(12.5));
        assert_eq!(sample.id, Some(7));
        assert_eq!(sample.phone.as_deref(), Some("770123456"));
    }

    #[test]
    fn null_empty_and_missing_are_absent() {
        let sample = parse(json!({ "amount": null, "id": "" }));
        assert_eq!(sample.amount, None);
        assert_eq!(sample.id, None);
        assert_eq!(sample.phone, None);
    }

    #[test]
    fn rejects_garbage() {
        let result: Result<Sample, _> = serde_json::from_value(json!({ "amount": "abc" }));
        assert!(result.is_err());

        let result: Result<Sample, _> = serde_json::from_value(json!({ "id": -3 }));
        assert!(result.is_err());
    }
}
