//! Response shape normalization
//!
//! The backend wraps payloads inconsistently: a bare array, `{status, data}`,
//! `{status, <entity>}` or a Laravel paginator, sometimes nested inside
//! `data`. [`Envelope`] names those shapes once so callers branch on a type
//! instead of probing JSON, and [`normalize_list`] / [`normalize_item`] pull
//! typed records out of them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api_error::ApiError;
use crate::types::ResourceKind;

/// Top-level shape of a successful response body
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The payload itself: an array, a record or a scalar
    Bare(Value),
    /// `{ status?, data, ... }`
    Data { status: Option<Value>, data: Value, rest: Map<String, Value> },
    /// `{ status?, <key>, ... }` where `key` names the resource
    Named { status: Option<Value>, key: String, value: Value, rest: Map<String, Value> },
}

impl Envelope {
    /// Classify `body`, recognising `data` first and then any of `keys`.
    pub fn classify(body: Value, keys: &[&str]) -> Self {
        let Value::Object(mut map) = body else {
            return Self::Bare(body);
        };

        if let Some(data) = map.remove("data") {
            let status = map.remove("status");
            return Self::Data { status, data, rest: map };
        }

        if let Some(key) = keys.iter().find(|key| map.contains_key(**key)) {
            let key = (*key).to_string();
            let status = map.remove("status");
            let value = map.remove(&key).unwrap_or(Value::Null);
            return Self::Named { status, key, value, rest: map };
        }

        Self::Bare(Value::Object(map))
    }

    pub fn status(&self) -> Option<&Value> {
        match self {
            Self::Bare(_) => None,
            Self::Data { status, .. } | Self::Named { status, .. } => status.as_ref(),
        }
    }

    /// Top-level `message`, if the envelope carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Bare(Value::Object(map)) => map.get("message").and_then(Value::as_str),
            Self::Bare(_) => None,
            Self::Data { rest, .. } | Self::Named { rest, .. } => {
                rest.get("message").and_then(Value::as_str)
            }
        }
    }
}

/// One page of records plus whatever pagination metadata came with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Unpaginated result.
    pub fn single(items: Vec<T>) -> Self {
        Self { items, current_page: None, last_page: None, per_page: None, total: None }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` when the backend reported pages beyond this one.
    pub fn has_more(&self) -> bool {
        matches!((self.current_page, self.last_page), (Some(current), Some(last)) if current < last)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::single(Vec::new())
    }
}

/// Extract a page of `kind` records from a list response.
///
/// # Errors
/// A decode [`ApiError`] when no list can be found or a record does not fit
/// `T`.
pub fn normalize_list<T: DeserializeOwned>(body: Value, kind: ResourceKind) -> Result<Page<T>, ApiError> {
    let keys = [kind.collection_key(), kind.segment()];
    let raw = match Envelope::classify(body, &keys) {
        Envelope::Bare(value) => paged(value, &Map::new()),
        Envelope::Data { data, rest, .. } => {
            // `{data: {<collection_key>: [...]}}`
            let nested = data
                .as_object()
                .is_some_and(|inner| keys.iter().any(|key| inner.contains_key(*key)));
            if nested {
                match Envelope::classify(data, &keys) {
                    Envelope::Named { value, rest: inner_rest, .. } => paged(value, &inner_rest),
                    _ => None,
                }
            } else {
                paged(data, &rest)
            }
        }
        Envelope::Named { value, rest, .. } => paged(value, &rest),
    };

    let (items, meta) = raw.ok_or_else(|| {
        ApiError::decode(None, format!("no {} list in response", kind.collection_key()))
    })?;

    let items = items
        .into_iter()
        .map(|item| decode::<T>(item, kind))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        items,
        current_page: meta_u64(&meta, "current_page"),
        last_page: meta_u64(&meta, "last_page"),
        per_page: meta_u64(&meta, "per_page"),
        total: meta_u64(&meta, "total"),
    })
}

/// Extract a single `kind` record from a show/create/update response.
///
/// # Errors
/// A decode [`ApiError`] when the body holds no object or it does not fit
/// `T`.
pub fn normalize_item<T: DeserializeOwned>(body: Value, kind: ResourceKind) -> Result<T, ApiError> {
    let keys = [kind.singular_key()];
    let value = match Envelope::classify(body, &keys) {
        Envelope::Bare(value) => value,
        Envelope::Data { data, .. } => match Envelope::classify(data, &keys) {
            Envelope::Named { value, .. } => value,
            Envelope::Bare(value) => value,
            Envelope::Data { .. } => Value::Null,
        },
        Envelope::Named { value, .. } => value,
    };

    if !value.is_object() {
        return Err(ApiError::decode(None, format!("no {} record in response", kind.singular_key())));
    }

    decode(value, kind)
}

fn decode<T: DeserializeOwned>(value: Value, kind: ResourceKind) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::decode(None, format!("malformed {} record: {e}", kind.singular_key())))
}

/// Items plus the map pagination fields are read from.
fn paged(value: Value, outer: &Map<String, Value>) -> Option<(Vec<Value>, Map<String, Value>)> {
    match value {
        Value::Array(items) => Some((items, outer.clone())),
        // Laravel paginator: `{data: [...], current_page, last_page, ...}`
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Some((items, map)),
            _ => None,
        },
        _ => None,
    }
}

fn meta_u64(map: &Map<String, Value>, key: &str) -> Option<u64> {
    match map.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
