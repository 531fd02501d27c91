//! Normalized HTTP failure type
//!
//! Every failed request, whatever went wrong, surfaces as one [`ApiError`]:
//! a user-facing message, the HTTP status when a response was obtained, and
//! the backend's field-level validation errors for 422 responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{
    MSG_GENERIC_FAILURE, MSG_INVALID_RESPONSE, MSG_NETWORK_FAILURE, MSG_REQUEST_CANCELLED,
    MSG_REQUEST_IN_FLIGHT, MSG_SESSION_MISSING, MSG_VALIDATION_FAILED, STATUS_NOT_FOUND,
    STATUS_UNPROCESSABLE,
};

/// Field name → ordered list of messages, as returned by the backend on 422
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the backend's `errors` object.
    ///
    /// Lists keep their order. A bare string becomes a one-element list and
    /// anything else is dropped, so a sloppy payload never fails the parse.
    pub fn from_json(value: &Value) -> Self {
        let mut errors = Self::new();
        let Some(map) = value.as_object() else {
            return errors;
        };

        for (field, messages) in map {
            match messages {
                Value::String(message) => errors.insert(field.clone(), message.clone()),
                Value::Array(items) => {
                    for message in items.iter().filter_map(Value::as_str) {
                        errors.insert(field.clone(), message);
                    }
                }
                _ => {}
            }
        }

        errors
    }

    /// Append a message to a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Builder form of [`FieldErrors::insert`].
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(field, message);
        self
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message for a field, the one a form shows under the input.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|messages| messages.first()).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Merge another set of errors, appending messages per field.
    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

/// What went wrong, independent of the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The server answered with a non-2xx status
    Http,
    /// No response was obtained (connection, DNS, TLS, timeout)
    Network,
    /// A response was obtained but its body could not be understood
    Decode,
    /// An authenticated call was attempted without a session
    MissingSession,
    /// The owning view was closed before the response arrived
    Cancelled,
    /// A mutation is already pending on the same form
    InFlight,
    /// Client-side validation rejected the input before sending
    InvalidInput,
}

/// The user-visible failure classes of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    AuthenticationAbsent,
    Validation,
    NotFound,
    Generic,
}

/// Normalized failure of an HTTP call
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message, the backend's own when it sent one
    pub message: String,
    /// HTTP status, absent when no response was obtained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Field-level validation errors (422 or client-side validation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub kind: ApiErrorKind,
    /// Diagnostic detail for logs; never shown to the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    /// Failure built from a non-2xx response.
    ///
    /// `message` falls back to the generic text when the backend sent none,
    /// and `errors` is only kept for 422.
    pub fn http(status: u16, message: Option<String>, errors: Option<FieldErrors>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| MSG_GENERIC_FAILURE.to_string());
        let errors = if status == STATUS_UNPROCESSABLE { errors } else { None };

        Self { message, status: Some(status), errors, kind: ApiErrorKind::Http, detail: None }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            message: MSG_NETWORK_FAILURE.to_string(),
            status: None,
            errors: None,
            kind: ApiErrorKind::Network,
            detail: Some(detail.into()),
        }
    }

    pub fn decode(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            message: MSG_INVALID_RESPONSE.to_string(),
            status,
            errors: None,
            kind: ApiErrorKind::Decode,
            detail: Some(detail.into()),
        }
    }

    pub fn missing_session() -> Self {
        Self::local(ApiErrorKind::MissingSession, MSG_SESSION_MISSING)
    }

    pub fn cancelled() -> Self {
        Self::local(ApiErrorKind::Cancelled, MSG_REQUEST_CANCELLED)
    }

    pub fn in_flight() -> Self {
        Self::local(ApiErrorKind::InFlight, MSG_REQUEST_IN_FLIGHT)
    }

    /// Client-side validation failure routed to form fields.
    pub fn invalid_input(errors: FieldErrors) -> Self {
        Self {
            message: MSG_VALIDATION_FAILED.to_string(),
            status: None,
            errors: Some(errors),
            kind: ApiErrorKind::InvalidInput,
            detail: None,
        }
    }

    fn local(kind: ApiErrorKind, message: &str) -> Self {
        Self { message: message.to_string(), status: None, errors: None, kind, detail: None }
    }

    /// Attach diagnostic detail for logs.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// `true` only for an actual 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(STATUS_NOT_FOUND)
    }

    pub fn is_validation(&self) -> bool {
        self.status == Some(STATUS_UNPROCESSABLE) || self.kind == ApiErrorKind::InvalidInput
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ApiErrorKind::Cancelled
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    /// Messages for one form field; empty when the field has none.
    pub fn field(&self, name: &str) -> &[String] {
        self.errors.as_ref().and_then(|errors| errors.get(name)).unwrap_or(&[])
    }

    /// Map to the dashboard's user-visible failure classes.
    pub fn category(&self) -> FailureCategory {
        match (self.kind, self.status) {
            (ApiErrorKind::MissingSession, _) | (ApiErrorKind::Http, Some(401)) => {
                FailureCategory::AuthenticationAbsent
            }
            (ApiErrorKind::InvalidInput, _) | (ApiErrorKind::Http, Some(STATUS_UNPROCESSABLE)) => {
                FailureCategory::Validation
            }
            (ApiErrorKind::Http, Some(STATUS_NOT_FOUND)) => FailureCategory::NotFound,
            _ => FailureCategory::Generic,
        }
    }

    /// Toast text for this failure.
    pub fn user_message(&self) -> &str {
        &self.message
    }
}
