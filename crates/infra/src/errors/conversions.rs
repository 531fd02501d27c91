//! Conversions from external infrastructure errors into domain errors.

use mizan_domain::{ApiError, MizanError};
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use std::io::Error as IoError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MizanError);

impl From<InfraError> for MizanError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MizanError> for InfraError {
    fn from(value: MizanError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMizanError {
    fn into_mizan(self) -> MizanError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → MizanError */
/* -------------------------------------------------------------------------- */

impl IntoMizanError for IoError {
    fn into_mizan(self) -> MizanError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => MizanError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                MizanError::Storage(format!("permission denied: {self}"))
            }
            _ => MizanError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_mizan())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MizanError */
/* -------------------------------------------------------------------------- */

impl IntoMizanError for JsonError {
    fn into_mizan(self) -> MizanError {
        MizanError::Storage(format!(
            "malformed JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_mizan())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → MizanError */
/* -------------------------------------------------------------------------- */

impl IntoMizanError for UrlError {
    fn into_mizan(self) -> MizanError {
        MizanError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_mizan())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MizanError / ApiError */
/* -------------------------------------------------------------------------- */

impl IntoMizanError for HttpError {
    fn into_mizan(self) -> MizanError {
        if self.is_builder() {
            MizanError::Config(format!("http client configuration rejected: {self}"))
        } else {
            MizanError::Network(describe(&self))
        }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_mizan())
    }
}

/// Network-level failure of a request that produced no response.
pub(crate) fn api_error_from_reqwest(err: &HttpError) -> ApiError {
    ApiError::network(describe(err))
}

fn describe(err: &HttpError) -> String {
    let what = if err.is_timeout() {
        "http request timed out"
    } else if err.is_connect() {
        "http connection failed"
    } else if err.is_body() || err.is_decode() {
        "http response body could not be read"
    } else if err.is_redirect() {
        "http redirect policy violated"
    } else {
        "http request failed"
    };

    match err.url() {
        Some(url) => format!("{what} ({}{}): {err}", url.origin().ascii_serialization(), url.path()),
        None => format!("{what}: {err}"),
    }
}
