//! Tracing setup shared by every Mizan binary
//!
//! `RUST_LOG` always wins; the configured directive is only the fallback.

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("invalid log directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Build the filter from `RUST_LOG`, falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter, TracingInitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_directive).map_err(|e| TracingInitError::InvalidDirective {
        directive: default_directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `json` switches to one JSON object per line.
pub fn init_tracing(default_directive: &str, json: bool) -> Result<(), TracingInitError> {
    let filter = env_filter(default_directive)?;
    let builder = fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr);

    let result = if json { builder.json().try_init() } else { builder.compact().try_init() };
    result.map_err(|_| TracingInitError::AlreadyInstalled)
}
