use std::time::Duration;

use mizan_core::AuthError;
use mizan_domain::{ApiErrorKind, MizanError};
use tracing::{info, warn};

use crate::commands::CommandError;

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier (e.g. `"resources::list"`); callers must
/// not put record data or credentials in it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `CommandError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &CommandError) -> &'static str {
    match error {
        CommandError::Api(err) | CommandError::Auth(AuthError::Api(err)) => match err.kind {
            ApiErrorKind::Http => match err.status {
                Some(401) => "unauthorized",
                Some(404) => "not_found",
                Some(422) => "validation",
                Some(status) if status >= 500 => "server",
                _ => "http",
            },
            ApiErrorKind::Network => "network",
            ApiErrorKind::Decode => "decode",
            ApiErrorKind::MissingSession => "missing_session",
            ApiErrorKind::Cancelled => "cancelled",
            ApiErrorKind::InFlight => "in_flight",
            ApiErrorKind::InvalidInput => "invalid_input",
        },
        CommandError::Auth(AuthError::Storage(err)) | CommandError::Domain(err) => match err {
            MizanError::Config(_) => "config",
            MizanError::Storage(_) => "storage",
            MizanError::Network(_) => "network",
            MizanError::NotFound(_) => "not_found",
            MizanError::Internal(_) => "internal",
        },
        CommandError::Usage(_) => "usage",
    }
}
