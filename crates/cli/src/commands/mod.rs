//! Command handlers
//!
//! Each handler returns the JSON printed on stdout. Failures carry the
//! localized message shown to the user.

pub mod auth;
pub mod dashboard;
pub mod resources;

use std::time::Instant;

use mizan_core::AuthError;
use mizan_domain::{ApiError, MizanError};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::cli::Command;
use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] MizanError),

    /// Bad command-line input caught before any request
    #[error("{0}")]
    Usage(String),
}

impl CommandError {
    /// Text printed to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message().to_string(),
            Self::Auth(err) => err.user_message(),
            Self::Domain(err) => err.to_string(),
            Self::Usage(message) => message.clone(),
        }
    }

    /// Field-level messages, when the failure was a validation error.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let errors = match self {
            Self::Api(err) | Self::Auth(AuthError::Api(err)) => err.field_errors(),
            _ => None,
        };
        errors
            .map(|errors| {
                errors
                    .iter()
                    .flat_map(|(field, messages)| {
                        messages.iter().map(move |m| (field.to_string(), m.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Run one command against `ctx`, logging its outcome.
///
/// # Errors
/// Whatever the handler fails with.
pub async fn run(ctx: &AppContext, command: Command) -> Result<Value, CommandError> {
    let command_name = command.name();
    let start = Instant::now();
    info!(command = command_name, "running command");

    let result = dispatch(ctx, command).await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    if let Err(err) = &result {
        info!(command = command_name, error_type = error_label(err), "command failed");
    }
    result
}

async fn dispatch(ctx: &AppContext, command: Command) -> Result<Value, CommandError> {
    match command {
        Command::Login { email, password } => auth::login(ctx, &email, &password).await,
        Command::Logout => auth::logout(ctx),
        Command::Whoami => auth::whoami(ctx),
        Command::List { resource, query } => resources::list(ctx, resource, &query).await,
        Command::Show { resource, slug } => resources::show(ctx, resource, &slug).await,
        Command::Create { resource, record, refresh } => {
            resources::create(ctx, resource, &record, &refresh).await
        }
        Command::Update { resource, slug, record, refresh } => {
            resources::update(ctx, resource, &slug, &record, &refresh).await
        }
        Command::Delete { resource, slug, refresh } => {
            resources::delete(ctx, resource, &slug, &refresh).await
        }
        Command::CheckSlug { resource, name } => resources::check_slug(ctx, resource, &name).await,
        Command::Dashboard => dashboard::stats(ctx).await,
        Command::CarStock { rep } => dashboard::car_stock(ctx, &rep).await,
    }
}

/// Serialize a handler result for stdout.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, CommandError> {
    serde_json::to_value(value)
        .map_err(|e| MizanError::Internal(format!("result could not be serialized: {e}")).into())
}
