//! Sign-in against `auth/login-web`

use std::sync::Arc;

use mizan_common::validation::{EmailValidator, Validator};
use mizan_domain::constants::{LOGIN_PATH, MSG_FIELD_REQUIRED, MSG_INVALID_EMAIL};
use mizan_domain::{ApiError, ApiRequest, MizanError, Session};
use serde_json::{json, Value};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::api::Backend;
use crate::crud::to_field_errors;
use crate::scope::ViewScope;
use crate::session::SessionStore;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be persisted
    #[error(transparent)]
    Storage(#[from] MizanError),
}

impl AuthError {
    /// Toast text for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message().to_string(),
            Self::Storage(err) => err.to_string(),
        }
    }
}

pub struct AuthService {
    backend: Backend,
    cancel: CancellationToken,
}

impl AuthService {
    pub fn new(backend: Backend, scope: &ViewScope) -> Self {
        Self { backend, cancel: scope.token() }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.backend.session()
    }

    /// Validate the credentials, exchange them for a token and store the
    /// session.
    ///
    /// # Errors
    /// `InvalidInput` for a blank or malformed email or a blank password,
    /// the backend's failure as-is (e.g. 401/422), a decode error when the
    /// response holds no token, or a storage error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut validator = Validator::new();
        validator
            .require_text("email", Some(email), MSG_FIELD_REQUIRED)
            .require_text("password", Some(password), MSG_FIELD_REQUIRED);
        if !email.trim().is_empty() {
            validator.validate_field(
                "email",
                email,
                &EmailValidator::new().message(MSG_INVALID_EMAIL),
            );
        }
        if let Err(errors) = validator.finalize() {
            return Err(ApiError::invalid_input(to_field_errors(&errors)).into());
        }

        let email = email.trim();
        let request = ApiRequest::post(LOGIN_PATH, json!({ "email": email, "password": password }));
        let body = self.backend.send_anonymous(request, &self.cancel).await?;

        let session = session_from_login(&body, email)?;
        self.backend.session().sign_in(session.clone())?;

        info!(user = %session.user_name, "login succeeded");
        Ok(session)
    }

    /// Forget the session locally; the backend keeps no session state.
    ///
    /// # Errors
    /// Storage write failures.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.backend.session().sign_out()?;
        Ok(())
    }
}

/// Token and display name from a login response.
///
/// The name is looked up as `user.name`, `name`, `admin.name`, falling back
/// to the email that signed in.
fn session_from_login(body: &Value, email: &str) -> Result<Session, ApiError> {
    let lookup = |pointer: &str| {
        body.pointer(pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let token = lookup("/token")
        .or_else(|| lookup("/data/token"))
        .ok_or_else(|| ApiError::decode(None, "login response has no token"))?;

    let user_name = ["/user/name", "/name", "/admin/name", "/data/user/name"]
        .into_iter()
        .find_map(lookup)
        .unwrap_or(email);

    Ok(Session::new(token, user_name))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn name_lookup_order() {
        let body = json!({ "token": "t", "user": { "name": "Ali" }, "name": "ignored" });
        assert_eq!(session_from_login(&body, "a@b.co").unwrap().user_name, "Ali");

        let body = json!({ "token": "t", "name": "Top" });
        assert_eq!(session_from_login(&body, "a@b.co").unwrap().user_name, "Top");

        let body = json!({ "token": "t", "admin": { "name": "Root" } });
        assert_eq!(session_from_login(&body, "a@b.co").unwrap().user_name, "Root");

        let body = json!({ "token": "t", "user": { "name": "  " } });
        assert_eq!(session_from_login(&body, "a@b.co").unwrap().user_name, "a@b.co");
    }

    #[test]
    fn missing_or_blank_token_is_a_decode_error() {
        assert!(session_from_login(&json!({ "status": true }), "a@b.co").is_err());
        assert!(session_from_login(&json!({ "token": "" }), "a@b.co").is_err());
        assert!(session_from_login(&json!({ "token": 12 }), "a@b.co").is_err());
    }

    #[test]
    fn token_may_be_nested_under_data() {
        let body = json!({ "status": true, "data": { "token": "tok", "user": { "name": "N" } } });
        let session = session_from_login(&body, "a@b.co").unwrap();
        assert_eq!(session.token, "tok");
        assert_eq!(session.user_name, "N");
    }
}
