//! Authenticated access to the backend

pub mod ports;

use std::sync::Arc;

use mizan_domain::{ApiError, ApiRequest};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use self::ports::ApiGateway;
use crate::session::SessionStore;

/// Gateway plus session: every call carries the current bearer token
#[derive(Clone)]
pub struct Backend {
    gateway: Arc<dyn ApiGateway>,
    session: Arc<SessionStore>,
}

impl Backend {
    pub fn new(gateway: Arc<dyn ApiGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Send with the session token.
    ///
    /// Fails with `MissingSession` before any I/O when signed out, and with
    /// `Cancelled` when `cancel` has already fired.
    #[instrument(skip(self, request, cancel), fields(method = %request.method, path = %request.path))]
    pub async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        let token = self.session.require_token()?;
        self.dispatch(request.with_token(Some(token)), cancel).await
    }

    /// Send without a token (sign-in).
    pub async fn send_anonymous(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        self.dispatch(request.with_token(None::<String>), cancel).await
    }

    async fn dispatch(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        if cancel.is_cancelled() {
            debug!("view closed, request not sent");
            return Err(ApiError::cancelled());
        }

        self.gateway.send(request, cancel).await
    }
}
