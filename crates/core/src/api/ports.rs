//! Port interface for the backend HTTP gateway

use async_trait::async_trait;
use mizan_domain::{ApiError, ApiRequest};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Sends one request to the backend
///
/// Implementations return the 2xx body unchanged and normalize every failure
/// into an [`ApiError`]. Cancelling `cancel` must abandon the request and
/// yield [`ApiError::cancelled`].
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn send(&self, request: ApiRequest, cancel: &CancellationToken) -> Result<Value, ApiError>;
}
