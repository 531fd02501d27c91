//! Dashboard landing figures

use mizan_domain::{normalize_item, ApiError, ApiRequest, DashboardStats, ResourceKind};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::api::Backend;
use crate::scope::ViewScope;

pub struct DashboardService {
    backend: Backend,
    cancel: CancellationToken,
}

impl DashboardService {
    pub fn new(backend: Backend, scope: &ViewScope) -> Self {
        Self { backend, cancel: scope.token() }
    }

    /// `GET admin/dashboard`, accepted bare, under `data` or under
    /// `dashboard`.
    ///
    /// # Errors
    /// The request's failure, or a decode error when no object is found.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let body = self
            .backend
            .send(ApiRequest::get(ResourceKind::Dashboard.path()), &self.cancel)
            .await?;
        normalize_item(body, ResourceKind::Dashboard)
    }
}
