//! Stock carried by each sales representative

use mizan_domain::constants::MSG_FIELD_REQUIRED;
use mizan_domain::{
    normalize_list, ApiError, ApiRequest, CarStockItem, FieldErrors, ResourceKind,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::api::Backend;
use crate::scope::ViewScope;

pub struct CarStockService {
    backend: Backend,
    cancel: CancellationToken,
}

impl CarStockService {
    pub fn new(backend: Backend, scope: &ViewScope) -> Self {
        Self { backend, cancel: scope.token() }
    }

    /// `GET admin/car-stocks/{rep_slug}`.
    ///
    /// # Errors
    /// `InvalidInput` on `rep` for a blank slug, the request's failure, or a
    /// decode error for an unrecognised shape.
    #[instrument(skip(self))]
    pub async fn for_rep(&self, rep_slug: &str) -> Result<Vec<CarStockItem>, ApiError> {
        let rep_slug = rep_slug.trim().trim_matches('/');
        if rep_slug.is_empty() {
            return Err(ApiError::invalid_input(FieldErrors::new().with("rep", MSG_FIELD_REQUIRED)));
        }

        let request = ApiRequest::get(ResourceKind::CarStocks.member_path(rep_slug));
        let body = self.backend.send(request, &self.cancel).await?;

        let page = normalize_list::<CarStockItem>(body, ResourceKind::CarStocks)?;
        debug!(lines = page.len(), "car stock fetched");
        Ok(page.items)
    }
}
