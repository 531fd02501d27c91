//! The one controller behind every record screen

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mizan_domain::constants::MSG_NAME_TAKEN;
use mizan_domain::{
    normalize_item, normalize_list, slugify, ApiError, ApiRequest, FieldErrors, Page,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::query::ListQuery;
use super::schema::{ResourceSchema, SaveMode};
use super::to_field_errors;
use crate::api::Backend;
use crate::scope::ViewScope;

/// Result of a successful create, update or delete
#[derive(Debug, Clone)]
pub struct MutationOutcome<R> {
    /// Backend response body, unchanged
    pub response: Value,
    /// The list re-fetched after the mutation resolved
    ///
    /// A failed re-fetch does not undo the mutation; the caller shows the
    /// error and keeps the stale list.
    pub refreshed: Result<Page<R>, ApiError>,
}

/// Clears the in-flight flag however the mutation ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CrudController<S: ResourceSchema> {
    backend: Backend,
    cancel: CancellationToken,
    in_flight: Arc<AtomicBool>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: ResourceSchema> CrudController<S> {
    /// Controller whose requests die with `scope`.
    pub fn new(backend: Backend, scope: &ViewScope) -> Self {
        Self {
            backend,
            cancel: scope.token(),
            in_flight: Arc::new(AtomicBool::new(false)),
            _schema: PhantomData,
        }
    }

    /// `true` while a create, update or delete is pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// One page of records matching `query`.
    ///
    /// # Errors
    /// The request's [`ApiError`], or a decode error for an unrecognised
    /// response shape.
    #[instrument(skip(self, query), fields(resource = %S::KIND))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<S::Record>, ApiError> {
        let request = ApiRequest::get(S::KIND.path()).with_query(query.to_params());
        let body = self.backend.send(request, &self.cancel).await?;

        let page = normalize_list(body, S::KIND)?;
        debug!(count = page.len(), "list fetched");
        Ok(page)
    }

    /// The record at `slug`, or `None` when the backend answers 404.
    ///
    /// # Errors
    /// Any failure other than 404.
    #[instrument(skip(self), fields(resource = %S::KIND))]
    pub async fn fetch(&self, slug: &str) -> Result<Option<S::Record>, ApiError> {
        match self.backend.send(ApiRequest::get(S::KIND.member_path(slug)), &self.cancel).await {
            Ok(body) => normalize_item(body, S::KIND).map(Some),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Probe whether `slug` is free: 404 means available, any 2xx means
    /// taken.
    ///
    /// # Errors
    /// Any failure other than 404.
    #[instrument(skip(self), fields(resource = %S::KIND))]
    pub async fn is_slug_available(&self, slug: &str) -> Result<bool, ApiError> {
        match self.backend.send(ApiRequest::get(S::KIND.member_path(slug)), &self.cancel).await {
            Ok(_) => Ok(false),
            Err(err) if err.is_not_found() => Ok(true),
            Err(err) => Err(err),
        }
    }

    /// Validate, check the derived slug is free, `POST`, then re-fetch
    /// `refresh`.
    ///
    /// # Errors
    /// `InFlight` when another mutation is pending, `InvalidInput` for
    /// client-side rule violations or a taken name, or the request's failure.
    #[instrument(skip_all, fields(resource = %S::KIND))]
    pub async fn create(
        &self,
        record: &S::Record,
        refresh: &ListQuery,
    ) -> Result<MutationOutcome<S::Record>, ApiError> {
        let _guard = self.begin()?;
        self.check(record, SaveMode::Create, None).await?;

        let request = ApiRequest::post(S::KIND.path(), to_body(record)?);
        let response = self.backend.send(request, &self.cancel).await?;
        info!("record created");

        Ok(self.finish(response, refresh).await)
    }

    /// Like [`create`](Self::create) against `slug`; the uniqueness probe
    /// only runs when the edited name derives a different slug.
    ///
    /// # Errors
    /// As for [`create`](Self::create).
    #[instrument(skip(self, record, refresh), fields(resource = %S::KIND))]
    pub async fn update(
        &self,
        slug: &str,
        record: &S::Record,
        refresh: &ListQuery,
    ) -> Result<MutationOutcome<S::Record>, ApiError> {
        let _guard = self.begin()?;
        self.check(record, SaveMode::Update, Some(slug)).await?;

        let request = ApiRequest::put(S::KIND.member_path(slug), to_body(record)?);
        let response = self.backend.send(request, &self.cancel).await?;
        info!("record updated");

        Ok(self.finish(response, refresh).await)
    }

    /// `DELETE` the record at `slug`, then re-fetch `refresh`.
    ///
    /// # Errors
    /// `InFlight` when another mutation is pending, or the request's failure.
    #[instrument(skip(self, refresh), fields(resource = %S::KIND))]
    pub async fn delete(
        &self,
        slug: &str,
        refresh: &ListQuery,
    ) -> Result<MutationOutcome<S::Record>, ApiError> {
        let _guard = self.begin()?;

        let response =
            self.backend.send(ApiRequest::delete(S::KIND.member_path(slug)), &self.cancel).await?;
        info!("record deleted");

        Ok(self.finish(response, refresh).await)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, ApiError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!(resource = %S::KIND, "mutation rejected, another one is pending");
                ApiError::in_flight()
            })?;
        Ok(InFlightGuard(&self.in_flight))
    }

    async fn check(
        &self,
        record: &S::Record,
        mode: SaveMode,
        current_slug: Option<&str>,
    ) -> Result<(), ApiError> {
        if let Err(errors) = S::validate(record, mode) {
            debug!(fields = errors.error_count(), "client-side validation failed");
            return Err(ApiError::invalid_input(to_field_errors(&errors)));
        }

        let Some(slug) = S::unique_name(record).map(slugify).filter(|s| !s.is_empty()) else {
            return Ok(());
        };
        let unchanged = |current: &str| current.trim_matches('/') == slug;
        if mode == SaveMode::Update
            && (current_slug.is_some_and(unchanged) || S::slug_of(record).is_some_and(unchanged))
        {
            return Ok(());
        }

        if !self.is_slug_available(&slug).await? {
            debug!(%slug, "derived slug already taken");
            return Err(ApiError::invalid_input(
                FieldErrors::new().with(S::UNIQUE_FIELD, MSG_NAME_TAKEN),
            ));
        }
        Ok(())
    }

    async fn finish(&self, response: Value, refresh: &ListQuery) -> MutationOutcome<S::Record> {
        let refreshed = self.list(refresh).await;
        if let Err(err) = &refreshed {
            warn!(error = %err, "re-fetch after mutation failed");
        }
        MutationOutcome { response, refreshed }
    }
}

fn to_body<R: serde::Serialize>(record: &R) -> Result<Value, ApiError> {
    serde_json::to_value(record)
        .map_err(|e| ApiError::decode(None, format!("record could not be serialized: {e}")))
}
