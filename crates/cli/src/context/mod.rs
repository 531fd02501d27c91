//! Application context - dependency injection container

use std::sync::Arc;

use mizan_core::{
    AuthService, Backend, CarStockService, CrudController, DashboardService, KeyValueStorage,
    ResourceSchema, SessionStore, ViewScope,
};
use mizan_domain::{Config, Result};
use mizan_infra::{ApiClient, FileStorage};
use tracing::{debug, info};

/// Application context - holds all services and dependencies
///
/// One context lives for one command. Its [`ViewScope`] plays the part of
/// the open screen: services built from it are cancelled when the context
/// shuts down or is dropped.
pub struct AppContext {
    pub config: Config,
    backend: Backend,
    scope: ViewScope,
}

impl AppContext {
    /// Wire the API client and file-backed session storage from `config`.
    ///
    /// # Errors
    /// Invalid API configuration, or a storage file that cannot be read.
    pub fn new(config: Config) -> Result<Self> {
        let storage = FileStorage::from_config(&config.storage)?;
        info!(path = %storage.path().display(), "session storage opened");
        Self::with_storage(config, Arc::new(storage))
    }

    /// Like [`AppContext::new`] with a caller-supplied storage.
    ///
    /// # Errors
    /// Invalid API configuration, or a storage read failure while restoring
    /// the session.
    pub fn with_storage(config: Config, storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        let session = SessionStore::load(storage)?;
        debug!(
            base_url = client.base_url(),
            authenticated = session.is_authenticated(),
            "application context ready"
        );

        Ok(Self {
            config,
            backend: Backend::new(Arc::new(client), Arc::new(session)),
            scope: ViewScope::new(),
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.backend.session()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.backend.clone(), &self.scope)
    }

    pub fn controller<S: ResourceSchema>(&self) -> CrudController<S> {
        CrudController::new(self.backend.clone(), &self.scope)
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.backend.clone(), &self.scope)
    }

    pub fn car_stock(&self) -> CarStockService {
        CarStockService::new(self.backend.clone(), &self.scope)
    }

    /// Cancel every request still pending on this context.
    pub fn shutdown(&self) {
        if !self.scope.is_closed() {
            debug!("closing application context");
            self.scope.close();
        }
    }
}
