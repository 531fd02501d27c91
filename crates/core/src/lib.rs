//! # Mizan Core
//!
//! Application logic of the back-office client - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the HTTP gateway and key/value storage
//! - The session store and view lifetimes
//! - Use cases: sign-in, generic record CRUD, dashboard and car stock
//!
//! ## Architecture Principles
//! - Only depends on `mizan-common` and `mizan-domain`
//! - No HTTP, file or platform code
//! - All external dependencies via traits

pub mod api;
pub mod auth;
pub mod crud;
pub mod dashboard;
pub mod inventory;
pub mod scope;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use api::ports::ApiGateway;
pub use api::Backend;
pub use auth::{AuthError, AuthService};
pub use crud::{CrudController, ListQuery, MutationOutcome, ResourceSchema, SaveMode};
pub use dashboard::DashboardService;
pub use inventory::CarStockService;
pub use scope::ViewScope;
pub use session::ports::KeyValueStorage;
pub use session::SessionStore;
