//! HTTP access layer for the admin backend
//!
//! [`ApiClient`] implements the core `ApiGateway` port: one request, sent
//! once, with the 2xx body returned unchanged and every failure normalized
//! into `mizan_domain::ApiError`.

pub mod client;
pub mod errors;

pub use client::{ApiClient, ApiClientBuilder};
pub use errors::{map_status_error, success_body};
