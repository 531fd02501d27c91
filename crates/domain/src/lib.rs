//! # Mizan Domain
//!
//! Data types shared by every Mizan crate.
//!
//! This crate contains:
//! - Backend records (customers, products, orders, ...) and the resource
//!   catalogue
//! - The session, request description and normalized [`ApiError`]
//! - Response envelope normalization
//! - Configuration structures, constants and error types
//!
//! ## Architecture
//! - No dependencies on other Mizan crates
//! - Only external dependencies allowed
//! - Pure data, no I/O

pub mod api_error;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod errors;
pub mod macros;
pub mod request;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use api_error::{ApiError, ApiErrorKind, FailureCategory, FieldErrors};
pub use config::*;
pub use envelope::{normalize_item, normalize_list, Envelope, Page};
pub use errors::*;
pub use request::{ApiRequest, HttpMethod, QueryParams};
pub use types::*;
pub use utils::slugify;
