//! # Mizan Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP access layer ([`ApiClient`]) over a reqwest [`HttpClient`]
//! - Configuration loading from the environment or JSON/TOML files
//! - File-backed and in-memory key/value storage for the session
//!
//! ## Architecture
//! - Implements traits defined in `mizan-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, HttpResponse};
pub use storage::{FileStorage, MemoryStorage};
