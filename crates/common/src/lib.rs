//! Modular common utilities shared across Mizan crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: field validation
//! - `observability`: tracing subscriber setup (not included by default)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Observability tier
// --------------------------------------------------------------
#[cfg(feature = "observability")]
pub mod observability;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "observability")]
pub use observability::{init_tracing, TracingInitError};
#[cfg(feature = "foundation")]
pub use validation::{
    EmailValidator, FieldValidator, RangeValidator, StringValidator, ValidationError,
    ValidationResult, Validator,
};
