//! Error conversions between foreign crates and domain errors

mod conversions;

pub use conversions::InfraError;
pub(crate) use conversions::api_error_from_reqwest;
