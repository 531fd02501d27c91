//! Sign-in and sign-out

pub mod service;

pub use service::{AuthError, AuthService};
