//! Session ownership

pub mod ports;
pub mod store;

pub use store::SessionStore;
