//! # Mizan CLI
//!
//! Command-line front end for the back-office API.
//!
//! This crate contains:
//! - Command-line parsing (`clap`)
//! - Application context (dependency injection)
//! - One handler per command, returning JSON for stdout
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires the HTTP access layer and session storage into the core services

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use cli::{Cli, Command};
pub use commands::{run, CommandError};
pub use context::AppContext;
