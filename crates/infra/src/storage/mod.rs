//! Key/value storage backing the session
//!
//! Both implementations follow browser local storage semantics: string
//! keys, string values, missing keys read as `None`.

mod file;
mod memory;

pub use file::{default_storage_path, FileStorage};
pub use memory::MemoryStorage;
