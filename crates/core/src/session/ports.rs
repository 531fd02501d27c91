//! Port interface for persisted key/value storage
//!
//! Same contract as browser local storage: string keys, string values,
//! missing keys read as `None`.

use mizan_domain::Result;

pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
