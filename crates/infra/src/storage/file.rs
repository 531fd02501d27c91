use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use mizan_core::KeyValueStorage;
use mizan_domain::{MizanError, Result, StorageConfig};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::InfraError;

const DEFAULT_DIR: &str = ".mizan";
const DEFAULT_FILE: &str = "storage.json";

/// `~/.mizan/storage.json`, from `HOME` or `USERPROFILE`.
///
/// # Errors
/// `MizanError::Config` when neither variable is set.
pub fn default_storage_path() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(DEFAULT_DIR).join(DEFAULT_FILE))
        .ok_or_else(|| {
            MizanError::Config(
                "cannot locate a home directory for session storage; set storage.path".to_string(),
            )
        })
}

/// Storage persisted as one flat JSON object on disk
///
/// The whole object is held in memory and rewritten on every change. Writes
/// go to a sibling temp file that is then renamed over the original, so a
/// crash never leaves a half-written file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open `path`, starting empty when the file does not exist yet.
    ///
    /// # Errors
    /// `MizanError::Storage` when the file exists but cannot be read or is
    /// not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = if path.exists() { read_items(&path)? } else { BTreeMap::new() };
        debug!(path = %path.display(), keys = items.len(), "opened file storage");

        Ok(Self { path, items: RwLock::new(items) })
    }

    /// Open the configured path, or the default one.
    ///
    /// # Errors
    /// As for [`FileStorage::open`] and [`default_storage_path`].
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::open(path.clone()),
            None => Self::open(default_storage_path()?),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }

        let contents = serde_json::to_vec_pretty(items)
            .map_err(|e| MizanError::from(InfraError::from(e)))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = create_private(&tmp).map_err(storage_err)?;
        file.write_all(&contents).map_err(storage_err)?;
        file.sync_all().map_err(storage_err)?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to replace storage file");
            fs::remove_file(&tmp).ok();
            storage_err(e)
        })
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write();
        let previous = items.insert(key.to_string(), value.to_string());

        if let Err(err) = self.persist(&items) {
            match previous {
                Some(previous) => items.insert(key.to_string(), previous),
                None => items.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write();
        let Some(previous) = items.remove(key) else {
            return Ok(());
        };

        if let Err(err) = self.persist(&items) {
            items.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }
}

fn read_items(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = fs::read_to_string(path).map_err(storage_err)?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: Value =
        serde_json::from_str(&contents).map_err(|e| MizanError::from(InfraError::from(e)))?;
    let Value::Object(map) = value else {
        return Err(MizanError::Storage(format!(
            "{} does not hold a JSON object",
            path.display()
        )));
    };

    // Values are strings; anything else is kept in its JSON text form.
    Ok(map
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

/// Create (or truncate) `path` readable by its owner only; it holds the
/// bearer token.
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    // A stale temp file keeps its old mode, and `mode` only applies on create.
    match fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => return Err(err),
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

fn storage_err(err: std::io::Error) -> MizanError {
    MizanError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_starts_empty_and_is_created_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("userToken").unwrap(), None);
        assert!(!path.exists());

        storage.set_item("userToken", "abc").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn values_survive_reopening() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item("userToken", "abc").unwrap();
            storage.set_item("userName", "سارة").unwrap();
            storage.remove_item("userToken").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("userToken").unwrap(), None);
        assert_eq!(reopened.get_item("userName").unwrap().as_deref(), Some("سارة"));
    }

    #[test]
    fn non_string_values_are_read_as_json_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{ "userToken": "abc", "count": 3 }"#).unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("count").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(FileStorage::open(&path), Err(MizanError::Storage(_))));

        fs::write(&path, "{ broken").unwrap();
        assert!(matches!(FileStorage::open(&path), Err(MizanError::Storage(_))));
    }

    #[cfg(unix)]
    #[test]
    fn storage_file_is_private_to_its_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(path.with_extension("json.tmp"), "{}").unwrap();
        fs::set_permissions(path.with_extension("json.tmp"), fs::Permissions::from_mode(0o644))
            .unwrap();

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("userToken", "tok123").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "storage file mode is {mode:o}");

        storage.set_item("userName", "Huda").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn from_config_uses_the_configured_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        let storage =
            FileStorage::from_config(&StorageConfig { path: Some(path.clone()) }).unwrap();
        assert_eq!(storage.path(), path.as_path());
    }
}
