//! Persisted user settings.
//!
//! A tiny string key/value store standing in for the browser's local
//! storage. Components never reach for a global: they are handed a
//! [`SettingsStore`] at construction and read/write through it.
//!
//! Values are overwritten wholesale and there is no schema versioning
//! beyond the key name itself (see [`PROFILE_PICTURE_KEY`]). Two writers
//! racing on the same file resolve as last-write-wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Key holding the uploaded profile picture as a data URL.
pub const PROFILE_PICTURE_KEY: &str = "profilePicture_v2";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt settings file: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
    fn remove(&mut self, key: &str) -> Result<(), SettingsError>;
}

/// Volatile store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON-file backed store.
///
/// The whole file is read once on [`FileStore::open`] and rewritten on
/// every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; a file
    /// that exists but does not parse is an error.
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        let values = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        store.remove(THEME_KEY).unwrap();
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(&tmp.path().join("settings.json")).unwrap();
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/settings.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(THEME_KEY, "light").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn file_store_last_write_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        let mut a = FileStore::open(&path).unwrap();
        let mut b = FileStore::open(&path).unwrap();
        a.set(THEME_KEY, "light").unwrap();
        b.set(THEME_KEY, "dark").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_corrupt_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "[[[").unwrap();
        assert!(matches!(FileStore::open(&path), Err(SettingsError::Json(_))));
    }

    #[test]
    fn file_store_remove_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set(PROFILE_PICTURE_KEY, "data:image/jpeg;base64,AAAA").unwrap();
        store.remove(PROFILE_PICTURE_KEY).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(PROFILE_PICTURE_KEY), None);
    }
}
