// SPDX-License-Identifier: MIT OR Apache-2.0
//! Durable key-value backends.
//!
//! [FileStore] keeps a flat TOML table on disk; [MemoryStore] keeps the same
//! table in memory for tests and platforms without a writable data dir.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use smol::fs;
use smol::lock::Mutex as AsyncMutex;
use xdg::BaseDirectories;

use crate::error::StoreError;

/// XDG prefix used for every nightlight directory.
pub const XDG_PREFIX: &str = "nightlight";

/// File name of the preference store inside the data directory.
pub const STORE_FILE_NAME: &str = "preferences.toml";

/// An asynchronous string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is no record.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous record.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the record under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// A TOML file of `key = "value"` pairs.
///
/// Writes are serialized through an async lock and go through a temporary
/// file that is renamed over the store, so a crash mid-write leaves the
/// previous contents intact.
pub struct FileStore {
    path: PathBuf,
    write_lock: AsyncMutex<()>,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: AsyncMutex::new(()),
        }
    }

    /// Create a store at `$XDG_DATA_HOME/nightlight/preferences.toml`.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        Ok(Self::new(xdg_dirs.get_data_home().join(STORE_FILE_NAME)))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_table(&self) -> Result<toml::Table, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        toml::from_str::<toml::Table>(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the table for a read-modify-write. A corrupt file is replaced rather than
    /// blocking every future write.
    async fn read_table_for_write(&self) -> Result<toml::Table, StoreError> {
        match self.read_table().await {
            Err(StoreError::Parse { path, source }) => {
                log::warn!("Discarding malformed store file {:?}: {}", path, source);
                Ok(toml::Table::new())
            },
            other => other,
        }
    }

    async fn write_table(&self, table: &toml::Table) -> Result<(), StoreError> {
        let content = toml::to_string(table)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let table = self.read_table().await?;
        Ok(table.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.read_table_for_write().await?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.write_table(&table).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.read_table_for_write().await?;
        if table.remove(key).is_some() {
            self.write_table(&table).await?;
        }
        Ok(())
    }
}

/// An in-memory store. Contents do not survive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one record.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        store
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join(STORE_FILE_NAME));

        let value = smol::block_on(store.get("theme_preference")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE_NAME);
        let store = FileStore::new(&path);

        smol::block_on(async {
            store.set("theme_preference", "dark").await.unwrap();
            store.set("other", "kept").await.unwrap();
            assert_eq!(store.get("theme_preference").await.unwrap().as_deref(), Some("dark"));

            store.remove("theme_preference").await.unwrap();
            assert_eq!(store.get("theme_preference").await.unwrap(), None);
            assert_eq!(store.get("other").await.unwrap().as_deref(), Some("kept"));
        });

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_file_store_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        std::fs::write(&path, "theme_preference = \"dark").unwrap();
        let store = FileStore::new(&path);

        let err = smol::block_on(store.get("theme_preference")).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_file_store_write_replaces_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        std::fs::write(&path, "not = [valid").unwrap();
        let store = FileStore::new(&path);

        smol::block_on(async {
            store.set("theme_preference", "light").await.unwrap();
            assert_eq!(store.get("theme_preference").await.unwrap().as_deref(), Some("light"));
        });
    }

    #[test]
    fn test_file_store_non_string_value_is_stringified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        std::fs::write(&path, "theme_preference = 3\n").unwrap();
        let store = FileStore::new(&path);

        let value = smol::block_on(store.get("theme_preference")).unwrap();
        assert_eq!(value.as_deref(), Some("3"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_entry("k", "v");
        smol::block_on(async {
            assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
            store.set("k", "w").await.unwrap();
            assert_eq!(store.get("k").await.unwrap().as_deref(), Some("w"));
            store.remove("k").await.unwrap();
            assert_eq!(store.get("k").await.unwrap(), None);
        });
    }
}
