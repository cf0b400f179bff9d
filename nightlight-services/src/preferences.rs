// SPDX-License-Identifier: MIT OR Apache-2.0
//! Durable storage of the theme preference.
//!
//! The store is best-effort: neither [PreferenceStore::load] nor
//! [PreferenceStore::save] can fail from the caller's point of view. Read
//! failures and corrupt records read as "no preference"; write failures only
//! mean the preference will not survive a restart. Both are logged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nightlight_theme::{ThemeConfig, ThemePreference};
use smol::lock::Mutex as AsyncMutex;

use crate::error::StoreError;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Persists a single [ThemePreference] under a fixed key.
///
/// Cloning is cheap and clones share the backend and the write ordering.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
    key: Arc<str>,
    issued: Arc<AtomicU64>,
    last_written: Arc<AsyncMutex<u64>>,
}

impl PreferenceStore {
    /// Create a store writing under `key` in `backend`.
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: Arc::from(key.into()),
            issued: Arc::new(AtomicU64::new(0)),
            last_written: Arc::new(AsyncMutex::new(0)),
        }
    }

    /// Create a file-backed store from a [ThemeConfig].
    ///
    /// Uses the configured store path, or the XDG data directory otherwise.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, StoreError> {
        let backend = match config.store_path() {
            Some(path) => FileStore::new(path),
            None => FileStore::in_data_dir()?,
        };
        log::debug!(
            "Theme preference stored in {:?} under '{}'",
            backend.path(),
            config.storage_key()
        );
        Ok(Self::new(Arc::new(backend), config.storage_key()))
    }

    /// Create a store that only lives as long as the process.
    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryStore::new()), key)
    }

    /// The key the preference is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted preference.
    ///
    /// Returns `None` if there is no record, the record is not a valid token,
    /// or the backend failed.
    pub async fn load(&self) -> Option<ThemePreference> {
        let token = match self.backend.get(&self.key).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                log::debug!("No persisted theme preference under '{}'", self.key);
                return None;
            },
            Err(e) => {
                log::warn!("Failed to read theme preference: {}", e);
                return None;
            },
        };

        match token.parse::<ThemePreference>() {
            Ok(preference) => {
                log::debug!("Loaded theme preference '{}'", preference);
                Some(preference)
            },
            Err(e) => {
                log::warn!("Ignoring persisted theme preference: {}", e);
                None
            },
        }
    }

    /// Persist `preference`. Failures are logged and otherwise ignored.
    pub async fn save(&self, preference: ThemePreference) {
        let sequence = self.next_sequence();
        self.save_sequenced(sequence, preference).await;
    }

    /// Reserve the ordering slot for a save that will run later.
    ///
    /// Saves are applied in sequence order: a save whose sequence is not newer
    /// than the last one written is dropped, so a slow early write can never
    /// overwrite a later one.
    pub fn next_sequence(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Persist `preference` in the slot reserved by [PreferenceStore::next_sequence].
    pub async fn save_sequenced(&self, sequence: u64, preference: ThemePreference) {
        let mut last_written = self.last_written.lock().await;
        if sequence <= *last_written {
            log::debug!(
                "Dropping stale theme preference save #{} (#{} already written)",
                sequence,
                *last_written
            );
            return;
        }
        *last_written = sequence;

        match self.backend.set(&self.key, preference.as_token()).await {
            Ok(()) => log::debug!("Saved theme preference '{}'", preference),
            Err(e) => log::error!("Failed to save theme preference '{}': {}", preference, e),
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("key", &self.key)
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
