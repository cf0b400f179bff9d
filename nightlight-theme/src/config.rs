// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Theme Configuration
//!
//! Controls where the theme preference is persisted. Every field is optional
//! so that configuration layers (system files, user files, environment) can
//! be merged on top of each other; unset fields fall back to built-in
//! defaults through the accessor methods.
//!
//! ## Environment Variables
//!
//! - `NIGHTLIGHT_THEME_KEY`: Storage key of the persisted preference
//! - `NIGHTLIGHT_THEME_STORE`: Path of the preference store file
//! - `NIGHTLIGHT_THEME_CONFIG`: Path to a `theme.toml` to load first
//!
//! ## Configuration File Format
//!
//! ```toml
//! [theme]
//! storage_key = "theme_preference"
//! store_path = "/home/me/.local/share/nightlight/preferences.toml"
//! ```
//!
//! ```rust
//! use nightlight_theme::config::ThemeConfig;
//!
//! let config = ThemeConfig::from_toml("[theme]\nstorage_key = \"app.theme\"\n").unwrap();
//! assert_eq!(config.storage_key(), "app.theme");
//! assert!(config.store_path().is_none());
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ThemeError, ThemeResult};

/// The key the preference is stored under when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "theme_preference";

/// Persistence settings for the theme preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    /// Key of the persisted preference record.
    #[serde(default)]
    pub storage_key: Option<String>,
    /// Explicit path of the store file. `None` uses the XDG data directory.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    theme: ThemeConfig,
}

impl ThemeConfig {
    /// Create an empty configuration (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// `NIGHTLIGHT_THEME_CONFIG` is loaded first; the key and store
    /// variables then override whatever the file set.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(config_path) = env::var("NIGHTLIGHT_THEME_CONFIG") {
            match Self::from_file(&config_path) {
                Ok(file_config) => config.merge(file_config),
                Err(e) => log::warn!("Ignoring NIGHTLIGHT_THEME_CONFIG: {}", e),
            }
        }

        if let Ok(key) = env::var("NIGHTLIGHT_THEME_KEY") {
            if !key.trim().is_empty() {
                config.storage_key = Some(key);
            }
        }

        if let Ok(path) = env::var("NIGHTLIGHT_THEME_STORE") {
            if !path.trim().is_empty() {
                config.store_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Load a configuration from a `.toml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::file_not_found(path));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| ThemeError::parse_error(path, e.to_string()))
    }

    /// Load a configuration from TOML content with a `[theme]` table.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let file: ThemeFile = toml::from_str(content)?;
        Ok(file.theme)
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Set the store file path.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Overlay `other` on top of this configuration. Fields set in `other` win.
    pub fn merge(&mut self, other: ThemeConfig) {
        if other.storage_key.is_some() {
            self.storage_key = other.storage_key;
        }
        if other.store_path.is_some() {
            self.store_path = other.store_path;
        }
    }

    /// The effective storage key.
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    /// The explicit store path, if one was configured.
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ThemeConfig::new();
        assert_eq!(config.storage_key(), DEFAULT_STORAGE_KEY);
        assert_eq!(config.store_path(), None);
    }

    #[test]
    fn test_from_toml_full() {
        let config = ThemeConfig::from_toml(
            r#"
            [theme]
            storage_key = "shell.theme"
            store_path = "/tmp/prefs.toml"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_key(), "shell.theme");
        assert_eq!(config.store_path(), Some(Path::new("/tmp/prefs.toml")));
    }

    #[test]
    fn test_from_toml_without_theme_table() {
        let config = ThemeConfig::from_toml("[general]\ndebug = true\n").unwrap();
        assert_eq!(config, ThemeConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = ThemeConfig::from_toml("[theme\nstorage_key = ").unwrap_err();
        assert!(matches!(err, ThemeError::Toml(_)));
    }

    #[test]
    fn test_merge_only_overrides_set_fields() {
        let mut base = ThemeConfig::new()
            .with_storage_key("base.key")
            .with_store_path("/base/prefs.toml");

        base.merge(ThemeConfig::new().with_storage_key("user.key"));

        assert_eq!(base.storage_key(), "user.key");
        assert_eq!(base.store_path(), Some(Path::new("/base/prefs.toml")));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ThemeConfig::from_file("/definitely/not/here/theme.toml").unwrap_err();
        assert!(matches!(err, ThemeError::ConfigFileNotFound { .. }));
    }
}
