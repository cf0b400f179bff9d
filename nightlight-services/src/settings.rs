// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::Result;
use nightlight_theme::config::ThemeConfig;
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

use crate::storage::XDG_PREFIX;

/// The main configuration structure for the application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Splash screen settings
    #[serde(default)]
    pub splash: SplashSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

/// `[general]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    /// Log at debug level unless `log_level` says otherwise.
    pub debug: Option<bool>,
    /// Maximum log level, e.g. `"info"`.
    pub log_level: Option<String>,
}

impl GeneralSettings {
    /// The log level these settings ask for, if any.
    ///
    /// An explicit `log_level` wins over `debug`. Unknown levels are ignored.
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        if let Some(level) = self.log_level.as_deref() {
            match level.trim().parse::<log::LevelFilter>() {
                Ok(filter) => return Some(filter),
                Err(_) => log::warn!("Ignoring unknown log level '{}'", level),
            }
        }

        match self.debug {
            Some(true) => Some(log::LevelFilter::Debug),
            _ => None,
        }
    }
}

/// `[splash]` section. Unset fields use the built-in splash defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SplashSettings {
    /// Milliseconds before the end of the splash media at which navigation starts.
    pub overlap_ms: Option<u64>,
    /// Route the splash screen replaces itself with.
    pub destination: Option<String>,
}

/// Registry for managing application settings.
pub struct SettingsRegistry {
    config: Config,
    pub theme_config: ThemeConfig,
}

impl SettingsRegistry {
    /// Create a new SettingsRegistry and load configuration from standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// Create a registry holding only built-in defaults, without touching the
    /// disk or the environment.
    pub fn with_defaults() -> Self {
        Self {
            config: Config {
                general: GeneralSettings {
                    debug: Some(false),
                    log_level: None,
                },
                splash: SplashSettings::default(),
                other: HashMap::new(),
            },
            theme_config: ThemeConfig::new(),
        }
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/nightlight/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/nightlight/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/nightlight/config.toml (XDG_CONFIG_HOME)
    ///
    /// Theme configuration from `theme.toml` is layered the same way, with
    /// environment variables applied last.
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;

        for path in Self::layered_paths(&xdg_dirs, "config.toml") {
            self.load_file(&path).await;
        }

        for path in Self::layered_paths(&xdg_dirs, "theme.toml") {
            self.load_theme_file(&path).await;
        }
        self.theme_config.merge(ThemeConfig::from_env_or_default());

        Ok(())
    }

    fn layered_paths(xdg_dirs: &BaseDirectories, filename: &str) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = xdg_dirs.find_data_files(filename).collect();
        paths.reverse();

        let mut config_paths: Vec<PathBuf> = xdg_dirs.find_config_files(filename).collect();
        config_paths.reverse();
        paths.extend(config_paths);

        // find_config_files already yields the user file when it exists; keep it last.
        let user_config_path = xdg_dirs.get_config_home().join(filename);
        paths.retain(|p| p != &user_config_path);
        if user_config_path.exists() {
            paths.push(user_config_path);
        }

        paths
    }

    async fn load_theme_file(&mut self, path: &Path) {
        log::info!("Loading theme config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match ThemeConfig::from_toml(&content) {
                Ok(loaded_config) => {
                    self.theme_config.merge(loaded_config);
                },
                Err(e) => {
                    log::warn!("Failed to parse theme config {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read theme config {:?}: {}", path, e);
            },
        }
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(loaded_config) => {
                    self.merge(loaded_config);
                },
                Err(e) => {
                    log::error!("Failed to parse config file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
            },
        }
    }

    /// Merge a loaded config into the current config.
    fn merge(&mut self, other: Config) {
        // General
        if let Some(debug) = other.general.debug {
            self.config.general.debug = Some(debug);
        }
        if other.general.log_level.is_some() {
            self.config.general.log_level = other.general.log_level;
        }

        // Splash
        if let Some(overlap_ms) = other.splash.overlap_ms {
            self.config.splash.overlap_ms = Some(overlap_ms);
        }
        if other.splash.destination.is_some() {
            self.config.splash.destination = other.splash.destination;
        }

        // Other
        self.config.other.extend(other.other);
    }

    /// Get the current configuration.
    pub fn get(&self) -> &Config {
        &self.config
    }

    /// Load configuration from multiple custom paths, in order.
    ///
    /// Files ending in `theme.toml` are merged into the theme configuration;
    /// everything else into [Config]. Each path reports its own result.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path, e))?;

                if path.file_name().is_some_and(|name| name == "theme.toml") {
                    let loaded = ThemeConfig::from_toml(&content)
                        .map_err(|e| anyhow::anyhow!("Failed to parse theme config {:?}: {}", path, e))?;
                    self.theme_config.merge(loaded);
                } else {
                    let loaded_config: Config = toml::from_str(&content)
                        .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path, e))?;
                    self.merge(loaded_config);
                }
                Ok::<(), anyhow::Error>(())
            }
            .await;

            results.push(result);
        }

        results
    }
}
