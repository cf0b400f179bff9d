// SPDX-License-Identifier: MIT OR Apache-2.0
use std::num::NonZeroUsize;

use nightlight_services::settings::SettingsRegistry;
use nightlight_theme::ThemeConfig;

use crate::navigation::Route;

/// Default lead time, in milliseconds, before the end of the splash media at
/// which navigation fires. Covers a 400 ms fade with slack.
pub const DEFAULT_OVERLAP_MS: u64 = 916;

/// Route the splash screen replaces itself with by default.
pub const DEFAULT_SPLASH_DESTINATION: &str = "/onboarding";

/// nightlight Shell Configuration Structure.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Task Runner Configuration. If [None] (default), tasks run on the smol fallback executor.
    pub tasks: Option<TasksConfig>,
    /// Where the theme preference is persisted.
    pub theme: ThemeConfig,
    /// Splash screen configuration.
    pub splash: SplashConfig,
    /// If the OS appearance should be followed for the lifetime of the shell.
    pub follow_system_appearance: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            tasks: None,
            theme: ThemeConfig::default(),
            splash: SplashConfig::default(),
            follow_system_appearance: true,
        }
    }
}

impl ShellConfig {
    /// Build a configuration from loaded settings, using defaults for anything unset.
    pub fn from_settings(settings: &SettingsRegistry) -> Self {
        let splash_settings = &settings.get().splash;
        let mut splash = SplashConfig::default();

        if let Some(overlap_ms) = splash_settings.overlap_ms {
            splash.overlap_ms = overlap_ms;
        }

        match splash_settings.destination.as_deref().map(str::trim) {
            Some("") => log::warn!(
                "Ignoring empty splash destination, using '{}'",
                DEFAULT_SPLASH_DESTINATION
            ),
            Some(destination) => splash.destination = Route::new(destination),
            None => {},
        }

        Self {
            theme: settings.theme_config.clone(),
            splash,
            ..Self::default()
        }
    }
}

/// Splash screen configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashConfig {
    /// Milliseconds before the natural end of the media at which navigation fires.
    pub overlap_ms: u64,
    /// The route navigated to once the splash finishes.
    pub destination: Route,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            overlap_ms: DEFAULT_OVERLAP_MS,
            destination: Route::new(DEFAULT_SPLASH_DESTINATION),
        }
    }
}

/// Task runner configuration.
#[derive(Debug, Clone)]
pub struct TasksConfig {
    /// The stack size of each thread of the task runner thread pool. Defaults to 1 MB.
    pub stack_size: usize,
    /// The amount of worker threads of the task runner thread pool. Defaults to half of the available threads.
    pub workers: NonZeroUsize,
}

impl Default for TasksConfig {
    fn default() -> Self {
        let half = std::thread::available_parallelism()
            .map(|threads| threads.get() / 2)
            .unwrap_or(1);

        Self {
            stack_size: 1024 * 1024, // 1 MB
            workers: NonZeroUsize::new(half).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
