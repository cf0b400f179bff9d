// SPDX-License-Identifier: MIT OR Apache-2.0
//! The application root: theme state, the splash trigger and the navigation queue.

use anyhow::Context;
use nightlight_services::settings::SettingsRegistry;
use nightlight_services::PreferenceStore;

use crate::config::{ShellConfig, TasksConfig};
use crate::navigation::{self, NavigationQueue, NavigationSender};
use crate::platform::AppearanceMonitor;
use crate::splash::{PlaybackNavigationTrigger, PlaybackRequest};
use crate::tasks;
use crate::theme::ThemeResolver;

/// Owns the application-wide state screens read from.
///
/// Create it once at startup, keep the returned [NavigationQueue] in the UI
/// loop and drain it into the router.
#[derive(Debug)]
pub struct Shell {
    theme: ThemeResolver,
    navigation: NavigationSender,
    config: ShellConfig,
}

impl Shell {
    /// Start the shell with the given preference store.
    ///
    /// Initializes the task runner, starts restoring the theme preference and,
    /// if enabled, follows the OS appearance.
    ///
    /// Without an explicit [TasksConfig], a default runner is started when the
    /// OS appearance is followed and none is running yet.
    pub fn new(config: ShellConfig, store: PreferenceStore) -> (Self, NavigationQueue) {
        match config.tasks.clone() {
            Some(tasks_config) => tasks::init(tasks_config),
            // The platform appearance source needs a running runner to live in.
            None if config.follow_system_appearance => {
                tasks::init_if_unset(TasksConfig::default());
            },
            None => {},
        }

        let theme = ThemeResolver::new(store);
        theme.initialize();

        if config.follow_system_appearance {
            theme.follow(AppearanceMonitor::system());
        }

        let (navigation, queue) = navigation::channel();
        log::debug!("Shell started with {:?}", config);

        (
            Self {
                theme,
                navigation,
                config,
            },
            queue,
        )
    }

    /// Start the shell from loaded settings, persisting the theme where they say.
    ///
    /// Also caps the log level if `[general]` asks for one.
    pub fn from_settings(settings: &SettingsRegistry) -> anyhow::Result<(Self, NavigationQueue)> {
        if let Some(level) = settings.get().general.level_filter() {
            log::set_max_level(level);
        }

        let config = ShellConfig::from_settings(settings);
        let store = PreferenceStore::from_config(&config.theme)
            .context("Failed to open theme preference store")?;

        Ok(Self::new(config, store))
    }

    /// The application-wide theme state.
    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    /// A sender for navigation requests.
    pub fn navigation(&self) -> NavigationSender {
        self.navigation.clone()
    }

    /// The configuration the shell was started with.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// A fresh trigger for a newly mounted splash screen.
    pub fn splash_trigger(&self) -> PlaybackNavigationTrigger {
        PlaybackNavigationTrigger::new(self.navigation(), &self.config.splash)
    }

    /// How the splash screen should start its media.
    pub fn splash_playback(&self) -> PlaybackRequest {
        PlaybackRequest::splash()
    }
}
