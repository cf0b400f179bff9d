// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Theme preference resolution and splash screen navigation for application shells.
//!
//! ```rust,no_run
//! use nightlight::prelude::*;
//!
//! let (shell, mut queue) = Shell::new(
//!     ShellConfig::default(),
//!     PreferenceStore::in_memory("theme_preference"),
//! );
//!
//! shell.theme().set_preference(ThemePreference::Dark);
//! assert_eq!(shell.theme().effective_scheme(), ColorScheme::Dark);
//!
//! let mut trigger = shell.splash_trigger();
//! trigger.on_playback_status(&PlaybackProgress::finished(3000));
//! assert!(queue.try_next().is_some());
//! ```

pub use nightlight_core as core;
pub use nightlight_services as services;
pub use nightlight_theme as theme;

/// A "prelude" for users of nightlight.
///
/// Importing this module brings into scope the most common types
/// needed to wire up a shell.
///
/// ```rust
/// use nightlight::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::{ShellConfig, SplashConfig, TasksConfig};
    pub use crate::core::navigation::{NavigationQueue, NavigationRequest, Navigator, Route};
    pub use crate::core::platform::{AppearanceHandle, AppearanceMonitor};
    pub use crate::core::shell::Shell;
    pub use crate::core::signal::{state::StateSignal, ListenerId, Signal};
    pub use crate::core::splash::{PlaybackNavigationTrigger, PlaybackProgress, PlaybackRequest};
    pub use crate::core::theme::{ThemeResolver, ThemeState};

    pub use crate::services::{PreferenceStore, SettingsRegistry};

    pub use crate::theme::{ColorScheme, ThemeConfig, ThemePreference};
}
