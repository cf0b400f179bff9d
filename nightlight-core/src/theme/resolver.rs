// SPDX-License-Identifier: MIT OR Apache-2.0
//! Live theme state for the whole application.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nightlight_services::PreferenceStore;
use nightlight_theme::{ColorScheme, ThemePreference};

use crate::platform::AppearanceMonitor;
use crate::signal::state::StateSignal;
use crate::signal::{ListenerId, Signal};
use crate::tasks;

/// A snapshot of the theme inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    /// What the user picked.
    pub preference: ThemePreference,
    /// What the OS last reported.
    pub os_scheme: ColorScheme,
}

impl ThemeState {
    /// The scheme screens should render with.
    pub fn effective_scheme(&self) -> ColorScheme {
        self.preference.resolve(self.os_scheme)
    }
}

/// Holds the theme preference and the OS appearance, and derives the
/// effective color scheme from them.
///
/// Mount one at the application root and hand clones to screens; clones share
/// state and subscribers. The preference changes only through
/// [ThemeResolver::set_preference] (and the one-time restore after
/// [ThemeResolver::initialize]); the OS appearance only through
/// [ThemeResolver::set_os_scheme] or a followed [AppearanceMonitor].
///
/// Persistence is best-effort and never blocks: the in-memory preference is
/// the source of truth.
#[derive(Clone)]
pub struct ThemeResolver {
    state: StateSignal<ThemeState>,
    store: PreferenceStore,
    /// Bumped on every explicit preference change.
    generation: Arc<AtomicU64>,
}

impl ThemeResolver {
    /// Create a resolver backed by `store`. The preference starts as [ThemePreference::System].
    pub fn new(store: PreferenceStore) -> Self {
        Self {
            state: StateSignal::new(ThemeState::default()),
            store,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reset the preference to [ThemePreference::System] and restore the
    /// persisted preference in the background.
    ///
    /// Screens render with the default scheme until the restore lands, and
    /// receive a change notification when it does. A preference set
    /// explicitly in the meantime is kept.
    pub fn initialize(&self) {
        self.state
            .mutate_if_changed(|state| state.preference = ThemePreference::System);

        let resolver = self.clone();
        let generation = self.generation.load(Ordering::SeqCst);
        tasks::spawn(async move {
            resolver.restore_since(generation).await;
        });
    }

    /// Restore the persisted preference, waiting for the read.
    ///
    /// Absent, corrupt or unreadable records leave the preference unchanged.
    pub async fn restore(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        self.restore_since(generation).await;
    }

    async fn restore_since(&self, generation: u64) {
        let Some(preference) = self.store.load().await else {
            return;
        };

        // Compared under the state lock, which set_preference also bumps under.
        let mut stale = false;
        self.state.mutate_if_changed(|state| {
            if self.generation.load(Ordering::SeqCst) == generation {
                state.preference = preference;
            } else {
                stale = true;
            }
        });

        if stale {
            log::debug!(
                "Discarding restored theme preference '{}', it was changed meanwhile",
                preference
            );
        } else {
            log::info!("Restored theme preference '{}'", preference);
        }
    }

    /// Change the preference.
    ///
    /// Subscribers are notified before this returns; the new preference is
    /// persisted in the background.
    pub fn set_preference(&self, preference: ThemePreference) {
        self.state.mutate_if_changed(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.preference = preference;
        });

        let store = self.store.clone();
        let sequence = store.next_sequence();
        tasks::spawn(async move {
            store.save_sequenced(sequence, preference).await;
        });
    }

    /// Record the OS appearance.
    pub fn set_os_scheme(&self, scheme: ColorScheme) {
        if self.state.mutate_if_changed(|state| state.os_scheme = scheme) {
            log::debug!("OS appearance changed to {}", scheme);
        }
    }

    /// Apply every appearance reported by `monitor` for as long as it streams.
    ///
    /// Once the stream ends (the platform source is unavailable or went away)
    /// the last reported scheme is kept; follow a new monitor to resume.
    pub fn follow(&self, mut monitor: AppearanceMonitor) {
        let resolver = self.clone();
        tasks::spawn(async move {
            while let Some(scheme) = monitor.next().await {
                resolver.set_os_scheme(scheme);
            }
            log::debug!("Appearance monitor closed, keeping OS scheme {}", resolver.os_scheme());
        });
    }

    /// The current preference.
    pub fn preference(&self) -> ThemePreference {
        self.state.get().preference
    }

    /// The last OS-reported appearance.
    pub fn os_scheme(&self) -> ColorScheme {
        self.state.get().os_scheme
    }

    /// The scheme screens should render with, derived from the current inputs.
    pub fn effective_scheme(&self) -> ColorScheme {
        self.state.get().effective_scheme()
    }

    /// A snapshot of both inputs.
    pub fn state(&self) -> ThemeState {
        self.state.get()
    }

    /// Call `listener` whenever the preference or the OS appearance changes.
    pub fn subscribe(&self, listener: impl Fn(&ThemeState) + Send + Sync + 'static) -> ListenerId {
        self.state.listen(Arc::new(listener))
    }

    /// Remove a listener registered with [ThemeResolver::subscribe].
    pub fn unsubscribe(&self, id: ListenerId) {
        self.state.unlisten(id);
    }

    /// The backing store.
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeResolver")
            .field("state", &self.state.get())
            .field("store", &self.store)
            .finish()
    }
}
