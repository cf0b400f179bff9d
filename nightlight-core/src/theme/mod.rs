// SPDX-License-Identifier: MIT OR Apache-2.0
//! Theme state for nightlight.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nightlight_core::theme::ThemeResolver;
//! use nightlight_services::PreferenceStore;
//! use nightlight_theme::ThemePreference;
//!
//! let resolver = ThemeResolver::new(PreferenceStore::in_memory("theme_preference"));
//! resolver.initialize();
//!
//! resolver.subscribe(|state| println!("render with {}", state.effective_scheme()));
//! resolver.set_preference(ThemePreference::Dark);
//! ```

mod resolver;

pub use resolver::{ThemeResolver, ThemeState};
