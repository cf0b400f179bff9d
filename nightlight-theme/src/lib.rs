// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! # Nightlight Theme Types
//!
//! The value types shared by every nightlight crate for describing which
//! color scheme the user asked for and which one is actually rendered.
//!
//! ## Overview
//!
//! - **[ThemePreference](preference::ThemePreference)**: What the user picked
//!   (`system`, `light` or `dark`). Defaults to `system`.
//! - **[ColorScheme](preference::ColorScheme)**: A concrete light or dark
//!   scheme. Used both for the OS-reported appearance and for the effective
//!   scheme a screen renders with.
//! - **[ThemeConfig](config::ThemeConfig)**: Where and under which key the
//!   preference is persisted.
//!
//! ## Resolving the effective scheme
//!
//! ```rust
//! use nightlight_theme::preference::{ColorScheme, ThemePreference};
//!
//! // Following the system: the OS decides.
//! assert_eq!(ThemePreference::System.resolve(ColorScheme::Dark), ColorScheme::Dark);
//!
//! // An explicit choice always wins.
//! assert_eq!(ThemePreference::Light.resolve(ColorScheme::Dark), ColorScheme::Light);
//! ```
//!
//! ## Persisted tokens
//!
//! A preference is stored as one of three lowercase tokens. Anything else is
//! rejected by [`str::parse`] with a [ThemeError](error::ThemeError):
//!
//! ```rust
//! use nightlight_theme::preference::ThemePreference;
//!
//! assert_eq!("dark".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
//! assert!("sepia".parse::<ThemePreference>().is_err());
//! ```

/// Contains the [config::ThemeConfig] struct for persistence configuration.
pub mod config;
/// Contains the [error::ThemeError] type.
pub mod error;
/// Contains [preference::ThemePreference] and [preference::ColorScheme].
pub mod preference;

pub use config::ThemeConfig;
pub use error::{ThemeError, ThemeResult};
pub use preference::{ColorScheme, ThemePreference};
