// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Core library for nightlight => See `nightlight` crate.
//!
//! Contains the theme resolver, the splash navigation trigger and the
//! runtime pieces they share.

/// Contains the [ShellConfig](config::ShellConfig) struct.
pub mod config;

/// Contains the navigation queue between background callbacks and the UI context.
pub mod navigation;

/// Contains platform integrations such as OS appearance monitoring.
pub mod platform;

/// Contains the [Shell](shell::Shell), the application root.
pub mod shell;

/// Contains the signal system for reactive programming
pub mod signal;

/// Contains the splash screen playback trigger.
pub mod splash;

/// Contains the task runner and utilities for running async
pub mod tasks;

/// Contains the theme resolver.
pub mod theme;
