// SPDX-License-Identifier: MIT OR Apache-2.0
//! Platform integrations.

/// Contains the OS appearance monitor.
pub mod appearance;

pub use appearance::{AppearanceHandle, AppearanceMonitor};
