// SPDX-License-Identifier: MIT OR Apache-2.0
pub mod error;
pub mod preferences;
pub mod settings;
pub mod storage;

// Re-export commonly used types
pub use error::StoreError;
pub use preferences::PreferenceStore;
pub use settings::{Config, SettingsRegistry, SplashSettings};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
