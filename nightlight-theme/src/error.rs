// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Theme Error Types
//!
//! Errors raised while parsing preference tokens or theme configuration.
//! None of these ever reach the UI: callers log them and fall back to defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the theme crate.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A persisted token is not one of `system`, `light` or `dark`.
    #[error("Invalid theme preference '{token}'")]
    InvalidPreference {
        /// The rejected token.
        token: String,
    },

    /// Theme configuration file was not found.
    #[error("Theme config file not found: {path:?}")]
    ConfigFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Error parsing a theme configuration file.
    #[error("Failed to parse theme config {path:?}: {details}")]
    ConfigParse {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// Malformed TOML content.
    #[error("Failed to parse theme config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create an invalid preference error.
    pub fn invalid_preference(token: impl Into<String>) -> Self {
        Self::InvalidPreference {
            token: token.into(),
        }
    }

    /// Create a config file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigFileNotFound { path: path.into() }
    }

    /// Create a config parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            details: details.into(),
        }
    }
}
