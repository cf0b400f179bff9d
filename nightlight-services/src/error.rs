// SPDX-License-Identifier: MIT OR Apache-2.0
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by key-value store backends.
///
/// [PreferenceStore](crate::preferences::PreferenceStore) never hands these
/// to its callers; it logs them and degrades to "no preference known".
#[derive(Error, Debug)]
pub enum StoreError {
    /// No XDG data directory could be determined.
    #[error("No storage directory available: {0}")]
    NoStorageDir(#[from] xdg::BaseDirectoriesError),

    /// Reading or writing the store file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// The store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The store file is not valid TOML.
    #[error("Malformed store file {path:?}: {source}")]
    Parse {
        /// The store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// The table could not be serialized.
    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The backend refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
