//! Error types for loading configuration documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a [`SortableConfig`](super::SortableConfig).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file {}", path.display())]
    Read {
        /// The file that was read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("Invalid configuration: {source}")]
    Parse {
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Check if this error comes from reading the file rather than its contents.
    pub fn is_io_error(&self) -> bool {
        matches!(self, ConfigError::Read { .. })
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
