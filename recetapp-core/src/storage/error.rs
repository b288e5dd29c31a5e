use std::io;
use thiserror::Error;

/// Errors that can occur during key-value storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(key: &str, source: io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}
