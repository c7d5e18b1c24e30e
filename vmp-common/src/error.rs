//! Common error types for the VoiceMonkey proxy

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for proxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the proxy crates
#[derive(Error, Debug)]
pub enum Error {
    /// Secret file does not exist
    #[error("{label} not found at {}", .path.display())]
    MissingSecret { label: String, path: PathBuf },

    /// Secret file exists but holds only whitespace
    #[error("{label} is empty at {}", .path.display())]
    EmptySecret { label: String, path: PathBuf },

    /// Secret file exists but could not be read
    #[error("{label} could not be read at {}: {source}", .path.display())]
    SecretUnreadable {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
