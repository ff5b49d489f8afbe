//! Error types for provis-core

/// Result type for provis-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in provis-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A typed accessor found a value of a different shape
    #[error("Value at '{key}' has the wrong shape: expected {expected}, found {found}")]
    WrongShape {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Node build options could not be interpreted
    #[error("Invalid node options: {message}")]
    InvalidOptions { message: String },

    /// A version string failed the strict version pattern
    #[error("Invalid version for {name}: '{version}'")]
    InvalidVersion { name: String, version: String },

    /// A remote executor reported a failure
    #[error("Remote command failed ({command}): {message}")]
    Remote { command: String, message: String },

    /// Filesystem error from provis-fs
    #[error(transparent)]
    Fs(#[from] provis_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a remote failure for `command`
    pub fn remote(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            command: command.into(),
            message: message.into(),
        }
    }
}
