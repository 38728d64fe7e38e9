//! Error types for relsign-cli

use relsign_core::Error as CoreError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from relsign-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from relsign-fs
    #[error(transparent)]
    Fs(#[from] relsign_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

impl CliError {
    /// Process exit code.
    ///
    /// Version-bump failures keep the codes release pipelines already check
    /// for; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        let Self::Core(error) = self else {
            return 1;
        };
        match error {
            CoreError::PubspecNotFound { .. }
            | CoreError::PubspecRead { .. }
            | CoreError::VersionLineMissing { .. } => 2,
            CoreError::InvalidVersion { .. } => 3,
            CoreError::NotNewer { .. } => 4,
            CoreError::PubspecWrite { .. } => 5,
            e if e.is_gradle_error() => 6,
            _ => 1,
        }
    }
}
