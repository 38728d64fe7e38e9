//! Error types for relsign-core

use std::path::PathBuf;

/// Result type for relsign-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in relsign-core operations
///
/// Signing resolution itself never fails on missing input; the only
/// resolution-time error is a malformed properties file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The properties file exists but cannot be parsed
    #[error("Malformed properties file {path} at line {line}: {message}")]
    MalformedProperties {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// `pubspec.yaml` not found at the project root
    #[error("pubspec.yaml not found at {path}")]
    PubspecNotFound { path: PathBuf },

    /// `pubspec.yaml` exists but could not be read
    #[error("Failed to read {path}: {source}")]
    PubspecRead {
        path: PathBuf,
        #[source]
        source: relsign_fs::Error,
    },

    /// `pubspec.yaml` has no `version:` line
    #[error("Could not find a 'version:' line in {path}")]
    VersionLineMissing { path: PathBuf },

    /// Requested version does not look like a numeric version
    #[error("'{version}' doesn't look like a valid numeric version (e.g. 1.2.3)")]
    InvalidVersion { version: String },

    /// Requested version is not greater than the current one
    #[error("Provided version {new} is not greater than current version {current}")]
    NotNewer { new: String, current: String },

    /// Writing the updated `pubspec.yaml` failed
    #[error("Failed to update {path}: {source}")]
    PubspecWrite {
        path: PathBuf,
        #[source]
        source: relsign_fs::Error,
    },

    /// Gradle build script not found
    #[error("{path} not found")]
    GradleNotFound { path: PathBuf },

    /// Gradle build script has no `versionCode = <number>` assignment
    #[error("Could not find a 'versionCode = <number>' assignment in {path}")]
    VersionCodeMissing { path: PathBuf },

    /// `versionCode` cannot be incremented
    #[error("versionCode {value} in {path} cannot be incremented")]
    InvalidVersionCode { path: PathBuf, value: String },

    /// Reading or writing the gradle build script failed
    #[error("Failed to update {path}: {source}")]
    GradleWrite {
        path: PathBuf,
        #[source]
        source: relsign_fs::Error,
    },

    /// Filesystem error from relsign-fs
    #[error(transparent)]
    Fs(#[from] relsign_fs::Error),
}

impl Error {
    /// Whether this error was raised while updating the gradle build script.
    pub fn is_gradle_error(&self) -> bool {
        matches!(
            self,
            Self::GradleNotFound { .. }
                | Self::VersionCodeMissing { .. }
                | Self::InvalidVersionCode { .. }
                | Self::GradleWrite { .. }
        )
    }
}
