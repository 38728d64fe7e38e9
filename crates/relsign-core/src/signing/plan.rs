//! What the packaging step should sign with

use relsign_fs::NormalizedPath;
use serde::Serialize;

use super::descriptor::SigningDescriptor;

/// Build variant being packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[default]
    Release,
    Debug,
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Release => f.write_str("release"),
            Self::Debug => f.write_str("debug"),
        }
    }
}

/// Signing decision handed to the packaging collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningPlan {
    /// Sign with the resolved release configuration
    Release(SigningDescriptor),
    /// Sign with the packaging tool's own debug configuration
    Debug { reason: DebugReason },
}

impl SigningPlan {
    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release(_))
    }

    /// Whether a release build was downgraded to debug signing.
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }

    pub fn fallback_reason(&self) -> Option<&DebugReason> {
        match self {
            Self::Debug { reason } if *reason != DebugReason::DebugBuild => Some(reason),
            _ => None,
        }
    }

    pub fn descriptor(&self) -> Option<&SigningDescriptor> {
        match self {
            Self::Release(descriptor) => Some(descriptor),
            Self::Debug { .. } => None,
        }
    }
}

/// Why debug signing is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugReason {
    /// Debug builds are always debug-signed
    DebugBuild,
    /// Neither source provided a keystore path
    NoStoreFile,
    /// A keystore path was resolved but nothing is there
    StoreFileMissing { path: NormalizedPath },
}

impl std::fmt::Display for DebugReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DebugBuild => f.write_str("debug build"),
            Self::NoStoreFile => f.write_str("no keystore path configured"),
            Self::StoreFileMissing { path } => write!(f, "keystore not found at {}", path),
        }
    }
}
