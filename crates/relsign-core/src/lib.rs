//! Core release-engineering logic for relsign
//!
//! This crate provides:
//!
//! - **Signing resolution**: pick the keystore path, passwords and alias from
//!   the environment or `key.properties`, and decide between release signing
//!   and a debug-signing fallback
//! - **Version bumping**: raise the `pubspec.yaml` version and increment the
//!   gradle `versionCode`
//!
//! # Architecture
//!
//! ```text
//!                relsign-cli
//!                     |
//!               relsign-core
//!          +----------+----------+
//!          |          |          |
//!       sources    signing    version
//!          |                     |
//!          +----- relsign-fs ----+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use relsign_core::{EnvironmentSource, PropertySource, SigningConfigResolver};
//! use relsign_fs::NormalizedPath;
//!
//! let props = PropertySource::load(&NormalizedPath::new("android/key.properties"))?;
//! let env = EnvironmentSource::from_process();
//! let resolver = SigningConfigResolver::new(NormalizedPath::new("android/app"));
//! let descriptor = resolver.resolve(&env, &props);
//! ```

pub mod error;
pub mod signing;
pub mod sources;
pub mod version;

pub use error::{Error, Result};
pub use signing::{
    BuildType, DebugReason, SigningConfigResolver, SigningContext, SigningDescriptor, SigningPlan,
    SigningSummary,
};
pub use sources::{EnvironmentSource, FieldSource, PropertySource, SigningField, SyntaxError};
pub use version::{VersionBump, bump_version};
