//! The resolved signing configuration

use std::collections::BTreeMap;

use relsign_fs::NormalizedPath;
use serde::Serialize;

use super::plan::{BuildType, DebugReason, SigningPlan};
use crate::sources::{FieldSource, SigningField};

/// Result of one signing resolution.
///
/// Immutable once produced. Validity is not stored: [`is_valid`] looks at
/// the filesystem on every call, so a keystore created or removed after
/// resolution is reflected immediately.
///
/// [`is_valid`]: SigningDescriptor::is_valid
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigningDescriptor {
    pub(crate) store_file: Option<NormalizedPath>,
    pub(crate) store_password: Option<String>,
    pub(crate) key_alias: Option<String>,
    pub(crate) key_password: Option<String>,
    pub(crate) sources: BTreeMap<SigningField, FieldSource>,
}

impl SigningDescriptor {
    /// Keystore path, already resolved against the module directory.
    pub fn store_file(&self) -> Option<&NormalizedPath> {
        self.store_file.as_ref()
    }

    pub fn store_password(&self) -> Option<&str> {
        self.store_password.as_deref()
    }

    pub fn key_alias(&self) -> Option<&str> {
        self.key_alias.as_deref()
    }

    pub fn key_password(&self) -> Option<&str> {
        self.key_password.as_deref()
    }

    /// Where `field` was taken from.
    pub fn source(&self, field: SigningField) -> FieldSource {
        self.sources.get(&field).copied().unwrap_or_default()
    }

    /// Whether `field` resolved to a value.
    pub fn is_set(&self, field: SigningField) -> bool {
        match field {
            SigningField::StoreFile => self.store_file.is_some(),
            SigningField::StorePassword => self.store_password.is_some(),
            SigningField::KeyAlias => self.key_alias.is_some(),
            SigningField::KeyPassword => self.key_password.is_some(),
        }
    }

    /// True iff a store file is set and exists right now.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Why the descriptor cannot be used for release signing, if it can't.
    ///
    /// Each call checks the filesystem once.
    pub fn validate(&self) -> Result<(), DebugReason> {
        match &self.store_file {
            None => Err(DebugReason::NoStoreFile),
            Some(path) if !path.is_file() => {
                Err(DebugReason::StoreFileMissing { path: path.clone() })
            }
            Some(_) => Ok(()),
        }
    }

    /// Signing to apply for `build_type`.
    ///
    /// Debug builds always use debug signing. Release builds use this
    /// descriptor when it is valid and fall back to debug signing otherwise.
    pub fn plan(&self, build_type: BuildType) -> SigningPlan {
        match build_type {
            BuildType::Debug => SigningPlan::Debug {
                reason: DebugReason::DebugBuild,
            },
            BuildType::Release => self.release_plan(self.validate()),
        }
    }

    fn release_plan(&self, validity: Result<(), DebugReason>) -> SigningPlan {
        match validity {
            Ok(()) => SigningPlan::Release(self.clone()),
            Err(reason) => SigningPlan::Debug { reason },
        }
    }

    /// Secret-free view for display and JSON output.
    ///
    /// The keystore is checked once; `signing`, `fallback_reason` and
    /// `store_file_exists` all come from that single check.
    pub fn summary(&self, build_type: BuildType) -> SigningSummary {
        let validity = self.validate();
        let store_file_exists = validity.is_ok();
        let plan = match build_type {
            BuildType::Debug => SigningPlan::Debug {
                reason: DebugReason::DebugBuild,
            },
            BuildType::Release => self.release_plan(validity),
        };

        SigningSummary {
            build_type,
            signing: if plan.is_release() { "release" } else { "debug" },
            fallback_reason: plan.fallback_reason().map(ToString::to_string),
            store_file: self.store_file.as_ref().map(|p| p.as_str().to_string()),
            store_file_exists,
            store_password_set: self.store_password.is_some(),
            key_alias_set: self.key_alias.is_some(),
            key_password_set: self.key_password.is_some(),
            sources: SigningField::ALL
                .into_iter()
                .map(|f| (f, self.source(f)))
                .collect(),
        }
    }
}

impl std::fmt::Debug for SigningDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("SigningDescriptor")
            .field("store_file", &self.store_file)
            .field("store_password", &redact(&self.store_password))
            .field("key_alias", &self.key_alias)
            .field("key_password", &redact(&self.key_password))
            .field("sources", &self.sources)
            .finish()
    }
}

/// Display form of a descriptor with every secret reduced to "is set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningSummary {
    pub build_type: BuildType,
    pub signing: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub store_file: Option<String>,
    pub store_file_exists: bool,
    pub store_password_set: bool,
    pub key_alias_set: bool,
    pub key_password_set: bool,
    pub sources: BTreeMap<SigningField, FieldSource>,
}
