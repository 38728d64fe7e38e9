//! Signing configuration resolution with fixed precedence
//!
//! The `SigningConfigResolver` picks each of the four signing values from
//! the environment snapshot first and the properties snapshot second, then
//! reports what it found.

use std::collections::BTreeMap;

use relsign_fs::NormalizedPath;

use super::descriptor::SigningDescriptor;
use super::plan::DebugReason;
use crate::sources::{EnvironmentSource, FieldSource, PropertySource, SigningField, non_blank};

/// Resolves a [`SigningDescriptor`] from injected source snapshots.
///
/// For every field:
/// 1. the environment variable, if present and non-blank
/// 2. the properties key, if present and non-blank
/// 3. otherwise absent
///
/// Blank (empty or whitespace-only) values are treated exactly like missing
/// ones, so an empty override never hides a usable fallback. A relative
/// keystore path is resolved against the module directory.
#[derive(Debug, Clone)]
pub struct SigningConfigResolver {
    /// Directory relative keystore paths are resolved against
    base_dir: NormalizedPath,
}

impl SigningConfigResolver {
    /// Create a resolver that resolves relative keystore paths against `base_dir`.
    pub fn new(base_dir: NormalizedPath) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    /// Resolve the four signing fields.
    ///
    /// Never fails: missing input only produces absent fields, and an
    /// unusable keystore is reported through [`SigningDescriptor::validate`].
    /// Diagnostics go to `tracing`; password values are never emitted.
    pub fn resolve(&self, env: &EnvironmentSource, props: &PropertySource) -> SigningDescriptor {
        let mut sources = BTreeMap::new();
        let mut pick = |field: SigningField| {
            let (value, source) = pick_field(field, env, props);
            sources.insert(field, source);
            value
        };

        let store_file = pick(SigningField::StoreFile).map(|raw| self.base_dir.resolve(&raw));
        let store_password = pick(SigningField::StorePassword);
        let key_alias = pick(SigningField::KeyAlias);
        let key_password = pick(SigningField::KeyPassword);

        let descriptor = SigningDescriptor {
            store_file,
            store_password,
            key_alias,
            key_password,
            sources,
        };
        let validity = descriptor.validate();
        self.report(&descriptor, &validity);
        descriptor
    }

    /// Log the outcome of one resolution from its single keystore check.
    fn report(&self, descriptor: &SigningDescriptor, validity: &Result<(), DebugReason>) {
        tracing::debug!(base_dir = %self.base_dir, "Resolving signing configuration");

        match descriptor.store_file() {
            Some(path) => tracing::info!(
                path = %path,
                exists = validity.is_ok(),
                source = %descriptor.source(SigningField::StoreFile),
                "Resolved keystore path"
            ),
            None => tracing::info!("No keystore path in environment or properties"),
        }

        tracing::info!(
            store_password_set = descriptor.is_set(SigningField::StorePassword),
            store_password_source = %descriptor.source(SigningField::StorePassword),
            key_alias_set = descriptor.is_set(SigningField::KeyAlias),
            key_alias_source = %descriptor.source(SigningField::KeyAlias),
            key_password_set = descriptor.is_set(SigningField::KeyPassword),
            key_password_source = %descriptor.source(SigningField::KeyPassword),
            "Signing credentials"
        );

        if let Err(reason) = validity {
            tracing::warn!(%reason, "Release signing unavailable, falling back to debug signing");
        }
    }
}

fn pick_field(
    field: SigningField,
    env: &EnvironmentSource,
    props: &PropertySource,
) -> (Option<String>, FieldSource) {
    if let Some(value) = non_blank(env.get(field)) {
        return (Some(value.to_string()), FieldSource::Environment);
    }
    if let Some(value) = non_blank(props.get_field(field)) {
        return (Some(value.to_string()), FieldSource::Properties);
    }
    (None, FieldSource::Absent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::BuildType;
    use tempfile::TempDir;

    fn resolver() -> SigningConfigResolver {
        SigningConfigResolver::new(NormalizedPath::new("/project/android/app"))
    }

    #[test]
    fn absolute_env_path_with_existing_file_is_valid() {
        let temp = TempDir::new().unwrap();
        let keystore = temp.path().join("a.jks");
        std::fs::write(&keystore, b"keystore").unwrap();
        let keystore = NormalizedPath::new(&keystore);

        let env = EnvironmentSource::from_pairs([("KEYSTORE_PATH", keystore.as_str())]);
        let descriptor = resolver().resolve(&env, &PropertySource::empty());

        assert_eq!(descriptor.store_file(), Some(&keystore));
        assert_eq!(descriptor.source(SigningField::StoreFile), FieldSource::Environment);
        assert!(descriptor.is_valid());
        assert!(descriptor.plan(BuildType::Release).is_release());
    }

    #[test]
    fn relative_properties_path_is_resolved_against_base_dir() {
        let props: PropertySource = [("storeFile", "rel.jks")].into_iter().collect();
        let descriptor = resolver().resolve(&EnvironmentSource::empty(), &props);

        assert_eq!(
            descriptor.store_file().map(NormalizedPath::as_str),
            Some("/project/android/app/rel.jks")
        );
        assert!(!descriptor.is_valid());
        assert_eq!(
            descriptor.validate(),
            Err(DebugReason::StoreFileMissing {
                path: NormalizedPath::new("/project/android/app/rel.jks")
            })
        );
    }

    #[test]
    fn blank_env_password_falls_through_to_properties() {
        let env = EnvironmentSource::from_pairs([("KEYSTORE_PASSWORD", "   ")]);
        let props: PropertySource = [("storePassword", "secret")].into_iter().collect();

        let descriptor = resolver().resolve(&env, &props);

        assert_eq!(descriptor.store_password(), Some("secret"));
        assert_eq!(descriptor.source(SigningField::StorePassword), FieldSource::Properties);
    }

    #[test]
    fn values_are_not_trimmed_once_accepted() {
        let env = EnvironmentSource::from_pairs([("KEY_PASSWORD", " pass word ")]);
        let descriptor = resolver().resolve(&env, &PropertySource::empty());
        assert_eq!(descriptor.key_password(), Some(" pass word "));
    }

    #[test]
    fn nothing_configured_yields_empty_descriptor() {
        let descriptor = resolver().resolve(&EnvironmentSource::empty(), &PropertySource::empty());

        for field in SigningField::ALL {
            assert!(!descriptor.is_set(field), "{field} should be absent");
            assert_eq!(descriptor.source(field), FieldSource::Absent);
        }
        assert_eq!(descriptor.validate(), Err(DebugReason::NoStoreFile));
        assert!(descriptor.plan(BuildType::Release).is_fallback());
    }

    #[test]
    fn debug_build_is_never_a_fallback() {
        let descriptor = resolver().resolve(&EnvironmentSource::empty(), &PropertySource::empty());
        let plan = descriptor.plan(BuildType::Debug);

        assert!(!plan.is_release());
        assert!(!plan.is_fallback());
    }

    #[test]
    fn debug_output_never_contains_passwords() {
        let env = EnvironmentSource::from_pairs([
            ("KEYSTORE_PASSWORD", "store-secret"),
            ("KEY_PASSWORD", "key-secret"),
        ]);
        let descriptor = resolver().resolve(&env, &PropertySource::empty());

        let debug = format!("{descriptor:?}");
        assert!(!debug.contains("store-secret"));
        assert!(!debug.contains("key-secret"));
    }
}
