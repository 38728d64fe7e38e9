//! Snapshot of the signing-related environment variables

use std::collections::BTreeMap;

use super::field::SigningField;

/// The four signing variables as they were when the snapshot was taken.
///
/// Only `KEYSTORE_PATH`, `KEYSTORE_PASSWORD`, `KEY_ALIAS` and `KEY_PASSWORD`
/// are captured; anything else passed to the constructors is ignored. An
/// unset variable (or one that is not valid UTF-8) is simply absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSource {
    values: BTreeMap<SigningField, String>,
}

impl EnvironmentSource {
    /// An environment with none of the variables set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Snapshot using an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let values = SigningField::ALL
            .into_iter()
            .filter_map(|field| lookup(field.env_var()).map(|v| (field, v)))
            .collect();
        Self { values }
    }

    /// Build from explicit `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (name, value) in pairs {
            if let Some(field) = SigningField::ALL
                .into_iter()
                .find(|f| f.env_var() == name.as_ref())
            {
                values.insert(field, value.into());
            }
        }
        Self { values }
    }

    /// Raw value for a field, blank or not.
    pub fn get(&self, field: SigningField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Whether no variable is present at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in &self.values {
            if field.is_secret() {
                map.entry(&field.env_var(), &"<redacted>");
            } else {
                map.entry(&field.env_var(), value);
            }
        }
        map.finish()
    }
}
