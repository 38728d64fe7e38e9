//! The four signing fields and where each one is looked up

use serde::Serialize;

/// One of the four values a signing configuration is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningField {
    StoreFile,
    StorePassword,
    KeyAlias,
    KeyPassword,
}

impl SigningField {
    /// All fields in resolution order.
    pub const ALL: [SigningField; 4] = [
        Self::StoreFile,
        Self::StorePassword,
        Self::KeyAlias,
        Self::KeyPassword,
    ];

    /// Environment variable consulted first.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::StoreFile => "KEYSTORE_PATH",
            Self::StorePassword => "KEYSTORE_PASSWORD",
            Self::KeyAlias => "KEY_ALIAS",
            Self::KeyPassword => "KEY_PASSWORD",
        }
    }

    /// `key.properties` key consulted when the environment has nothing.
    pub fn property_key(self) -> &'static str {
        match self {
            Self::StoreFile => "storeFile",
            Self::StorePassword => "storePassword",
            Self::KeyAlias => "keyAlias",
            Self::KeyPassword => "keyPassword",
        }
    }

    /// Passwords are never printed, logged or serialized.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::StorePassword | Self::KeyPassword)
    }

    /// Field for a properties key, if it is one of the recognized keys.
    pub fn from_property_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.property_key() == key)
    }
}

impl std::fmt::Display for SigningField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.property_key())
    }
}

/// Where a resolved field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    Environment,
    Properties,
    #[default]
    Absent,
}

impl std::fmt::Display for FieldSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Environment => "environment",
            Self::Properties => "properties",
            Self::Absent => "absent",
        };
        f.write_str(label)
    }
}

/// A value that is empty or whitespace-only counts as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
