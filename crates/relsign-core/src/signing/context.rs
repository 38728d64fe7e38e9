//! Project-level entry point: locate inputs, snapshot them, resolve

use relsign_fs::NormalizedPath;

use super::descriptor::SigningDescriptor;
use super::resolver::SigningConfigResolver;
use crate::Result;
use crate::sources::{EnvironmentSource, PropertySource};

/// Properties file location relative to the project root
pub const DEFAULT_PROPERTIES_PATH: &str = "android/key.properties";

/// Module directory relative keystore paths are resolved against
pub const DEFAULT_MODULE_DIR: &str = "android/app";

/// Signing inputs for one project.
///
/// Overrides given as relative paths are taken relative to the project root.
#[derive(Debug, Clone)]
pub struct SigningContext {
    root: NormalizedPath,
    properties_path: Option<NormalizedPath>,
    base_dir: Option<NormalizedPath>,
}

impl SigningContext {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            properties_path: None,
            base_dir: None,
        }
    }

    /// Use a properties file other than `android/key.properties`.
    pub fn with_properties_path(mut self, path: NormalizedPath) -> Self {
        self.properties_path = Some(path);
        self
    }

    /// Resolve relative keystore paths against a directory other than `android/app`.
    pub fn with_base_dir(mut self, dir: NormalizedPath) -> Self {
        self.base_dir = Some(dir);
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn properties_path(&self) -> NormalizedPath {
        match &self.properties_path {
            Some(path) => self.root.resolve(path.as_str()),
            None => self.root.join(DEFAULT_PROPERTIES_PATH),
        }
    }

    pub fn base_dir(&self) -> NormalizedPath {
        match &self.base_dir {
            Some(dir) => self.root.resolve(dir.as_str()),
            None => self.root.join(DEFAULT_MODULE_DIR),
        }
    }

    /// Load the properties file, snapshot the process environment and resolve.
    pub fn resolve(&self) -> Result<SigningDescriptor> {
        self.resolve_with_env(&EnvironmentSource::from_process())
    }

    /// Same as [`resolve`](Self::resolve) with an explicit environment snapshot.
    pub fn resolve_with_env(&self, env: &EnvironmentSource) -> Result<SigningDescriptor> {
        let props = self.load_properties()?;
        Ok(self.resolver().resolve(env, &props))
    }

    /// Load the properties file; missing means empty.
    pub fn load_properties(&self) -> Result<PropertySource> {
        PropertySource::load(&self.properties_path())
    }

    /// Resolver rooted at this project's module directory.
    pub fn resolver(&self) -> SigningConfigResolver {
        SigningConfigResolver::new(self.base_dir())
    }
}
