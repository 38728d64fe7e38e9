//! [`TestProject`] builder for signing and version-bump scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use relsign_fs::NormalizedPath;
use tempfile::TempDir;

/// Default gradle script body used by [`TestProject::with_gradle_version_code`].
const GRADLE_TEMPLATE: &str = r#"android {
    namespace = "net.example.app"

    defaultConfig {
        applicationId = "net.example.app"
        minSdk = flutter.minSdkVersion
        targetSdk = 36
        versionCode = {CODE}
        versionName = flutter.versionName
    }
}
"#;

/// A temporary project directory laid out like a Flutter app with an
/// `android/` folder.
///
/// # Example
///
/// ```rust,no_run
/// use relsign_test_utils::TestProject;
///
/// let project = TestProject::new()
///     .with_pubspec_version("1.0.0+1")
///     .with_gradle_version_code(7)
///     .with_key_properties("storeFile=upload.jks\n")
///     .with_keystore("android/app/upload.jks");
/// project.assert_file_exists("android/key.properties");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Project root as a [`NormalizedPath`].
    pub fn normalized_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
    }

    /// Write `android/key.properties`.
    pub fn with_key_properties(self, content: &str) -> Self {
        self.write("android/key.properties", content);
        self
    }

    /// Create a placeholder keystore file at `relative`.
    pub fn with_keystore(self, relative: &str) -> Self {
        self.write(relative, b"\xfe\xed\xfe\xed placeholder keystore");
        self
    }

    /// Write a minimal `pubspec.yaml` declaring `version`.
    pub fn with_pubspec_version(self, version: &str) -> Self {
        self.write(
            "pubspec.yaml",
            format!(
                "name: example_app\ndescription: Test app\nversion: {version}\n\n\
                 environment:\n  sdk: ^3.5.0\n"
            ),
        );
        self
    }

    /// Write `android/app/build.gradle.kts` with `versionCode = code`.
    pub fn with_gradle_version_code(self, code: u64) -> Self {
        self.write(
            "android/app/build.gradle.kts",
            GRADLE_TEMPLATE.replace("{CODE}", &code.to_string()),
        );
        self
    }

    /// Read a project file as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
