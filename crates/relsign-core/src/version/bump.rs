//! Rewriting `pubspec.yaml` and the gradle `versionCode`

use regex::{Captures, Regex};
use relsign_fs::{NormalizedPath, io};
use std::sync::LazyLock;

use super::{is_newer_version, is_valid_version};
use crate::{Error, Result};

/// Pubspec location relative to the project root
pub const PUBSPEC_FILE: &str = "pubspec.yaml";

/// App module build script relative to the project root
pub const GRADLE_SCRIPT: &str = "android/app/build.gradle.kts";

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(version:[ \t]*)(\S+)").unwrap());

static VERSION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(versionCode\s*=\s*)(\d+)").unwrap());

/// The `version:` currently declared in `pubspec.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubspecVersion {
    pub path: NormalizedPath,
    pub version: String,
    text: String,
}

/// Outcome of incrementing `versionCode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCodeBump {
    pub path: NormalizedPath,
    pub previous: u64,
    pub current: u64,
    pub backup: NormalizedPath,
}

/// Outcome of a full version bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub previous_version: String,
    pub new_version: String,
    pub pubspec_backup: NormalizedPath,
    /// `None` when the project has no gradle build script
    pub version_code: Option<VersionCodeBump>,
}

/// Read the version declared in `<root>/pubspec.yaml`.
pub fn read_pubspec_version(root: &NormalizedPath) -> Result<PubspecVersion> {
    let path = root.join(PUBSPEC_FILE);
    let text = match io::read_text_optional(&path) {
        Ok(Some(text)) => text,
        Ok(None) => return Err(Error::PubspecNotFound { path: path.to_native() }),
        Err(source) => {
            return Err(Error::PubspecRead {
                path: path.to_native(),
                source,
            });
        }
    };

    let version = VERSION_LINE
        .captures(&text)
        .map(|caps| caps[2].to_string())
        .ok_or_else(|| Error::VersionLineMissing { path: path.to_native() })?;

    Ok(PubspecVersion { path, version, text })
}

/// Replace the `version:` value, keeping a `.bak` copy of the original.
///
/// Returns the backup location.
pub fn write_pubspec_version(
    current: &PubspecVersion,
    new_version: &str,
) -> Result<NormalizedPath> {
    let write_error = |source: relsign_fs::Error| Error::PubspecWrite {
        path: current.path.to_native(),
        source,
    };

    let backup = io::backup(&current.path).map_err(write_error)?;
    let updated = VERSION_LINE.replace(&current.text, |caps: &Captures| {
        format!("{}{}", &caps[1], new_version)
    });
    io::write_text(&current.path, &updated).map_err(write_error)?;

    tracing::info!(
        path = %current.path,
        from = %current.version,
        to = %new_version,
        "Updated pubspec version"
    );
    Ok(backup)
}

/// Increment the first `versionCode = <n>` in `<root>/android/app/build.gradle.kts`.
pub fn increment_version_code(root: &NormalizedPath) -> Result<VersionCodeBump> {
    let path = root.join(GRADLE_SCRIPT);
    let write_error = |source: relsign_fs::Error| Error::GradleWrite {
        path: path.to_native(),
        source,
    };

    let text = io::read_text_optional(&path)
        .map_err(write_error)?
        .ok_or_else(|| Error::GradleNotFound { path: path.to_native() })?;

    let raw = VERSION_CODE
        .captures(&text)
        .map(|caps| caps[2].to_string())
        .ok_or_else(|| Error::VersionCodeMissing { path: path.to_native() })?;

    let invalid = || Error::InvalidVersionCode {
        path: path.to_native(),
        value: raw.clone(),
    };
    let previous: u64 = raw.parse().map_err(|_| invalid())?;
    let current = previous.checked_add(1).ok_or_else(invalid)?;

    let backup = io::backup(&path).map_err(write_error)?;
    let updated = VERSION_CODE.replacen(&text, 1, |caps: &Captures| {
        format!("{}{}", &caps[1], current)
    });
    io::write_text(&path, &updated).map_err(write_error)?;

    tracing::info!(path = %path, from = previous, to = current, "Incremented versionCode");
    Ok(VersionCodeBump {
        path,
        previous,
        current,
        backup,
    })
}

/// Bump the project at `root` to `new_version`.
pub fn bump_version(root: &NormalizedPath, new_version: &str) -> Result<VersionBump> {
    let current = read_pubspec_version(root)?;
    apply_bump(root, &current, new_version)
}

/// Bump from an already-read pubspec version.
///
/// Validates `new_version`, rewrites `pubspec.yaml`, then increments
/// `versionCode`. A project without a gradle build script only gets the
/// pubspec change.
pub fn apply_bump(
    root: &NormalizedPath,
    current: &PubspecVersion,
    new_version: &str,
) -> Result<VersionBump> {
    let new_version = new_version.trim();
    if !is_valid_version(new_version) {
        return Err(Error::InvalidVersion {
            version: new_version.to_string(),
        });
    }
    if !is_newer_version(new_version, &current.version) {
        return Err(Error::NotNewer {
            new: new_version.to_string(),
            current: current.version.clone(),
        });
    }

    let pubspec_backup = write_pubspec_version(current, new_version)?;

    let version_code = match increment_version_code(root) {
        Ok(bump) => Some(bump),
        Err(Error::GradleNotFound { path }) => {
            tracing::warn!(
                path = %path.display(),
                "Gradle build script not found, pubspec updated but versionCode not modified"
            );
            None
        }
        Err(e) => return Err(e),
    };

    Ok(VersionBump {
        previous_version: current.version.clone(),
        new_version: new_version.to_string(),
        pubspec_backup,
        version_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn project(pubspec: &str, gradle: Option<&str>) -> (TempDir, NormalizedPath) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PUBSPEC_FILE), pubspec).unwrap();
        if let Some(gradle) = gradle {
            let script = temp.path().join(GRADLE_SCRIPT);
            fs::create_dir_all(script.parent().unwrap()).unwrap();
            fs::write(script, gradle).unwrap();
        }
        let root = NormalizedPath::new(temp.path());
        (temp, root)
    }

    #[test]
    fn reads_first_top_level_version() {
        let (_temp, root) = project(
            "name: pocket\nversion: 1.2.3+7\ndependencies:\n  foo:\n    version: 9.9.9\n",
            None,
        );
        assert_eq!(read_pubspec_version(&root).unwrap().version, "1.2.3+7");
    }

    #[test]
    fn indented_version_is_not_the_package_version() {
        let (_temp, root) = project("name: pocket\ndeps:\n  version: 1.0.0\n", None);
        assert!(matches!(
            read_pubspec_version(&root),
            Err(Error::VersionLineMissing { .. })
        ));
    }

    #[test]
    fn missing_pubspec_is_reported() {
        let temp = TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        assert!(matches!(
            read_pubspec_version(&root),
            Err(Error::PubspecNotFound { .. })
        ));
    }

    #[test]
    fn version_code_replacement_keeps_surrounding_text() {
        let gradle =
            "defaultConfig {\n    versionCode = 7\n    versionName = flutter.versionName\n}\n";
        let (_temp, root) = project("version: 1.0.0\n", Some(gradle));

        let bump = increment_version_code(&root).unwrap();

        assert_eq!((bump.previous, bump.current), (7, 8));
        let updated = fs::read_to_string(bump.path.to_native()).unwrap();
        assert_eq!(
            updated,
            "defaultConfig {\n    versionCode = 8\n    versionName = flutter.versionName\n}\n"
        );
        assert_eq!(fs::read_to_string(bump.backup.to_native()).unwrap(), gradle);
    }

    #[test]
    fn only_first_version_code_is_incremented() {
        let (_temp, root) = project("version: 1.0.0\n", Some("versionCode = 9\nversionCode=3\n"));
        let bump = increment_version_code(&root).unwrap();
        let updated = fs::read_to_string(bump.path.to_native()).unwrap();
        assert_eq!(updated, "versionCode = 10\nversionCode=3\n");
    }

    #[test]
    fn version_code_that_overflows_is_rejected() {
        let (_temp, root) = project(
            "version: 1.0.0\n",
            Some("versionCode = 18446744073709551615\n"),
        );
        assert!(matches!(
            increment_version_code(&root),
            Err(Error::InvalidVersionCode { .. })
        ));
    }

    #[test]
    fn apply_bump_rejects_invalid_before_writing() {
        let (temp, root) = project("version: 1.0.0\n", None);
        let current = read_pubspec_version(&root).unwrap();

        let err = apply_bump(&root, &current, "banana").unwrap_err();

        assert!(matches!(err, Error::InvalidVersion { .. }));
        assert!(!temp.path().join("pubspec.yaml.bak").exists());
    }

    #[test]
    fn replacement_with_leading_digits_is_literal() {
        let (_temp, root) = project("version: 0.9.0\n", None);
        let bump = bump_version(&root, "10.0.0").unwrap();
        assert_eq!(bump.new_version, "10.0.0");
        let text = fs::read_to_string(root.join(PUBSPEC_FILE).to_native()).unwrap();
        assert_eq!(text, "version: 10.0.0\n");
    }
}
