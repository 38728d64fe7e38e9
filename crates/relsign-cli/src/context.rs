//! Project context detection
//!
//! Detects the project root from any directory inside it, so commands work
//! from `android/app` as well as from the top of the project.

use std::path::{Path, PathBuf};

/// The kind of project detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectContext {
    /// Directory containing `pubspec.yaml`
    Flutter { path: PathBuf },

    /// Directory containing `android/app` but no `pubspec.yaml`
    Android { path: PathBuf },

    /// No project markers found up to the filesystem root
    NotAProject,
}

impl ProjectContext {
    /// Get the project root path
    pub fn root_path(&self) -> Option<&Path> {
        match self {
            ProjectContext::Flutter { path } => Some(path),
            ProjectContext::Android { path } => Some(path),
            ProjectContext::NotAProject => None,
        }
    }
}

/// Detect the project context from the given directory
///
/// Walks up the directory tree; the first directory holding `pubspec.yaml`
/// or an `android/app` folder is the project root.
pub fn detect_context(cwd: &Path) -> ProjectContext {
    for dir in cwd.ancestors() {
        if dir.join("pubspec.yaml").is_file() {
            return ProjectContext::Flutter {
                path: dir.to_path_buf(),
            };
        }
        if dir.join("android").join("app").is_dir() {
            return ProjectContext::Android {
                path: dir.to_path_buf(),
            };
        }
    }
    ProjectContext::NotAProject
}

/// Project root for a command: explicit path, else detected, else `cwd`.
///
/// Relative explicit paths are taken relative to `cwd`.
pub fn project_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(path) => absolutize(path, cwd),
        None => {
            let context = detect_context(cwd);
            tracing::debug!(?context, "Detected project context");
            context
                .root_path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf())
        }
    }
}

/// Join a relative path onto `cwd`; absolute paths pass through.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
