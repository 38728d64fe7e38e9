//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use fs2::FileExt;
use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let written = (|| -> Result<()> {
        temp_file.lock_exclusive()
            .map_err(|_| Error::LockFailed { path: native_path.clone() })?;

        temp_file.write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file.sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file.unlock()
            .map_err(|_| Error::LockFailed { path: native_path.clone() })?;

        fs::rename(&temp_path, &native_path)
            .map_err(|e| Error::io(&native_path, e))
    })();

    if let Err(e) = written {
        drop(temp_file);
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            tracing::warn!(
                path = %temp_path.display(),
                error = %cleanup,
                "failed to remove temp file"
            );
        }
        return Err(e);
    }

    tracing::trace!(path = %path, bytes = content.len(), "atomic write complete");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path)
        .map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file that may legitimately be absent.
///
/// Returns `Ok(None)` when the file does not exist. Any other failure
/// (permissions, invalid UTF-8, path is a directory) is an error.
pub fn read_text_optional(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Copy `path` to `<path>.bak`, overwriting an older backup.
///
/// Returns the backup location.
pub fn backup(path: &NormalizedPath) -> Result<NormalizedPath> {
    let backup_path = path.with_suffix(".bak");
    fs::copy(path.to_native(), backup_path.to_native())
        .map_err(|e| Error::io(path.to_native(), e))?;
    tracing::debug!(from = %path, to = %backup_path, "backup written");
    Ok(backup_path)
}
