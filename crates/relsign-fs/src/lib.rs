//! Filesystem helpers for relsign
//!
//! Provides slash-normalized paths and safe I/O operations for the files
//! relsign reads (`key.properties`, `pubspec.yaml`, `build.gradle.kts`) and
//! rewrites.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
