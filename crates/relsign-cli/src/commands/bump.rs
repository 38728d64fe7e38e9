//! Bump-version command implementation

use std::path::Path;

use colored::Colorize;
use relsign_core::version::{VersionBump, apply_bump, read_pubspec_version};
use relsign_fs::NormalizedPath;

use crate::error::Result;
use crate::interactive::prompt_new_version;

/// Run the bump-version command.
///
/// Prompts for the version when `new_version` is `None`.
pub fn run_bump_version(root: &Path, new_version: Option<&str>) -> Result<()> {
    let root = NormalizedPath::new(root);
    let current = read_pubspec_version(&root)?;
    tracing::debug!(version = %current.version, "Read pubspec version");

    let new_version = match new_version {
        Some(version) => version.to_string(),
        None => prompt_new_version(&current.version)?,
    };

    let bump = apply_bump(&root, &current, &new_version)?;
    print_bump(&bump);
    Ok(())
}

fn print_bump(bump: &VersionBump) {
    println!("{}", "Update complete:".green().bold());
    println!(
        "  pubspec.yaml version: {} -> {}",
        bump.previous_version.dimmed(),
        bump.new_version.cyan()
    );
    println!(
        "  {} {}",
        "Backup:".dimmed(),
        bump.pubspec_backup.absolute_display()
    );

    match &bump.version_code {
        Some(code) => {
            println!(
                "  versionCode: {} -> {}",
                code.previous.to_string().dimmed(),
                code.current.to_string().cyan()
            );
            println!("  {} {}", "Backup:".dimmed(), code.backup.absolute_display());
        }
        None => {
            println!(
                "  {} build.gradle.kts not found, versionCode not modified",
                "warning:".yellow().bold()
            );
        }
    }
}
