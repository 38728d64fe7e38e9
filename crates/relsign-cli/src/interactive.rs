//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based input.

use dialoguer::Input;

use crate::error::Result;

/// Ask for the version to bump to.
///
/// Returns the answer trimmed; validation happens in the bump itself.
pub fn prompt_new_version(current: &str) -> Result<String> {
    let answer: String = Input::new()
        .with_prompt(format!(
            "Current version in pubspec.yaml is {current}. Enter the new version"
        ))
        .interact_text()?;
    Ok(answer.trim().to_string())
}
