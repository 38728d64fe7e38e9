//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use relsign_core::BuildType;

/// relsign - Release signing and versioning for mobile projects
#[derive(Parser, Debug)]
#[command(name = "relsign")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the signing configuration for a build
    ///
    /// Reads KEYSTORE_PATH, KEYSTORE_PASSWORD, KEY_ALIAS and KEY_PASSWORD
    /// from the environment, falling back to android/key.properties.
    /// Passwords are never printed.
    ///
    /// Examples:
    ///   relsign resolve                     # From anywhere inside the project
    ///   relsign resolve --json              # Machine-readable report
    ///   relsign resolve --properties ci/key.properties
    Resolve {
        /// Project root (detected from the current directory if omitted)
        #[arg(long, env = "RELSIGN_PROJECT_DIR")]
        project_dir: Option<PathBuf>,

        /// Properties file (default: <project>/android/key.properties)
        #[arg(long, env = "RELSIGN_PROPERTIES")]
        properties: Option<PathBuf>,

        /// Directory relative keystore paths are resolved against
        /// (default: <project>/android/app)
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Build type to plan signing for
        #[arg(long, value_enum, default_value_t = BuildTypeArg::Release)]
        build_type: BuildTypeArg,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Raise the pubspec version and increment the Android versionCode
    ///
    /// Writes pubspec.yaml.bak and build.gradle.kts.bak before changing
    /// anything.
    ///
    /// Examples:
    ///   relsign bump-version -n 1.4.0
    ///   relsign bump-version --path ../my-app   # Prompts for the version
    BumpVersion {
        /// Path to project root (detected from the current directory if omitted)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// New version to set (e.g. 1.2.3). Prompts if omitted.
        #[arg(short, long)]
        new_version: Option<String>,
    },
}

/// Build type as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTypeArg {
    Release,
    Debug,
}

impl From<BuildTypeArg> for BuildType {
    fn from(arg: BuildTypeArg) -> Self {
        match arg {
            BuildTypeArg::Release => BuildType::Release,
            BuildTypeArg::Debug => BuildType::Debug,
        }
    }
}
