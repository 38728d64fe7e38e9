//! relsign CLI
//!
//! Resolves release signing configuration and bumps app versions for
//! Flutter/Android projects.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::ResolveOptions;
use context::{absolutize, project_root};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Diagnostics go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "relsign_core=debug,relsign_cli=debug,relsign_fs=debug"
    } else {
        "relsign_core=info,relsign_cli=info,relsign_fs=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Verbose mode enabled");
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!(
                "{} Release signing and versioning",
                "relsign".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "relsign --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Resolve {
            project_dir,
            properties,
            base_dir,
            build_type,
            json,
        } => {
            let options = ResolveOptions {
                project_root: project_root(project_dir.as_deref(), &cwd),
                properties: properties.as_deref().map(|p| absolutize(p, &cwd)),
                base_dir: base_dir.as_deref().map(|p| absolutize(p, &cwd)),
                build_type: build_type.into(),
                json,
            };
            commands::run_resolve(&options)
        }
        Commands::BumpVersion { path, new_version } => {
            let root = project_root(path.as_deref(), &cwd);
            commands::run_bump_version(&root, new_version.as_deref())
        }
    }
}
