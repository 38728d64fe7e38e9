//! Resolve command implementation

use std::path::PathBuf;

use colored::Colorize;
use relsign_core::{
    BuildType, EnvironmentSource, FieldSource, SigningContext, SigningField, SigningSummary,
};
use relsign_fs::NormalizedPath;
use serde::Serialize;

use crate::error::Result;

/// Inputs of one `relsign resolve` run, already made absolute
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub project_root: PathBuf,
    pub properties: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub build_type: BuildType,
    pub json: bool,
}

/// Machine-readable resolve output
#[derive(Debug, Serialize)]
struct ResolveReport {
    project: String,
    properties_path: String,
    properties_loaded: bool,
    #[serde(flatten)]
    summary: SigningSummary,
}

/// Run the resolve command against the process environment
pub fn run_resolve(options: &ResolveOptions) -> Result<()> {
    run_resolve_with_env(options, &EnvironmentSource::from_process())
}

/// Run the resolve command with an explicit environment snapshot
pub fn run_resolve_with_env(options: &ResolveOptions, env: &EnvironmentSource) -> Result<()> {
    let report = build_report(options, env)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn build_report(options: &ResolveOptions, env: &EnvironmentSource) -> Result<ResolveReport> {
    let mut context = SigningContext::new(NormalizedPath::new(&options.project_root));
    if let Some(properties) = &options.properties {
        context = context.with_properties_path(NormalizedPath::new(properties));
    }
    if let Some(base_dir) = &options.base_dir {
        context = context.with_base_dir(NormalizedPath::new(base_dir));
    }

    let props = context.load_properties()?;
    let descriptor = context.resolver().resolve(env, &props);

    Ok(ResolveReport {
        project: context.root().absolute_display(),
        properties_path: context.properties_path().absolute_display(),
        properties_loaded: props.is_loaded(),
        summary: descriptor.summary(options.build_type),
    })
}

fn print_report(report: &ResolveReport) {
    let summary = &report.summary;

    println!(
        "{} ({})",
        "Signing Configuration".bold(),
        summary.build_type.to_string().cyan()
    );
    println!();

    println!("  {:<16} {}", "Project:".dimmed(), report.project);
    let properties_state = if report.properties_loaded {
        "loaded".green()
    } else {
        "not found".dimmed()
    };
    println!(
        "  {:<16} {} ({})",
        "Properties:".dimmed(),
        report.properties_path,
        properties_state
    );

    let keystore = match &summary.store_file {
        Some(path) if summary.store_file_exists => format!("{} ({})", path, "exists".green()),
        Some(path) => format!("{} ({})", path, "missing".yellow()),
        None => "not set".dimmed().to_string(),
    };
    println!(
        "  {:<16} {}{}",
        "Keystore:".dimmed(),
        keystore,
        source_suffix(summary, SigningField::StoreFile)
    );

    for (label, field, set) in [
        ("Store password:", SigningField::StorePassword, summary.store_password_set),
        ("Key alias:", SigningField::KeyAlias, summary.key_alias_set),
        ("Key password:", SigningField::KeyPassword, summary.key_password_set),
    ] {
        let state = if set { "set".green() } else { "not set".dimmed() };
        println!(
            "  {:<16} {}{}",
            label.dimmed(),
            state,
            source_suffix(summary, field)
        );
    }
    println!();

    match &summary.fallback_reason {
        None if summary.signing == "release" => {
            println!("{} Release signing configured.", "OK".green().bold());
        }
        None => {
            println!("{} Debug build, using debug signing.", "=>".blue().bold());
        }
        Some(reason) => {
            println!(
                "{} Falling back to debug signing: {}",
                "WARN".yellow().bold(),
                reason
            );
        }
    }
}

fn source_suffix(summary: &SigningSummary, field: SigningField) -> String {
    match summary.sources.get(&field) {
        Some(source) if *source != FieldSource::Absent => {
            format!(" [{}]", source).dimmed().to_string()
        }
        _ => String::new(),
    }
}
