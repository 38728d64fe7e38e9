//! Integration tests for the relsign CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use relsign_test_utils::TestProject;
use serde_json::Value;

const SIGNING_VARS: [&str; 4] = ["KEYSTORE_PATH", "KEYSTORE_PASSWORD", "KEY_ALIAS", "KEY_PASSWORD"];

/// Get a Command for the relsign binary with a clean signing environment
fn relsign_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("relsign"));
    for var in SIGNING_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RELSIGN_PROJECT_DIR")
        .env_remove("RELSIGN_PROPERTIES")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn resolve_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    relsign_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Release signing"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("bump-version"));
}

#[test]
fn test_version_output() {
    relsign_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relsign"));
}

#[test]
fn test_no_command_prints_hint() {
    relsign_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("relsign --help"));
}

#[test]
fn test_unknown_command_fails() {
    relsign_cmd().arg("sign-everything").assert().failure();
}

// ============================================================================
// Resolve Tests
// ============================================================================

#[test]
fn test_resolve_environment_only() {
    let project = TestProject::new().with_keystore("android/app/ci.jks");

    let report = resolve_json(
        relsign_cmd()
            .args(["resolve", "--json", "--project-dir"])
            .arg(project.root())
            .env("KEYSTORE_PATH", project.path("android/app/ci.jks"))
            .env("KEYSTORE_PASSWORD", "env-store-secret")
            .env("KEY_ALIAS", "ci")
            .env("KEY_PASSWORD", "env-key-secret"),
    );

    assert_eq!(report["signing"], "release");
    assert_eq!(report["properties_loaded"], false);
    assert_eq!(report["store_file_exists"], true);
    assert_eq!(report["key_alias_set"], true);
    assert_eq!(report["sources"]["store_password"], "environment");
    assert!(report.get("fallback_reason").is_none());
}

#[test]
fn test_resolve_properties_with_relative_keystore() {
    let project = TestProject::new()
        .with_key_properties(
            "storeFile=upload.jks\nstorePassword=s1\nkeyAlias=upload\nkeyPassword=k1\n",
        )
        .with_keystore("android/app/upload.jks");

    let report = resolve_json(
        relsign_cmd()
            .args(["resolve", "--json"])
            .current_dir(project.root()),
    );

    assert_eq!(report["signing"], "release");
    assert_eq!(report["properties_loaded"], true);
    assert_eq!(report["sources"]["store_file"], "properties");
    let store_file = report["store_file"].as_str().unwrap();
    assert!(store_file.ends_with("android/app/upload.jks"), "{store_file}");
}

#[test]
fn test_resolve_never_prints_passwords() {
    let project = TestProject::new()
        .with_key_properties(
            "storeFile=upload.jks\nstorePassword=props-secret\nkeyPassword=props-key-secret\n",
        )
        .with_keystore("android/app/upload.jks");

    for json in [true, false] {
        let mut cmd = relsign_cmd();
        cmd.args(["-v", "resolve", "--project-dir"])
            .arg(project.root())
            .env("KEY_PASSWORD", "env-key-secret");
        if json {
            cmd.arg("--json");
        }

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("props-secret").not())
            .stdout(predicate::str::contains("env-key-secret").not())
            .stderr(predicate::str::contains("props-secret").not())
            .stderr(predicate::str::contains("env-key-secret").not());
    }
}

#[test]
fn test_resolve_blank_environment_falls_through() {
    let project = TestProject::new()
        .with_key_properties("keyAlias=upload\n");

    let report = resolve_json(
        relsign_cmd()
            .args(["resolve", "--json", "--project-dir"])
            .arg(project.root())
            .env("KEY_ALIAS", "   "),
    );

    assert_eq!(report["key_alias_set"], true);
    assert_eq!(report["sources"]["key_alias"], "properties");
}

#[test]
fn test_resolve_missing_keystore_falls_back_to_debug() {
    let project = TestProject::new().with_key_properties("storeFile=missing.jks\n");

    let report = resolve_json(
        relsign_cmd()
            .args(["resolve", "--json", "--project-dir"])
            .arg(project.root()),
    );

    assert_eq!(report["signing"], "debug");
    assert_eq!(report["store_file_exists"], false);
    let reason = report["fallback_reason"].as_str().unwrap();
    assert!(reason.starts_with("keystore not found at"), "{reason}");
}

#[test]
fn test_resolve_nothing_configured_succeeds_with_warning() {
    let project = TestProject::new();

    relsign_cmd()
        .args(["resolve", "--project-dir"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Falling back to debug signing"))
        .stdout(predicate::str::contains("no keystore path configured"));
}

#[test]
fn test_resolve_debug_build_is_not_a_fallback() {
    let project = TestProject::new();

    let report = resolve_json(
        relsign_cmd()
            .args(["resolve", "--json", "--build-type", "debug", "--project-dir"])
            .arg(project.root()),
    );

    assert_eq!(report["signing"], "debug");
    assert_eq!(report["build_type"], "debug");
    assert!(report.get("fallback_reason").is_none());
}

#[test]
fn test_resolve_properties_override_via_env() {
    let project = TestProject::new().with_keystore("keys/ci.jks");
    project.write("ci/key.properties", "storeFile=../keys/ci.jks\n");

    let report = resolve_json(
        relsign_cmd()
            .args(["resolve", "--json", "--base-dir", "ci"])
            .current_dir(project.root())
            .env("RELSIGN_PROJECT_DIR", project.root())
            .env("RELSIGN_PROPERTIES", project.path("ci/key.properties")),
    );

    assert_eq!(report["properties_loaded"], true);
    assert_eq!(report["signing"], "release");
}

#[test]
fn test_resolve_malformed_properties_fails() {
    let project =
        TestProject::new().with_key_properties("storePassword=ok\nthis line has no separator\n");

    relsign_cmd()
        .args(["resolve", "--project-dir"])
        .arg(project.root())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("no separator").not());
}

// ============================================================================
// Bump Version Tests
// ============================================================================

#[test]
fn test_bump_version_updates_files() {
    let project = TestProject::new()
        .with_pubspec_version("1.2.3+4")
        .with_gradle_version_code(41);

    relsign_cmd()
        .args(["bump-version", "-n", "1.3.0", "-p"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Update complete"));

    project.assert_file_contains("pubspec.yaml", "version: 1.3.0\n");
    project.assert_file_contains("pubspec.yaml.bak", "version: 1.2.3+4");
    project.assert_file_contains("android/app/build.gradle.kts", "versionCode = 42");
    project.assert_file_contains("android/app/build.gradle.kts.bak", "versionCode = 41");
}

#[test]
fn test_bump_version_detects_project_from_subdirectory() {
    let project = TestProject::new()
        .with_pubspec_version("0.9.0")
        .with_gradle_version_code(9);

    relsign_cmd()
        .args(["bump-version", "--new-version", "1.0.0"])
        .current_dir(project.path("android/app"))
        .assert()
        .success();

    project.assert_file_contains("pubspec.yaml", "version: 1.0.0");
    project.assert_file_contains("android/app/build.gradle.kts", "versionCode = 10");
}

#[test]
fn test_bump_version_without_gradle_warns() {
    let project = TestProject::new().with_pubspec_version("1.0.0");

    relsign_cmd()
        .args(["bump-version", "-n", "1.0.1", "-p"])
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("versionCode not modified"));

    project.assert_file_contains("pubspec.yaml", "version: 1.0.1");
}

#[test]
fn test_bump_version_invalid_version_exits_3() {
    let project = TestProject::new().with_pubspec_version("1.0.0");

    relsign_cmd()
        .args(["bump-version", "-n", "next", "-p"])
        .arg(project.root())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("valid numeric version"));

    project.assert_file_not_exists("pubspec.yaml.bak");
}

#[test]
fn test_bump_version_not_newer_exits_4() {
    let project = TestProject::new()
        .with_pubspec_version("2.0.0")
        .with_gradle_version_code(5);

    relsign_cmd()
        .args(["bump-version", "-n", "2.0.0", "-p"])
        .arg(project.root())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not greater"));

    project.assert_file_contains("android/app/build.gradle.kts", "versionCode = 5");
}

#[test]
fn test_bump_version_missing_pubspec_exits_2() {
    let project = TestProject::new();

    relsign_cmd()
        .args(["bump-version", "-n", "1.0.0", "-p"])
        .arg(project.root())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pubspec.yaml not found"));
}

#[test]
fn test_bump_version_missing_version_code_exits_6() {
    let project = TestProject::new().with_pubspec_version("1.0.0");
    project.write(
        "android/app/build.gradle.kts",
        "android {\n    namespace = \"com.example\"\n}\n",
    );

    relsign_cmd()
        .args(["bump-version", "-n", "1.1.0", "-p"])
        .arg(project.root())
        .assert()
        .code(6);
}
