//! Integration tests for the `shipwright` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const START: &str = "===== GENERATED_START =====";

/// A command rooted in `dir`, isolated from the user's config and env.
fn shipwright(dir: &Path) -> assert_cmd::Command {
    let config = dir.join("tool-config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = cargo::cargo_bin_cmd!("shipwright");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SHIPWRIGHT_TEMPLATES_DIR")
        .arg("--config")
        .arg(&config);
    cmd
}

fn init_service(dir: &Path) {
    shipwright(dir)
        .args(["init", "--name", "orders", "--lang", "go"])
        .assert()
        .success();
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    shipwright(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    shipwright(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_then_generate_creates_every_artifact() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());
    assert!(temp.path().join("shipwright.toml").is_file());

    shipwright(temp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("11 created"));

    for path in [
        "Makefile",
        "docker-compose.yaml",
        ".shipwright/devops.yaml",
        ".shipwright/docker/Dockerfile.amd64",
        ".shipwright/docker/Dockerfile.arm64",
        ".shipwright/scripts/build.sh",
        ".shipwright/scripts/entrypoint.sh",
    ] {
        let content = fs::read_to_string(temp.path().join(path)).unwrap();
        assert_eq!(content.matches(START).count(), 1, "{path}");
    }

    let dockerfile =
        fs::read_to_string(temp.path().join(".shipwright/docker/Dockerfile.amd64")).unwrap();
    assert!(dockerfile.contains("golang:1.22"));
    let script = fs::read_to_string(temp.path().join(".shipwright/scripts/build.sh")).unwrap();
    assert!(script.starts_with("#!/bin/sh\n"));
}

#[test]
fn second_run_changes_nothing() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());
    shipwright(temp.path()).arg("generate").assert().success();
    let before = fs::read_to_string(temp.path().join("Makefile")).unwrap();

    shipwright(temp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 created, 0 updated, 11 unchanged"));

    assert_eq!(fs::read_to_string(temp.path().join("Makefile")).unwrap(), before);
}

#[test]
fn user_edits_outside_region_survive_and_pass_check() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());
    shipwright(temp.path()).args(["generate", "makefile"]).assert().success();

    let makefile = temp.path().join("Makefile");
    let edited = format!(
        "# team targets\nlint:\n\t@echo lint\n\n{}",
        fs::read_to_string(&makefile).unwrap()
    );
    fs::write(&makefile, &edited).unwrap();

    shipwright(temp.path())
        .args(["generate", "makefile", "--check"])
        .assert()
        .success();

    shipwright(temp.path()).args(["generate", "makefile"]).assert().success();
    assert_eq!(fs::read_to_string(&makefile).unwrap(), edited);
}

#[test]
fn check_fails_after_service_change() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());
    shipwright(temp.path()).arg("generate").assert().success();

    let service = temp.path().join("shipwright.toml");
    let text = fs::read_to_string(&service)
        .unwrap()
        .replace("8080", "9090");
    fs::write(&service, text).unwrap();

    shipwright(temp.path())
        .args(["generate", "--check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("out of date"));
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());

    shipwright(temp.path())
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("Makefile").exists());
    assert!(!temp.path().join(".shipwright").exists());
}

#[test]
fn output_directory_is_created() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());

    shipwright(temp.path())
        .args(["generate", "compose", "--output", "deploy"])
        .assert()
        .success();

    assert!(temp.path().join("deploy/docker-compose.yaml").is_file());
    assert!(!temp.path().join("deploy/Makefile").exists());
}

#[test]
fn json_report() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());

    let out = shipwright(temp.path())
        .args(["--output-format", "json", "generate", "dockerfile"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["service"], "orders");
    assert_eq!(report["created"], 2);
    assert_eq!(report["files"].as_array().unwrap().len(), 2);
}

#[test]
fn template_override_directory_is_used() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());
    let templates = temp.path().join("my-templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("makefile.tera"), "custom: {{ SERVICE_NAME }}\n").unwrap();

    shipwright(temp.path())
        .args(["generate", "makefile", "--templates", "my-templates"])
        .assert()
        .success();

    let makefile = fs::read_to_string(temp.path().join("Makefile")).unwrap();
    assert!(makefile.contains("custom: orders"));
}

#[test]
fn list_json_names_every_artifact() {
    let temp = TempDir::new().unwrap();
    let out = shipwright(temp.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["key"], "dockerfile");
}

#[test]
fn list_plain_keys() {
    let temp = TempDir::new().unwrap();
    shipwright(temp.path())
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("build-script"))
        .stdout(predicate::str::contains("makefile"));
}

#[test]
fn quiet_flag_suppresses_report() {
    let temp = TempDir::new().unwrap();
    init_service(temp.path());
    shipwright(temp.path())
        .args(["--quiet", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn shell_completions() {
    let temp = TempDir::new().unwrap();
    shipwright(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shipwright"));
}

#[test]
fn config_get_reads_environment() {
    let temp = TempDir::new().unwrap();
    shipwright(temp.path())
        .env("SHIPWRIGHT_OUTPUT__FORMAT", "plain")
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain"));
}
