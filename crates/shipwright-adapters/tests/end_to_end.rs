//! Full generation runs through the real adapters.

use std::fs;
use std::path::Path;

use shipwright_adapters::{InMemoryStore, LocalFilesystem, MemoryFilesystem, TeraRenderer};
use shipwright_core::{
    domain::{END_MARKER, START_MARKER},
    prelude::*,
};
use tempfile::TempDir;

fn service(fs: impl Filesystem + 'static) -> GenerateService {
    GenerateService::new(
        GeneratorRegistry::builtin().unwrap(),
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(TeraRenderer::new()),
        Box::new(fs),
    )
}

fn go_service() -> ServiceConfig {
    let mut config = ServiceConfig::named("test-service");
    config.service.description = "Test service".into();
    config.language.kind = "go".into();
    config.language.version = "1.22".into();
    config.build.commands.build = Some("go build -o app".into());
    config.build.builder_image.amd64 = "golang:1.22".into();
    config.build.builder_image.arm64 = "arm64v8/golang:1.22".into();
    config.build.runtime_image.amd64 = "alpine:3.20".into();
    config.build.runtime_image.arm64 = "arm64v8/alpine:3.20".into();
    config.runtime.startup_command = "./app".into();
    config.runtime.healthcheck = "wget -qO- http://localhost:8080/healthz".into();
    config.runtime.user = "app".into();
    config
        .runtime
        .env
        .insert("LOG_LEVEL".into(), "info".into());
    config.network.ports = vec![8080];
    config
}

#[test]
fn every_builtin_template_renders_for_a_minimal_config() {
    let fs = MemoryFilesystem::new();
    let report = service(fs.clone())
        .generate(ServiceConfig::named("bare"), &GenerateRequest::new("out"))
        .unwrap();

    assert_eq!(report.created(), 11);
    for path in fs.list_files() {
        let content = fs.contents(&path).unwrap();
        assert_eq!(content.matches(START_MARKER).count(), 1, "{}", path.display());
        assert_eq!(content.matches(END_MARKER).count(), 1, "{}", path.display());
    }
}

#[test]
fn dockerfile_amd64_uses_amd64_images_and_build_command() {
    let fs = MemoryFilesystem::new();
    service(fs.clone())
        .generate(
            go_service(),
            &GenerateRequest::new("out").artifacts(["dockerfile", "build-script"]),
        )
        .unwrap();

    let amd = fs.contents("out/.shipwright/docker/Dockerfile.amd64").unwrap();
    assert!(amd.contains("FROM golang:1.22 AS builder"));
    assert!(amd.contains("ENV GOOS=linux GOARCH=amd64"));
    assert!(amd.contains("FROM alpine:3.20\n"));
    assert!(amd.contains("EXPOSE 8080"));
    assert!(amd.contains("USER app"));
    assert!(amd.contains("ENV LOG_LEVEL=info"));

    let arm = fs.contents("out/.shipwright/docker/Dockerfile.arm64").unwrap();
    assert!(arm.contains("FROM arm64v8/golang:1.22 AS builder"));
    assert!(arm.contains("GOARCH=arm64"));

    let build = fs.contents("out/.shipwright/scripts/build.sh").unwrap();
    assert!(build.starts_with("#!/bin/sh\n"));
    assert!(build.contains("\ngo build -o app\n"));
    assert!(fs.is_executable("out/.shipwright/scripts/build.sh"));
}

#[test]
fn makefile_toggles_follow_the_config() {
    let fs = MemoryFilesystem::new();
    service(fs.clone())
        .generate(go_service(), &GenerateRequest::new("out").artifacts(["makefile"]))
        .unwrap();
    let make = fs.contents("out/Makefile").unwrap();
    assert!(make.contains("image-arm64:\n\t$(MAKE) image ARCH=arm64"));
    assert!(make.contains("docker compose -f docker-compose.yaml up"));
    assert!(make.contains("-p 8080:8080"));

    let fs = MemoryFilesystem::new();
    service(fs.clone())
        .generate(
            ServiceConfig::named("bare"),
            &GenerateRequest::new("out").artifacts(["makefile"]),
        )
        .unwrap();
    let make = fs.contents("out/Makefile").unwrap();
    assert!(!make.contains("image-arm64"));
    assert!(!make.contains("docker compose"));
}

#[test]
fn regeneration_keeps_user_edits_on_disk() {
    let dir = TempDir::new().unwrap();
    let svc = service(LocalFilesystem::new());
    let request = GenerateRequest::new(dir.path());

    svc.generate(go_service(), &request).unwrap();

    let makefile = dir.path().join("Makefile");
    let original = fs::read_to_string(&makefile).unwrap();
    let edited = format!("include local.mk\n\n{original}\n.PHONY: lint\nlint:\n\tgolangci-lint run\n");
    fs::write(&makefile, &edited).unwrap();

    let report = svc.generate(go_service(), &request).unwrap();
    assert!(!report.has_changes());
    assert_eq!(fs::read_to_string(&makefile).unwrap(), edited);

    let mut changed = go_service();
    changed.network.ports = vec![9090];
    let report = svc.generate(changed, &request).unwrap();
    assert!(report.has_changes());

    let updated = fs::read_to_string(&makefile).unwrap();
    assert!(updated.starts_with("include local.mk\n\n"));
    assert!(updated.ends_with("\n.PHONY: lint\nlint:\n\tgolangci-lint run\n"));
    assert!(updated.contains("-p 9090:9090"));
    assert!(!updated.contains("8080"));
}

#[cfg(unix)]
#[test]
fn scripts_are_executable_on_disk() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    service(LocalFilesystem::new())
        .generate(go_service(), &GenerateRequest::new(dir.path()))
        .unwrap();

    let script = dir.path().join(".shipwright/scripts/entrypoint.sh");
    let mode = fs::metadata(&script).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111);

    let makefile = dir.path().join("Makefile");
    let mode = fs::metadata(&makefile).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0);
}

#[test]
fn failing_template_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = InMemoryStore::with_builtin().unwrap();
    store.insert("devops", "{{ NOT_A_VARIABLE }}").unwrap();

    let svc = GenerateService::new(
        GeneratorRegistry::builtin().unwrap(),
        Box::new(store),
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let err = svc
        .generate(go_service(), &GenerateRequest::new(dir.path()))
        .unwrap_err();

    assert!(err.to_string().contains("devops"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn dry_run_reports_without_writing() {
    let fs = MemoryFilesystem::new();
    let report = service(fs.clone())
        .generate(
            go_service(),
            &GenerateRequest::new("out").mode(GenerationMode::DryRun),
        )
        .unwrap();
    assert_eq!(report.created(), 11);
    assert!(fs.list_files().is_empty());
    assert!(!fs.exists(Path::new("out")));
}
