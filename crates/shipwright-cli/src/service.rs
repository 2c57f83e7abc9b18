//! Loading and seeding the service description.

use std::path::Path;

use shipwright_core::domain::ServiceConfig;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Read the service description at `path`.
///
/// The format follows the file extension (TOML, YAML or JSON). Missing
/// sections and fields fall back to their defaults.
pub fn load_service(path: &Path) -> CliResult<ServiceConfig> {
    if !path.is_file() {
        return Err(CliError::ServiceNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = config::Config::builder()
        .add_source(config::File::from(path).required(true))
        .build()
        .map_err(|e| invalid(path, e))?;
    let service: ServiceConfig = raw.try_deserialize().map_err(|e| invalid(path, e))?;

    if service.service.name.trim().is_empty() {
        return Err(CliError::InvalidService {
            path: path.to_path_buf(),
            message: "service.name must be set".into(),
            source: None,
        });
    }

    debug!(
        path = %path.display(),
        service = %service.service.name,
        language = %service.language.kind,
        "Loaded service description"
    );
    Ok(service)
}

fn invalid(path: &Path, err: config::ConfigError) -> CliError {
    CliError::InvalidService {
        path: path.to_path_buf(),
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

/// A populated description for `shipwright init`.
pub fn starter(name: &str, language: &str) -> ServiceConfig {
    let mut service = ServiceConfig::named(name);
    service.service.description = format!("{name} service");
    service.language.kind = language.to_string();

    let (builder, runtime, startup) = match language {
        "go" => ("golang:1.22", "alpine:3.20", format!("/app/{name}")),
        "python" => ("python:3.12-slim", "python:3.12-slim", "python main.py".to_string()),
        "node" => ("node:20-alpine", "node:20-alpine", "node index.js".to_string()),
        "java" => (
            "maven:3-eclipse-temurin-21",
            "eclipse-temurin:21-jre",
            "java -jar app.jar".to_string(),
        ),
        "rust" => ("rust:1.80", "debian:bookworm-slim", format!("/app/{name}")),
        _ => ("alpine:3.20", "alpine:3.20", "./start.sh".to_string()),
    };
    service.build.builder_image.amd64 = builder.to_string();
    service.build.builder_image.arm64 = format!("arm64v8/{builder}");
    service.build.runtime_image.amd64 = runtime.to_string();
    service.build.runtime_image.arm64 = format!("arm64v8/{runtime}");
    service.runtime.startup_command = startup;
    service.network.ports = vec![8080];
    service
}

/// Serialize a description as pretty TOML.
pub fn to_toml(service: &ServiceConfig) -> CliResult<String> {
    toml::to_string_pretty(service).map_err(|e| CliError::InvalidInput {
        message: format!("Failed to serialise service description: {e}"),
        source: Some(Box::new(e)),
    })
}
