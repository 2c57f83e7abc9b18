//! The service description: the single configuration tree every artifact is
//! derived from.
//!
//! Every section and field is optional. The category builders read from this
//! tree and default anything missing; nothing here validates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root of the service description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub service: ServiceSection,
    pub language: LanguageSection,
    pub build: BuildSection,
    pub runtime: RuntimeSection,
    pub plugins: Vec<PluginSpec>,
    pub network: NetworkSection,
    pub ci: CiSection,
}

/// `[service]`: identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub name: String,
    pub description: String,
    /// Install directory inside the runtime image. Defaults to `/app`.
    pub deploy_dir: Option<String>,
}

/// `[language]`: toolchain selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    /// Replaces the language's default dependency-install command.
    pub deps_install: Option<String>,
}

/// `[build]`: how the artifact is compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub commands: BuildCommands,
    pub system_packages: Vec<String>,
    pub output_dir: String,
    pub builder_image: ImagePair,
    pub runtime_image: ImagePair,
}

/// `[build.commands]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildCommands {
    pub pre_build: String,
    /// Replaces the language's default build command.
    pub build: Option<String>,
    pub post_build: String,
}

/// An image reference per build architecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePair {
    pub amd64: String,
    pub arm64: String,
}

/// `[runtime]`: how the service starts and is probed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    pub startup_command: String,
    pub healthcheck: String,
    pub system_packages: Vec<String>,
    pub user: String,
    pub env: BTreeMap<String, String>,
}

/// One `[[plugins]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSpec {
    pub name: String,
    pub install_command: String,
    pub packages: Vec<String>,
}

/// `[network]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    pub ports: Vec<u16>,
    pub network_name: String,
}

/// `[ci]`: where generated artifacts live, relative to the output root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiSection {
    pub scripts_dir: Option<String>,
    pub dockerfile_dir: Option<String>,
    pub compose_file: Option<String>,
    pub makefile: Option<String>,
    pub devops_file: Option<String>,
}

impl ServiceConfig {
    /// Convenience constructor used by tests and `init`.
    pub fn named(name: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.service.name = name.into();
        config
    }
}
