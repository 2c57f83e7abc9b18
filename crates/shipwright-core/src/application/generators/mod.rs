//! Artifact generators and the registry that names them.
//!
//! A generator turns the run's [`VariablePool`] into one or more
//! [`ArtifactPlan`]s. It does no rendering and no I/O.

mod dockerfile;
mod manifests;
mod scripts;

use crate::application::variables::VariablePool;
use crate::domain::{ArtifactPlan, DomainError, RelativePath, Value, VariableMap};

pub use dockerfile::DockerfileGenerator;

/// Produces the plans for one artifact type.
pub trait Generator: Send + Sync {
    /// Registry key, e.g. `"dockerfile"`.
    fn key(&self) -> &'static str;

    /// One-line description for `shipwright list`.
    fn description(&self) -> &'static str;

    fn plan(&self, pool: &VariablePool) -> Result<Vec<ArtifactPlan>, DomainError>;
}

/// First line of every generated shell script.
pub const SHELL_PREAMBLE: &str = "#!/bin/sh\n";

/// Constructor stored in the registry.
pub type GeneratorFactory = fn() -> Box<dyn Generator>;

/// Display data for one registered generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub key: &'static str,
    pub description: &'static str,
}

/// Immutable lookup from artifact key to generator constructor.
///
/// Built once with [`GeneratorRegistry::builder`]; duplicate keys are
/// rejected at `build` time. Keys keep registration order.
#[derive(Debug, Clone)]
pub struct GeneratorRegistry {
    entries: Vec<(&'static str, GeneratorFactory)>,
}

/// Collects registrations for a [`GeneratorRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(&'static str, GeneratorFactory)>,
}

impl RegistryBuilder {
    pub fn register(mut self, key: &'static str, factory: GeneratorFactory) -> Self {
        self.entries.push((key, factory));
        self
    }

    pub fn build(self) -> Result<GeneratorRegistry, DomainError> {
        for (i, (key, _)) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|(seen, _)| seen == key) {
                return Err(DomainError::DuplicateGenerator {
                    key: (*key).to_string(),
                });
            }
        }
        Ok(GeneratorRegistry {
            entries: self.entries,
        })
    }
}

impl GeneratorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The ten built-in artifact types.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::builder()
            .register("dockerfile", dockerfile::dockerfile)
            .register("compose", manifests::compose)
            .register("makefile", manifests::makefile)
            .register("devops", manifests::devops)
            .register("build-script", scripts::build)
            .register("deps-install-script", scripts::deps_install)
            .register("entrypoint-script", scripts::entrypoint)
            .register("healthcheck-script", scripts::healthcheck)
            .register("rt-prepare-script", scripts::rt_prepare)
            .register("build-plugins-script", scripts::build_plugins)
            .build()
    }

    /// Construct the generator for `key`.
    pub fn lookup(&self, key: &str) -> Result<Box<dyn Generator>, DomainError> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, factory)| factory())
            .ok_or_else(|| DomainError::UnknownArtifact {
                key: key.to_string(),
                available: self.keys(),
            })
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn describe(&self) -> Vec<GeneratorInfo> {
        self.entries
            .iter()
            .map(|(key, factory)| GeneratorInfo {
                key: *key,
                description: factory().description(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Single-file generators
// ============================================================================

/// A generator whose one output path is read from a variable in its own
/// preset output.
pub(crate) struct SingleFile {
    pub key: &'static str,
    pub description: &'static str,
    pub path_var: &'static str,
    pub preset: fn(&VariablePool) -> VariableMap,
    pub executable: bool,
}

impl Generator for SingleFile {
    fn key(&self) -> &'static str {
        self.key
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn plan(&self, pool: &VariablePool) -> Result<Vec<ArtifactPlan>, DomainError> {
        let variables = (self.preset)(pool);
        let path = path_from(&variables, self.path_var)?;
        let plan = ArtifactPlan::new(path, self.key, variables);
        Ok(vec![if self.executable {
            plan.executable().with_preamble(SHELL_PREAMBLE)
        } else {
            plan
        }])
    }
}

/// Read an output path from a composed variable map.
fn path_from(variables: &VariableMap, key: &str) -> Result<RelativePath, DomainError> {
    let raw = variables.get(key).and_then(Value::as_text).unwrap_or_default();
    RelativePath::try_new(raw)
}
