//! Fixed per-artifact recipes.
//!
//! A preset is the only place an artifact's variable requirements are
//! written down. Each lists its categories in layering order, then adds the
//! artifact's own custom keys.

use crate::application::variables::{VariableComposer, VariablePool};
use crate::domain::{Architecture, Category, Value, VariableMap};

use Category::*;

/// Every architecture an image is built for.
fn architectures() -> Value {
    Value::List(Architecture::ALL.iter().map(|a| a.as_str().to_string()).collect())
}

fn flag(pool: &VariablePool, category: Category, key: &str) -> bool {
    pool.get(category).get(key).is_some_and(|v| !v.is_empty())
}

/// Everything a Dockerfile needs before an architecture is chosen.
pub fn dockerfile_base(pool: &VariablePool) -> VariableComposer<'_> {
    pool.composer().with_categories([
        Common,
        Language,
        Build,
        Runtime,
        Plugin,
        ServiceNetwork,
        CiPaths,
    ])
}

/// Dockerfile for one architecture.
pub fn dockerfile(pool: &VariablePool, arch: Architecture) -> VariableMap {
    dockerfile_from(dockerfile_base(pool), arch)
}

/// Finish a (possibly cloned) Dockerfile base for one architecture.
pub fn dockerfile_from(base: VariableComposer<'_>, arch: Architecture) -> VariableMap {
    base.architecture(arch)
        .with_custom("DOCKERFILE_ARCH", arch.as_str())
        .build()
}

pub fn compose(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, ServiceNetwork, Runtime, CiPaths])
        .with_custom("ARCHITECTURES", architectures())
        .build()
}

/// Makefile: compose targets only when the service publishes ports, and
/// multi-arch targets only when an arm64 builder image is configured.
pub fn makefile(pool: &VariablePool) -> VariableMap {
    let enable_compose = flag(pool, ServiceNetwork, "PORTS");
    let enable_multiarch = flag(pool, Build, "BUILDER_IMAGE_ARM64");
    pool.composer()
        .with_categories([Common, ServiceNetwork, CiPaths])
        .with_custom("ENABLE_COMPOSE", enable_compose)
        .with_custom("ENABLE_MULTIARCH", enable_multiarch)
        .with_custom("ARCHITECTURES", architectures())
        .build()
}

pub fn devops(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Language, Build, CiPaths])
        .with_custom("ARCHITECTURES", architectures())
        .build()
}

pub fn build_script(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Language, Build, CiPaths])
        .build()
}

pub fn deps_install_script(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Language, Build, Plugin, CiPaths])
        .build()
}

pub fn entrypoint_script(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Runtime, ServiceNetwork, CiPaths])
        .build()
}

pub fn healthcheck_script(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Runtime, ServiceNetwork, CiPaths])
        .build()
}

pub fn rt_prepare_script(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Runtime, Plugin, CiPaths])
        .build()
}

pub fn build_plugins_script(pool: &VariablePool) -> VariableMap {
    pool.composer()
        .with_categories([Common, Plugin, CiPaths])
        .build()
}
