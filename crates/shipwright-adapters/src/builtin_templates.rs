//! Templates that ship inside the binary, plus discovery of the directory
//! that may override them.
//!
//! # Override resolution order
//!
//! The first candidate that exists as a directory wins:
//!
//! 1. An explicit path (`templates.local_path` in the app config, or
//!    `--templates`).
//! 2. **`$SHIPWRIGHT_TEMPLATES_DIR`**.
//! 3. **`./.shipwright/templates`** relative to the current directory.
//!
//! No directory is not an error: the built-ins are used as they are.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

/// Environment variable naming a template override directory.
pub const TEMPLATES_DIR_ENV: &str = "SHIPWRIGHT_TEMPLATES_DIR";

/// Project-local override directory.
pub const LOCAL_TEMPLATES_DIR: &str = ".shipwright/templates";

/// File extension of template sources, built-in or override.
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Every built-in template, keyed by artifact key.
pub const BUILTIN: [(&str, &str); 10] = [
    ("dockerfile", include_str!("../templates/dockerfile.tera")),
    ("compose", include_str!("../templates/compose.tera")),
    ("makefile", include_str!("../templates/makefile.tera")),
    ("devops", include_str!("../templates/devops.tera")),
    ("build-script", include_str!("../templates/build-script.tera")),
    (
        "deps-install-script",
        include_str!("../templates/deps-install-script.tera"),
    ),
    (
        "entrypoint-script",
        include_str!("../templates/entrypoint-script.tera"),
    ),
    (
        "healthcheck-script",
        include_str!("../templates/healthcheck-script.tera"),
    ),
    (
        "rt-prepare-script",
        include_str!("../templates/rt-prepare-script.tera"),
    ),
    (
        "build-plugins-script",
        include_str!("../templates/build-plugins-script.tera"),
    ),
];

/// Built-in source for `name`.
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, source)| *source)
}

/// Find the override directory using the order in the module docs.
#[instrument(level = "debug")]
pub fn resolve_override_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    let env = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
    let candidates = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(env)
        .chain(std::iter::once(PathBuf::from(LOCAL_TEMPLATES_DIR)));

    for candidate in candidates {
        if candidate.is_dir() {
            debug!(dir = %candidate.display(), "Using template override directory");
            return Some(candidate);
        }
        debug!(dir = %candidate.display(), "Template directory not found, skipping");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipwright_core::application::GeneratorRegistry;

    #[test]
    fn one_builtin_per_registered_generator() {
        let registry = GeneratorRegistry::builtin().unwrap();
        let mut keys: Vec<&str> = BUILTIN.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, registry.keys());
        keys.dedup();
        assert_eq!(keys.len(), BUILTIN.len());
    }

    #[test]
    fn builtin_sources_are_not_empty() {
        for (key, source) in BUILTIN {
            assert!(!source.trim().is_empty(), "{key}");
        }
        assert!(builtin("makefile").unwrap().contains("\tdocker build"));
        assert!(builtin("helm").is_none());
    }

    #[test]
    fn explicit_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_override_dir(Some(dir.path())),
            Some(dir.path().to_path_buf())
        );
    }
}
