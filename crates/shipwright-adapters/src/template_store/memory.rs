//! In-memory template store seeded with the built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use tracing::{debug, info, warn};

use shipwright_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::ShipwrightResult,
};

use crate::{builtin_templates, template_loader::TemplateDirLoader};

/// Thread-safe name → source map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in templates loaded.
    pub fn with_builtin() -> ShipwrightResult<Self> {
        let store = Self::new();
        for (name, source) in builtin_templates::BUILTIN {
            store.insert(name, source)?;
        }
        Ok(store)
    }

    /// Built-ins, then every `<name>.tera` under `loader`'s directory on top.
    pub fn with_overrides(loader: &TemplateDirLoader) -> ShipwrightResult<Self> {
        let store = Self::with_builtin()?;
        let count = store.load_overrides(loader)?;
        info!(dir = %loader.root().display(), count, "Applied template overrides");
        Ok(store)
    }

    /// Replace templates with the files found by `loader`. Returns how many
    /// were loaded.
    pub fn load_overrides(&self, loader: &TemplateDirLoader) -> ShipwrightResult<usize> {
        let templates = loader.load_all()?;
        let count = templates.len();
        for template in templates {
            if builtin_templates::builtin(&template.name).is_none() {
                warn!(
                    name = %template.name,
                    path = %template.path.display(),
                    "Template does not replace a built-in; no artifact will use it"
                );
            }
            self.insert(template.name, template.source)?;
        }
        Ok(count)
    }

    /// Add or replace one template.
    pub fn insert(&self, name: impl Into<String>, source: impl Into<String>) -> ShipwrightResult<()> {
        let name = name.into();
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        debug!(name = %name, "Stored template");
        inner.insert(name, source.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, name: &str) -> ShipwrightResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn names(&self) -> ShipwrightResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }
}
