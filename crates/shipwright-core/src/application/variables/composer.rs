//! Layered composition of one artifact's variables.

use tracing::trace;

use crate::application::variables::VariablePool;
use crate::domain::{
    Architecture, ArchitectureVariant, Category, DomainError, Value, VariableMap,
};

/// Variables that hold one value per architecture and collapse to a single
/// unqualified name once an architecture is chosen.
const ARCHITECTURE_VARIANTS: [&str; 2] = ["BUILDER_IMAGE", "RUNTIME_IMAGE"];

/// By-value builder for one artifact's variable map.
///
/// Two layers are kept apart until [`build`](Self::build):
///
/// - **layered**: category values and architecture resolution. Category
///   merges never replace a key that is already present.
/// - **overrides**: custom values. Applied last, so they win whether they
///   were set before or after a category was layered.
///
/// `Clone` gives an independent continuation; the Dockerfile preset uses it
/// to fork one base per architecture.
#[derive(Debug, Clone)]
pub struct VariableComposer<'p> {
    pool: &'p VariablePool,
    layered: VariableMap,
    overrides: VariableMap,
    architecture: Option<Architecture>,
}

impl<'p> VariableComposer<'p> {
    pub fn new(pool: &'p VariablePool) -> Self {
        Self {
            pool,
            layered: VariableMap::new(),
            overrides: VariableMap::new(),
            architecture: None,
        }
    }

    /// Merge a cached category set. First write wins.
    pub fn with_category(mut self, category: Category) -> Self {
        let set = self.pool.get(category);
        for (key, value) in set.iter() {
            if !self.layered.contains_key(key) {
                self.layered.insert(key.clone(), value.clone());
            }
        }
        trace!(%category, "Layered category");
        self
    }

    /// Merge several categories in order.
    pub fn with_categories(self, categories: impl IntoIterator<Item = Category>) -> Self {
        categories
            .into_iter()
            .fold(self, |composer, category| composer.with_category(category))
    }

    /// Resolve architecture-paired variables for a raw tag.
    ///
    /// Only `amd64` and `arm64` are accepted.
    pub fn with_architecture(self, tag: &str) -> Result<Self, DomainError> {
        let arch: Architecture = tag.parse()?;
        Ok(self.architecture(arch))
    }

    /// Resolve architecture-paired variables.
    ///
    /// `BUILDER_IMAGE` and `RUNTIME_IMAGE` are set from their `_AMD64` /
    /// `_ARM64` forms already present in the working map; `GOOS` and
    /// `GOARCH` are always set. The tagged keys stay in the map.
    pub fn architecture(mut self, arch: Architecture) -> Self {
        let view = self.snapshot();
        for base in ARCHITECTURE_VARIANTS {
            if let Some(variant) = ArchitectureVariant::from_map(&view, base) {
                self.layered
                    .insert(base.to_string(), variant.resolve(arch).clone());
            }
        }
        self.layered.insert("GOOS".into(), arch.os().into());
        self.layered.insert("GOARCH".into(), arch.as_str().into());
        self.architecture = Some(arch);
        self
    }

    /// Add a key no category emits. Always wins.
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Replace a key regardless of what is (or will be) layered. Always wins.
    pub fn override_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        trace!(key = %key, "Override");
        self.overrides.insert(key, value.into());
        self
    }

    /// Current value of `key` as `build` would report it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.overrides.get(key).or_else(|| self.layered.get(key))
    }

    /// Architecture chosen so far, if any.
    pub fn selected_architecture(&self) -> Option<Architecture> {
        self.architecture
    }

    /// Finish composing. The composer is consumed.
    pub fn build(self) -> VariableMap {
        let mut out = self.layered;
        out.extend(self.overrides);
        out
    }

    fn snapshot(&self) -> VariableMap {
        let mut out = self.layered.clone();
        out.extend(self.overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}
