//! Variable values and the immutable per-category set.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::value_objects::{Architecture, Category};

/// A single template variable.
///
/// Serializes untagged so the renderer sees plain strings, booleans and
/// arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for empty text, `false`, and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Flag(b) => !b,
            Self::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
            Self::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Ordered variable map. Ordering keeps rendered output deterministic.
pub type VariableMap = BTreeMap<String, Value>;

/// The cached output of one category builder.
///
/// There is no mutating API: the map sits behind an `Arc` and is only ever
/// handed out by shared reference or copied out with [`to_map`](Self::to_map).
#[derive(Debug, PartialEq, Eq)]
pub struct SharedVariableSet {
    category: Category,
    values: Arc<VariableMap>,
}

impl SharedVariableSet {
    pub fn new(category: Category, values: VariableMap) -> Self {
        Self {
            category,
            values: Arc::new(values),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy the values out for local modification.
    pub fn to_map(&self) -> VariableMap {
        (*self.values).clone()
    }
}

/// A value that differs per build architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureVariant {
    pub amd64: Value,
    pub arm64: Value,
}

impl ArchitectureVariant {
    /// Read both halves of `<base>_AMD64` / `<base>_ARM64` from a map.
    ///
    /// Returns `None` when neither key is present.
    pub fn from_map(map: &VariableMap, base: &str) -> Option<Self> {
        let amd64 = map.get(&format!("{base}{}", Architecture::Amd64.key_suffix()));
        let arm64 = map.get(&format!("{base}{}", Architecture::Arm64.key_suffix()));
        if amd64.is_none() && arm64.is_none() {
            return None;
        }
        let empty = || Value::Text(String::new());
        Some(Self {
            amd64: amd64.cloned().unwrap_or_else(empty),
            arm64: arm64.cloned().unwrap_or_else(empty),
        })
    }

    pub fn resolve(&self, arch: Architecture) -> &Value {
        match arch {
            Architecture::Amd64 => &self.amd64,
            Architecture::Arm64 => &self.arm64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_set_copies_out() {
        let mut values = VariableMap::new();
        values.insert("A".into(), "1".into());
        let set = SharedVariableSet::new(Category::Common, values);

        let mut copy = set.to_map();
        copy.insert("A".into(), "2".into());

        assert_eq!(set.get("A"), Some(&Value::from("1")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn variant_resolves_per_architecture() {
        let mut map = VariableMap::new();
        map.insert("IMG_AMD64".into(), "x86".into());
        map.insert("IMG_ARM64".into(), "arm".into());

        let variant = ArchitectureVariant::from_map(&map, "IMG").unwrap();
        assert_eq!(variant.resolve(Architecture::Amd64), &Value::from("x86"));
        assert_eq!(variant.resolve(Architecture::Arm64), &Value::from("arm"));
        assert!(ArchitectureVariant::from_map(&map, "OTHER").is_none());
    }

    #[test]
    fn value_display_and_emptiness() {
        assert_eq!(Value::from(vec!["a".to_string(), "b".to_string()]).to_string(), "a b");
        assert!(Value::from("").is_empty());
        assert!(Value::from(false).is_empty());
        assert!(!Value::from(true).is_empty());
    }
}
