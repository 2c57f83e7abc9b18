//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `shipwright-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::VariableMap;
use crate::error::ShipwrightResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `shipwright_adapters::filesystem::LocalFilesystem` (production)
/// - `shipwright_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ShipwrightResult<()>;

    /// Read a file as UTF-8. `Ok(None)` when it does not exist.
    fn read_file(&self, path: &Path) -> ShipwrightResult<Option<String>>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> ShipwrightResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> ShipwrightResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source lookup.
///
/// Implemented by:
/// - `shipwright_adapters::template_store::InMemoryStore` (built-ins plus
///   directory overrides)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Template source for `name`.
    fn get(&self, name: &str) -> ShipwrightResult<String>;

    /// Every template name the store can serve, sorted.
    fn names(&self) -> ShipwrightResult<Vec<String>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `shipwright_adapters::renderer::TeraRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` (named `name` for diagnostics) against `variables`.
    fn render(&self, name: &str, template: &str, variables: &VariableMap)
    -> ShipwrightResult<String>;
}
