//! Filesystem-based template loader.
//!
//! Reads `<name>.tera` files from a directory tree. A file's name, relative
//! to the root and without the extension, is the template name it replaces:
//!
//! ```text
//! .shipwright/templates/
//! ├── dockerfile.tera      ← replaces the built-in "dockerfile"
//! ├── makefile.tera
//! └── README.md            ← ignored
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use shipwright_core::{application::ApplicationError, error::ShipwrightResult};

use crate::builtin_templates::TEMPLATE_EXTENSION;

/// One template read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTemplate {
    pub name: String,
    pub source: String,
    pub path: PathBuf,
}

/// Loads template sources from a directory.
#[derive(Debug, Clone)]
pub struct TemplateDirLoader {
    root: PathBuf,
}

impl TemplateDirLoader {
    /// The directory does not need to exist yet; [`load_all`](Self::load_all)
    /// fails if it is missing when called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every `.tera` file under the root, sorted by name.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::FilesystemError`] if the root is missing or a
    /// file cannot be read. Non-UTF-8 file names are skipped with a warning.
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    pub fn load_all(&self) -> ShipwrightResult<Vec<LoadedTemplate>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: "templates directory not found".into(),
            }
            .into());
        }

        let mut templates = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().unwrap_or(&self.root).to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }

            let Some(name) = self.template_name(path) else {
                warn!(path = %path.display(), "Skipping template with a non UTF-8 name");
                continue;
            };

            let source = fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to read template: {e}"),
            })?;

            debug!(name = %name, "Loaded template override");
            templates.push(LoadedTemplate {
                name,
                source,
                path: path.to_path_buf(),
            });
        }

        templates.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = templates.len(), "Finished loading templates");
        Ok(templates)
    }

    /// `sub/dir/name.tera` → `sub/dir/name`, always with forward slashes.
    fn template_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let parts = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        Some(parts.join("/"))
    }
}
