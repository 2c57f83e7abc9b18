//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use shipwright_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ShipwrightResult,
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.write();
        if let Some(parent) = path.parent() {
            add_ancestors(&mut inner.directories, parent);
        }
        inner.files.insert(path, content.into());
    }

    /// A file's content (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().files.get(path.as_ref()).cloned()
    }

    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.read().executables.contains(path.as_ref())
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// Clone of every file and its content.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.read().files.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn add_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ShipwrightResult<()> {
        add_ancestors(&mut self.write().directories, path);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ShipwrightResult<Option<String>> {
        Ok(self.contents(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> ShipwrightResult<()> {
        let mut inner = self.write();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> ShipwrightResult<()> {
        let mut inner = self.write();
        if !inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into());
        }
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("out/Makefile"), "x").is_err());

        fs.create_dir_all(Path::new("out")).unwrap();
        fs.write_file(Path::new("out/Makefile"), "x").unwrap();
        assert_eq!(fs.contents("out/Makefile").as_deref(), Some("x"));
        assert!(fs.exists(Path::new("out")));
    }

    #[test]
    fn read_missing_is_none() {
        let fs = MemoryFilesystem::new();
        assert_eq!(fs.read_file(Path::new("nope")).unwrap(), None);
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.insert("a/b.sh", "#!/bin/sh\n");
        assert!(other.exists(Path::new("a")));
        other.set_permissions(Path::new("a/b.sh"), true).unwrap();
        assert!(fs.is_executable("a/b.sh"));
        assert_eq!(fs.list_files(), vec![PathBuf::from("a/b.sh")]);
    }

    #[test]
    fn permissions_on_missing_file_fail() {
        let fs = MemoryFilesystem::new();
        assert!(fs.set_permissions(Path::new("ghost.sh"), true).is_err());
    }
}
