use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to be **relative** and free of `..`.
///
/// Artifact output paths come partly from the service description (`[ci]`
/// overrides), so they are checked before anything is joined onto the
/// output root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Try to create a relative path.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if path.is_absolute() || escapes || path.as_os_str().is_empty() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Join a file name onto a directory taken from the service description.
    pub fn join(dir: &str, file: &str) -> Result<Self, DomainError> {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() || dir == "." {
            Self::try_new(file)
        } else {
            Self::try_new(Path::new(dir).join(file))
        }
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// File extension, if any.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|e| e.to_str())
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Simplified permission model for generated artifacts.
///
/// This is a **capability model**, not a Unix permission model: scripts are
/// executable, everything else is plain read/write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    /// Read and write permissions.
    pub const fn read_write() -> Self {
        Self { executable: false }
    }

    /// Read, write and execute permissions.
    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------------
    // RelativePath
    // ---------------------------------------------------------------------

    #[test]
    fn relative_path_accepts_relative() {
        let p = RelativePath::try_new("scripts/build.sh").unwrap();
        assert_eq!(p.as_path(), Path::new("scripts/build.sh"));
        assert_eq!(p.extension(), Some("sh"));
    }

    #[test]
    fn try_new_rejects_absolute() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
    }

    #[test]
    fn try_new_rejects_parent_escape() {
        assert!(RelativePath::try_new("../outside/Makefile").is_err());
        assert!(RelativePath::try_new("a/../../b").is_err());
    }

    #[test]
    fn try_new_rejects_empty() {
        assert!(RelativePath::try_new("").is_err());
    }

    #[test]
    fn join_handles_current_dir() {
        let p = RelativePath::join(".", "Makefile").unwrap();
        assert_eq!(p.as_path(), Path::new("Makefile"));
        let p = RelativePath::join("ci/docker/", "Dockerfile.amd64").unwrap();
        assert_eq!(p.as_path(), Path::new("ci/docker/Dockerfile.amd64"));
    }

    // ---------------------------------------------------------------------
    // Permissions
    // ---------------------------------------------------------------------

    #[test]
    fn permissions_defaults() {
        assert!(!Permissions::default().executable_flag());
        assert!(Permissions::executable().executable_flag());
    }
}
