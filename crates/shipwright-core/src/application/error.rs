//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::RegionError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No template registered under this name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Template rendering failed.
    #[error("Template '{template}' failed to render: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An existing file's generated region is damaged.
    #[error("Malformed generated region in {path}: {source}")]
    MalformedRegion { path: PathBuf, source: RegionError },

    /// `--check` found files that would change.
    #[error("{} generated file(s) out of date", paths.len())]
    DriftDetected { paths: Vec<PathBuf> },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}' is available", name),
                "Check templates.local_path for a '<name>.tera' override".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Template '{}' references a variable that is not set", template),
                "Run with -vv to see the variables passed to the template".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::MalformedRegion { path, .. } => vec![
                format!("Inspect the marker lines in {}", path.display()),
                "Restore the missing or duplicated GENERATED marker line".into(),
                "Or delete the whole region and re-run to regenerate it".into(),
            ],
            Self::DriftDetected { paths } => {
                let mut out = vec!["These files differ from what would be generated:".into()];
                out.extend(paths.iter().map(|p| format!("  {}", p.display())));
                out.push("Run: shipwright generate".into());
                out
            }
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::MalformedRegion { .. }
            | Self::DriftDetected { .. }
            | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_region_names_the_file() {
        let err = ApplicationError::MalformedRegion {
            path: PathBuf::from("Makefile"),
            source: RegionError::MissingEndMarker { start_line: 4 },
        };
        let msg = err.to_string();
        assert!(msg.contains("Makefile"));
        assert!(msg.contains("line 4"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn drift_lists_every_path() {
        let err = ApplicationError::DriftDetected {
            paths: vec!["a".into(), "b".into()],
        };
        assert!(err.to_string().starts_with("2 generated"));
        let suggestions = err.suggestions().join("\n");
        assert!(suggestions.contains("  a"));
        assert!(suggestions.contains("  b"));
    }
}
