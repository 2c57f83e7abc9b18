// ============================================================================
// domain/errors.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Composition Errors
    // ========================================================================
    #[error("unsupported architecture '{tag}' (expected 'amd64' or 'arm64')")]
    UnsupportedArchitecture { tag: String },

    // ========================================================================
    // Region Errors
    // ========================================================================
    #[error("malformed generated region: {0}")]
    MalformedRegion(#[from] RegionError),

    // ========================================================================
    // Registry Errors
    // ========================================================================
    #[error("generator '{key}' registered more than once")]
    DuplicateGenerator { key: String },

    #[error("unknown artifact type '{key}', available: [{}]", available.join(", "))]
    UnknownArtifact {
        key: String,
        available: Vec<&'static str>,
    },

    // ========================================================================
    // Plan Violations
    // ========================================================================
    #[error("Duplicate output path in plan: {path}")]
    DuplicatePath { path: String },

    #[error("Output path must be relative and stay inside the output root: '{path}'")]
    AbsolutePathNotAllowed { path: String },
}

/// Why a file's generated region could not be located.
///
/// Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("start marker on line {start_line} has no matching end marker")]
    MissingEndMarker { start_line: usize },

    #[error("start marker on line {nested_line} is nested inside the region opened on line {start_line}")]
    NestedStartMarker {
        start_line: usize,
        nested_line: usize,
    },

    #[error("end marker on line {line} has no preceding start marker")]
    UnexpectedEndMarker { line: usize },

    #[error("rendered output contains a region marker on line {line}")]
    MarkerInBody { line: usize },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedArchitecture { tag } => vec![
                format!("'{}' is not a supported architecture", tag),
                "Supported architectures: amd64, arm64".into(),
            ],
            Self::MalformedRegion(_) => vec![
                "The generated region markers in this file were edited by hand".into(),
                "Restore the missing '===== GENERATED_END =====' line".into(),
                "Or delete the whole region and re-run to regenerate it".into(),
            ],
            Self::UnknownArtifact { available, .. } => vec![
                "Available artifact types:".into(),
                format!("  {}", available.join(", ")),
                "Try: shipwright list".into(),
            ],
            Self::DuplicateGenerator { .. } => vec![
                "This is a bug in the built-in generator table".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two artifacts would both write '{}'", path),
                "Give them different paths in the [ci] section".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => vec![
                "Paths in the [ci] section are relative to the output directory".into(),
                "Remove leading '/' and any '..' components".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedArchitecture { .. }
            | Self::MalformedRegion(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::UnknownArtifact { .. } => ErrorCategory::NotFound,
            Self::DuplicateGenerator { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
