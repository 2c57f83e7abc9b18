//! Combine freshly rendered output with the file already on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::{CommentStyle, GeneratedRegion, RegionMarkers, merge_region};
use crate::error::ShipwrightResult;

/// What a write would do to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Created,
    Updated,
    Unchanged,
}

impl FileOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }

    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// New contents for one file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    pub path: PathBuf,
    pub content: String,
    pub outcome: FileOutcome,
}

/// Reads the current file (if any) and merges `body` into its region.
pub struct MergeService<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> MergeService<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Compute the merged contents of `path`. Nothing is written.
    ///
    /// `preamble` only matters when the file is missing or empty: the new
    /// content starts with it, followed by the region.
    pub fn merge(
        &self,
        path: &Path,
        body: &str,
        style: CommentStyle,
        preamble: Option<&str>,
    ) -> ShipwrightResult<MergedFile> {
        let existing = self.filesystem.read_file(path)?;
        let base = match existing.as_deref() {
            None | Some("") => preamble,
            current => current,
        };

        let content = merge_region(base, body, style).map_err(|source| {
            ApplicationError::MalformedRegion {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if let Some(text) = existing.as_deref() {
            let markers = RegionMarkers::new(style);
            if let Ok(Some(region)) = GeneratedRegion::locate(text, &markers) {
                if region.has_trailing_region(&markers) {
                    warn!(
                        path = %path.display(),
                        line = region.end_line,
                        "Only the first generated region is updated; a later one was left as is"
                    );
                }
            }
        }

        let outcome = match existing {
            None => FileOutcome::Created,
            Some(ref old) if *old == content => FileOutcome::Unchanged,
            Some(_) => FileOutcome::Updated,
        };
        debug!(path = %path.display(), outcome = outcome.as_str(), "Merged");

        Ok(MergedFile {
            path: path.to_path_buf(),
            content,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{END_MARKER, START_MARKER};

    fn fs_with(content: Option<String>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .times(1)
            .returning(move |_| Ok(content.clone()));
        fs
    }

    #[test]
    fn missing_file_is_created() {
        let fs = fs_with(None);
        let merged = MergeService::new(&fs)
            .merge(Path::new("out/Makefile"), "all:\n", CommentStyle::Hash, None)
            .unwrap();
        assert_eq!(merged.outcome, FileOutcome::Created);
        assert!(merged.content.starts_with(&format!("# {START_MARKER}\n")));
    }

    #[test]
    fn identical_region_is_unchanged() {
        let current = format!("x\n# {START_MARKER}\nall:\n# {END_MARKER}\n");
        let fs = fs_with(Some(current.clone()));
        let merged = MergeService::new(&fs)
            .merge(Path::new("Makefile"), "all:\n", CommentStyle::Hash, None)
            .unwrap();
        assert_eq!(merged.outcome, FileOutcome::Unchanged);
        assert_eq!(merged.content, current);
    }

    #[test]
    fn malformed_file_reports_path() {
        let fs = fs_with(Some(format!("# {START_MARKER}\nall:\n")));
        let err = MergeService::new(&fs)
            .merge(Path::new("Makefile"), "all:\n", CommentStyle::Hash, None)
            .unwrap_err();
        assert!(err.to_string().contains("Makefile"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn preamble_heads_new_files_only() {
        let fs = fs_with(None);
        let merged = MergeService::new(&fs)
            .merge(Path::new("build.sh"), "make\n", CommentStyle::Hash, Some("#!/bin/sh\n"))
            .unwrap();
        assert_eq!(merged.outcome, FileOutcome::Created);
        assert_eq!(
            merged.content,
            format!("#!/bin/sh\n\n# {START_MARKER}\nmake\n# {END_MARKER}\n")
        );

        let current = format!("#!/bin/bash\n# {START_MARKER}\nmake\n# {END_MARKER}\n");
        let fs = fs_with(Some(current.clone()));
        let merged = MergeService::new(&fs)
            .merge(Path::new("build.sh"), "make\n", CommentStyle::Hash, Some("#!/bin/sh\n"))
            .unwrap();
        assert_eq!(merged.outcome, FileOutcome::Unchanged);
        assert_eq!(merged.content, current);
    }

    #[test]
    fn preamble_fills_an_empty_file() {
        let fs = fs_with(Some(String::new()));
        let merged = MergeService::new(&fs)
            .merge(Path::new("build.sh"), "make\n", CommentStyle::Hash, Some("#!/bin/sh\n"))
            .unwrap();
        assert_eq!(merged.outcome, FileOutcome::Updated);
        assert_eq!(
            merged.content,
            format!("#!/bin/sh\n\n# {START_MARKER}\nmake\n# {END_MARKER}\n")
        );
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(FileOutcome::Updated.as_str(), "updated");
        assert!(FileOutcome::Created.is_change());
        assert!(!FileOutcome::Unchanged.is_change());
    }
}
