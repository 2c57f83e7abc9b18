use std::collections::HashSet;

use crate::domain::{
    entities::{
        common::{Permissions, RelativePath},
        variables::VariableMap,
    },
    error::DomainError,
    value_objects::CommentStyle,
};

/// One file a generator wants produced.
///
/// This is data only: which template to render, with which variables, where
/// the result goes and how its region markers are commented.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPlan {
    pub path: RelativePath,
    pub template: &'static str,
    pub variables: VariableMap,
    pub comment: CommentStyle,
    pub permissions: Permissions,
    /// Lines placed above the region when the file is first created, such as
    /// a shebang.
    pub preamble: Option<&'static str>,
}

impl ArtifactPlan {
    pub fn new(path: RelativePath, template: &'static str, variables: VariableMap) -> Self {
        Self {
            path,
            template,
            variables,
            comment: CommentStyle::Hash,
            permissions: Permissions::read_write(),
            preamble: None,
        }
    }

    pub fn with_comment(mut self, comment: CommentStyle) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_preamble(mut self, preamble: &'static str) -> Self {
        self.preamble = Some(preamble);
        self
    }

    pub fn executable(mut self) -> Self {
        self.permissions = Permissions::executable();
        self
    }
}

/// Every artifact of one generation run, in generation order.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    artifacts: Vec<ArtifactPlan>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, artifact: ArtifactPlan) {
        self.artifacts.push(artifact);
    }

    pub fn extend(&mut self, artifacts: impl IntoIterator<Item = ArtifactPlan>) {
        self.artifacts.extend(artifacts);
    }

    /// Two artifacts may not target the same file: the second would silently
    /// clobber the first's region.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            if !seen.insert(&artifact.path) {
                return Err(DomainError::DuplicatePath {
                    path: artifact.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactPlan> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl IntoIterator for GenerationPlan {
    type Item = ArtifactPlan;
    type IntoIter = std::vec::IntoIter<ArtifactPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(path: &str) -> ArtifactPlan {
        ArtifactPlan::new(RelativePath::try_new(path).unwrap(), "makefile", VariableMap::new())
    }

    #[test]
    fn defaults_to_hash_comments_and_plain_permissions() {
        let p = plan("Makefile");
        assert_eq!(p.comment, CommentStyle::Hash);
        assert!(!p.permissions.executable_flag());
        assert!(plan("a.sh").executable().permissions.executable_flag());
    }

    #[test]
    fn validate_rejects_duplicate_paths() {
        let mut gp = GenerationPlan::new();
        gp.add(plan("Makefile"));
        gp.add(plan("scripts/build.sh"));
        assert!(gp.validate().is_ok());

        gp.add(plan("Makefile"));
        assert_eq!(
            gp.validate(),
            Err(DomainError::DuplicatePath {
                path: "Makefile".into()
            })
        );
    }

    #[test]
    fn empty_plan_is_valid() {
        assert!(GenerationPlan::new().validate().is_ok());
        assert!(GenerationPlan::new().is_empty());
    }
}
