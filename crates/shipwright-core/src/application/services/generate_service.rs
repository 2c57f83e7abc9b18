//! Generate Service - main application orchestrator.
//!
//! One run, in two phases:
//!
//! 1. **Prepare** (no writes): resolve artifact keys, plan every artifact,
//!    render it and merge it against the current file contents.
//! 2. **Commit**: only if every artifact prepared cleanly, write the files
//!    that changed.
//!
//! A malformed region or an unknown key therefore aborts the run before any
//! file is touched.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        generators::{GeneratorInfo, GeneratorRegistry},
        ports::{Filesystem, TemplateRenderer, TemplateStore},
        services::merge_service::{FileOutcome, MergeService, MergedFile},
        variables::VariablePool,
    },
    domain::{ArtifactPlan, GenerationPlan, RelativePath, ServiceConfig},
    error::ShipwrightResult,
};

/// What a run may do to the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Write changed files.
    #[default]
    Write,
    /// Report what would change; write nothing.
    DryRun,
    /// Write nothing; fail if anything would change.
    Check,
}

/// Inputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Artifact keys to produce. Empty means every registered artifact.
    pub artifacts: Vec<String>,
    pub output_root: PathBuf,
    pub mode: GenerationMode,
}

impl GenerateRequest {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            artifacts: Vec::new(),
            output_root: output_root.into(),
            mode: GenerationMode::Write,
        }
    }

    pub fn artifacts<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifacts = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Per-file result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub artifact: &'static str,
    /// Relative to the output root.
    pub path: RelativePath,
    pub outcome: FileOutcome,
    pub executable: bool,
    pub bytes: usize,
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub mode: GenerationMode,
    pub files: Vec<FileReport>,
}

impl GenerationReport {
    fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    pub fn created(&self) -> usize {
        self.count(FileOutcome::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(FileOutcome::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(FileOutcome::Unchanged)
    }

    /// Whether any file was (or would be) written.
    pub fn has_changes(&self) -> bool {
        self.files.iter().any(|f| f.outcome.is_change())
    }
}

/// An artifact that has been rendered and merged, waiting for commit.
struct Prepared {
    plan: ArtifactPlan,
    merged: MergedFile,
}

/// Main generation service.
pub struct GenerateService {
    registry: GeneratorRegistry,
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service with the given registry and adapters.
    pub fn new(
        registry: GeneratorRegistry,
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            registry,
            store,
            renderer,
            filesystem,
        }
    }

    /// Registered artifact types, for listing.
    pub fn artifacts(&self) -> Vec<GeneratorInfo> {
        self.registry.describe()
    }

    /// Run one generation.
    #[instrument(
        skip_all,
        fields(
            service = %config.service.name,
            output = %request.output_root.display(),
            mode = ?request.mode
        )
    )]
    pub fn generate(
        &self,
        config: ServiceConfig,
        request: &GenerateRequest,
    ) -> ShipwrightResult<GenerationReport> {
        let plan = self.plan(config, &request.artifacts)?;
        info!(files = plan.len(), "Planned artifacts");

        let prepared = self.prepare(plan, &request.output_root)?;

        let report = GenerationReport {
            mode: request.mode,
            files: prepared
                .iter()
                .map(|p| FileReport {
                    artifact: p.plan.template,
                    path: p.plan.path.clone(),
                    outcome: p.merged.outcome,
                    executable: p.plan.permissions.executable_flag(),
                    bytes: p.merged.content.len(),
                })
                .collect(),
        };

        match request.mode {
            GenerationMode::DryRun => {
                info!("Dry run, nothing written");
            }
            GenerationMode::Check => {
                let drifted: Vec<PathBuf> = prepared
                    .iter()
                    .filter(|p| p.merged.outcome.is_change())
                    .map(|p| p.plan.path.as_path().to_path_buf())
                    .collect();
                if !drifted.is_empty() {
                    return Err(ApplicationError::DriftDetected { paths: drifted }.into());
                }
                info!("All generated files are up to date");
            }
            GenerationMode::Write => {
                self.commit(&prepared)?;
                info!(
                    created = report.created(),
                    updated = report.updated(),
                    unchanged = report.unchanged(),
                    "Generation completed"
                );
            }
        }

        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Resolve keys and collect every artifact plan.
    fn plan(&self, config: ServiceConfig, keys: &[String]) -> ShipwrightResult<GenerationPlan> {
        let keys: Vec<&str> = if keys.is_empty() {
            self.registry.keys()
        } else {
            let mut unique: Vec<&str> = Vec::with_capacity(keys.len());
            for key in keys {
                if !unique.contains(&key.as_str()) {
                    unique.push(key.as_str());
                }
            }
            unique
        };

        // Every key must resolve before any generator runs.
        let generators = keys
            .iter()
            .map(|key| self.registry.lookup(key))
            .collect::<Result<Vec<_>, _>>()?;

        let pool = VariablePool::new(config);
        let mut plan = GenerationPlan::new();
        for generator in &generators {
            let artifacts = generator.plan(&pool)?;
            debug!(artifact = generator.key(), files = artifacts.len(), "Planned");
            plan.extend(artifacts);
        }
        plan.validate()?;
        debug!(categories = pool.builds(), "Variable pool populated");

        Ok(plan)
    }

    /// Render and merge everything in memory.
    fn prepare(&self, plan: GenerationPlan, root: &Path) -> ShipwrightResult<Vec<Prepared>> {
        let merger = MergeService::new(self.filesystem.as_ref());

        plan.into_iter()
            .map(|artifact| -> ShipwrightResult<Prepared> {
                let source = self.store.get(artifact.template)?;
                let body = self
                    .renderer
                    .render(artifact.template, &source, &artifact.variables)?;
                let merged = merger.merge(
                    &root.join(&artifact.path),
                    &body,
                    artifact.comment,
                    artifact.preamble,
                )?;
                Ok(Prepared {
                    plan: artifact,
                    merged,
                })
            })
            .collect()
    }

    /// Write changed files and fix permissions.
    fn commit(&self, prepared: &[Prepared]) -> ShipwrightResult<()> {
        for item in prepared {
            let path = &item.merged.path;

            if item.merged.outcome.is_change() {
                if let Some(parent) = path.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(path, &item.merged.content)?;
                debug!(path = %path.display(), outcome = item.merged.outcome.as_str(), "Wrote");
            }

            if item.plan.permissions.executable_flag() {
                self.filesystem.set_permissions(path, true)?;
            }
        }
        Ok(())
    }
}
