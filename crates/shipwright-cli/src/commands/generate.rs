//! `shipwright generate`: render deployment artifacts from the service
//! description.

use serde::Serialize;
use shipwright_adapters::{
    InMemoryStore, LocalFilesystem, TeraRenderer, TemplateDirLoader,
    builtin_templates::resolve_override_dir,
};
use shipwright_core::prelude::*;
use tracing::{debug, info, instrument};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    service::load_service,
};

/// JSON shape of one reported file.
#[derive(Debug, Serialize)]
struct FileEntry<'a> {
    artifact: &'a str,
    path: String,
    outcome: &'static str,
    executable: bool,
    bytes: usize,
}

/// JSON shape of a whole run.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    service: &'a str,
    mode: &'static str,
    created: usize,
    updated: usize,
    unchanged: usize,
    files: Vec<FileEntry<'a>>,
}

#[instrument(skip_all, fields(service = %args.service.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = load_service(&args.service)?;
    let service_name = service.service.name.clone();

    let store = template_store(&args, &config)?;
    let generator = GenerateService::new(
        GeneratorRegistry::builtin().map_err(ShipwrightError::from)?,
        Box::new(store),
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    let artifacts = if args.artifacts.is_empty() {
        config.generate.artifacts.clone()
    } else {
        args.artifacts.clone()
    };
    let mode = mode_of(&args);
    let request = GenerateRequest::new(args.output.clone())
        .artifacts(artifacts)
        .mode(mode);
    debug!(?request, "Built generate request");

    let spinner = output.spinner(&format!("Generating artifacts for {service_name}"));
    let result = generator.generate(service, &request);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = result?;
    info!(
        created = report.created(),
        updated = report.updated(),
        unchanged = report.unchanged(),
        "Generation finished"
    );

    if output.is_json() {
        output.json(&summary(&service_name, &report))?;
    } else {
        print_report(&output, &service_name, &report)?;
    }
    Ok(())
}

fn mode_of(args: &GenerateArgs) -> GenerationMode {
    if args.check {
        GenerationMode::Check
    } else if args.dry_run {
        GenerationMode::DryRun
    } else {
        GenerationMode::Write
    }
}

/// Built-in templates plus the first override directory that exists.
///
/// An explicit `--templates` directory must exist; the configured and
/// conventional locations are optional.
fn template_store(args: &GenerateArgs, config: &AppConfig) -> CliResult<InMemoryStore> {
    if let Some(dir) = &args.templates {
        if !dir.is_dir() {
            return Err(CliError::InvalidInput {
                message: format!("templates directory not found: {}", dir.display()),
                source: None,
            });
        }
    }

    let explicit = args
        .templates
        .as_deref()
        .or(config.templates.local_path.as_deref());
    let store = match resolve_override_dir(explicit) {
        Some(dir) => InMemoryStore::with_overrides(&TemplateDirLoader::new(dir))?,
        None => InMemoryStore::with_builtin()?,
    };
    Ok(store)
}

fn mode_label(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Write => "write",
        GenerationMode::DryRun => "dry-run",
        GenerationMode::Check => "check",
    }
}

fn summary<'a>(service: &'a str, report: &'a GenerationReport) -> RunSummary<'a> {
    RunSummary {
        service,
        mode: mode_label(report.mode),
        created: report.created(),
        updated: report.updated(),
        unchanged: report.unchanged(),
        files: report
            .files
            .iter()
            .map(|f| FileEntry {
                artifact: f.artifact,
                path: f.path.to_string(),
                outcome: f.outcome.as_str(),
                executable: f.executable,
                bytes: f.bytes,
            })
            .collect(),
    }
}

fn print_report(
    output: &OutputManager,
    service: &str,
    report: &GenerationReport,
) -> CliResult<()> {
    let verb = match report.mode {
        GenerationMode::Write => "Generated",
        GenerationMode::DryRun => "Would generate",
        GenerationMode::Check => "Checked",
    };
    output.header(&format!("{verb} artifacts for {service}"))?;

    for file in &report.files {
        let line = format!("  {:<10} {}", file.outcome.as_str(), file.path);
        if file.outcome.is_change() {
            output.print(&line)?;
        } else {
            output.detail(&line)?;
        }
    }

    let totals = format!(
        "{} created, {} updated, {} unchanged",
        report.created(),
        report.updated(),
        report.unchanged()
    );
    match report.mode {
        GenerationMode::Check => output.success(&format!("Up to date ({totals})"))?,
        GenerationMode::DryRun => output.info(&format!("Dry run, nothing written ({totals})"))?,
        GenerationMode::Write if report.has_changes() => output.success(&totals)?,
        GenerationMode::Write => output.info(&format!("Nothing to do ({totals})"))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> GenerateArgs {
        GenerateArgs {
            artifacts: vec![],
            service: PathBuf::from("shipwright.toml"),
            output: PathBuf::from("."),
            templates: None,
            dry_run: false,
            check: false,
        }
    }

    #[test]
    fn flags_select_mode() {
        let mut a = args();
        assert_eq!(mode_of(&a), GenerationMode::Write);
        a.dry_run = true;
        assert_eq!(mode_of(&a), GenerationMode::DryRun);
        a.dry_run = false;
        a.check = true;
        assert_eq!(mode_of(&a), GenerationMode::Check);
    }

    #[test]
    fn missing_explicit_templates_dir_is_input_error() {
        let mut a = args();
        a.templates = Some(PathBuf::from("/no/such/templates"));
        let err = template_store(&a, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn summary_counts_outcomes() {
        let report = GenerationReport {
            mode: GenerationMode::DryRun,
            files: vec![],
        };
        let json = serde_json::to_value(summary("api", &report)).unwrap();
        assert_eq!(json["service"], "api");
        assert_eq!(json["mode"], "dry-run");
        assert_eq!(json["created"], 0);
        assert!(json["files"].as_array().unwrap().is_empty());
    }
}
