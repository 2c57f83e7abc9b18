//! `shipwright init`: write a starter service description.

use std::path::Path;

use tracing::info;

use crate::{
    cli::InitArgs,
    error::{CliError, CliResult},
    output::OutputManager,
    service,
};

const DEFAULT_LANGUAGE: &str = "go";
const FALLBACK_NAME: &str = "my-service";

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    if args.service.exists() && !args.force {
        return Err(CliError::ServiceExists { path: args.service });
    }

    let name = match args.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => default_name(),
    };
    let language = args.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    let starter = service::starter(&name, language);
    let text = service::to_toml(&starter)?;
    write_description(&args.service, &text)?;

    info!(path = %args.service.display(), service = %name, language, "Wrote service description");
    output.success(&format!(
        "Created {} for service '{name}'",
        args.service.display()
    ))?;
    output.info("Edit it, then run `shipwright generate`")?;
    Ok(())
}

/// Name of the current directory, or a placeholder.
fn default_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

fn write_description(path: &Path, text: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
            message: format!("Failed to create directory '{}'", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(path, text).map_err(|e| CliError::IoError {
        message: format!("Failed to write '{}'", path.display()),
        source: e,
    })
}
