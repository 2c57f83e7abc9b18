//! `shipwright list`: show the artifact types that can be generated.

use serde::Serialize;
use shipwright_core::prelude::*;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ArtifactEntry {
    key: &'static str,
    description: &'static str,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let registry = GeneratorRegistry::builtin().map_err(ShipwrightError::from)?;
    let artifacts = registry.describe();

    match args.format {
        ListFormat::Table => {
            output.header("Available artifacts:")?;
            let width = artifacts.iter().map(|a| a.key.len()).max().unwrap_or(0);
            for info in &artifacts {
                output.print(&format!(
                    "  {:<width$}  {}",
                    info.key,
                    info.description,
                    width = width
                ))?;
            }
        }
        ListFormat::List => {
            for info in &artifacts {
                output.print(info.key)?;
            }
        }
        ListFormat::Json => {
            output.json(&entries(&artifacts))?;
        }
    }

    Ok(())
}

fn entries(artifacts: &[GeneratorInfo]) -> Vec<ArtifactEntry> {
    artifacts
        .iter()
        .map(|info| ArtifactEntry {
            key: info.key,
            description: info.description,
        })
        .collect()
}
