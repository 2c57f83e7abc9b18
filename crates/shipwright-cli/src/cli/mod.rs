//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Default service description file, relative to the current directory.
pub const DEFAULT_SERVICE_FILE: &str = "shipwright.toml";

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "shipwright",
    bin_name = "shipwright",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2693} Deployment artifacts from one service description",
    long_about = "Shipwright generates Dockerfiles, compose files, Makefiles and \
                  build scripts from a single service description, and regenerates \
                  them without touching anything outside the generated region.",
    after_help = "EXAMPLES:\n\
        \x20 shipwright init\n\
        \x20 shipwright generate\n\
        \x20 shipwright generate dockerfile makefile --output deploy\n\
        \x20 shipwright generate --check\n\
        \x20 shipwright completions bash > /usr/share/bash-completion/completions/shipwright",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate or refresh deployment artifacts.
    #[command(
        visible_alias = "gen",
        about = "Generate deployment artifacts",
        after_help = "EXAMPLES:\n\
            \x20 shipwright generate                       # every artifact\n\
            \x20 shipwright generate dockerfile compose    # a subset\n\
            \x20 shipwright generate --dry-run             # show what would change\n\
            \x20 shipwright generate --check               # fail if anything is stale"
    )]
    Generate(GenerateArgs),

    /// List artifact types.
    #[command(
        visible_alias = "ls",
        about = "List available artifact types",
        after_help = "EXAMPLES:\n\
            \x20 shipwright list\n\
            \x20 shipwright list --format json"
    )]
    List(ListArgs),

    /// Write a starter service description.
    #[command(
        about = "Create a starter service description",
        after_help = "EXAMPLES:\n\
            \x20 shipwright init\n\
            \x20 shipwright init --name billing-api --lang go\n\
            \x20 shipwright init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 shipwright completions bash > ~/.local/share/bash-completion/completions/shipwright\n\
            \x20 shipwright completions zsh  > ~/.zfunc/_shipwright\n\
            \x20 shipwright completions fish > ~/.config/fish/completions/shipwright.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the application configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 shipwright config get templates.local_path\n\
            \x20 shipwright config list\n\
            \x20 shipwright config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `shipwright generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Artifact keys to generate. Empty means the configured default set, or
    /// every artifact.
    #[arg(value_name = "ARTIFACT", help = "Artifacts to generate (default: all)")]
    pub artifacts: Vec<String>,

    /// Service description file.
    #[arg(
        short = 's',
        long = "service",
        value_name = "FILE",
        default_value = DEFAULT_SERVICE_FILE,
        help = "Service description (TOML, YAML or JSON)"
    )]
    pub service: PathBuf,

    /// Directory the artifact paths are relative to.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Directory of `<name>.tera` files replacing built-in templates.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template override directory"
    )]
    pub templates: Option<PathBuf>,

    /// Report what would change without writing.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,

    /// Write nothing; exit non-zero when a file is out of date.
    #[arg(
        long = "check",
        conflicts_with = "dry_run",
        help = "Fail if any generated file is out of date"
    )]
    pub check: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `shipwright list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One key per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `shipwright init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the service description.
    #[arg(
        short = 's',
        long = "service",
        value_name = "FILE",
        default_value = DEFAULT_SERVICE_FILE,
        help = "Service description to create"
    )]
    pub service: PathBuf,

    /// Service name. Defaults to the current directory's name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Service name")]
    pub name: Option<String>,

    /// Language of the service.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        help = "Language (go, rust, python, node, java)"
    )]
    pub language: Option<String>,

    /// Overwrite an existing file.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing service description")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `shipwright completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `shipwright config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.local_path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::parse_from(["shipwright", "generate"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert!(args.artifacts.is_empty());
        assert_eq!(args.service, PathBuf::from(DEFAULT_SERVICE_FILE));
        assert_eq!(args.output, PathBuf::from("."));
        assert!(!args.dry_run && !args.check);
    }

    #[test]
    fn generate_with_artifacts_and_alias() {
        let cli = Cli::parse_from(["shipwright", "gen", "dockerfile", "makefile", "-o", "out"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.artifacts, vec!["dockerfile", "makefile"]);
        assert_eq!(args.output, PathBuf::from("out"));
    }

    #[test]
    fn dry_run_and_check_conflict() {
        let result = Cli::try_parse_from(["shipwright", "generate", "--dry-run", "--check"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["shipwright", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_format_json() {
        let cli = Cli::parse_from(["shipwright", "ls", "--format", "json"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Json);
    }
}
