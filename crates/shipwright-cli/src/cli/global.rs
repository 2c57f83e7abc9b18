//! Flags shared by every `shipwright` subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

/// Flattened into [`super::Cli`]; every flag is `global`, so it may appear
/// before or after the subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` info, `-vv` debug, `-vvv` trace. Warnings are always
    /// shown unless `--quiet` is given.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colours. Set implicitly by `NO_COLOR`.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Tool configuration file, instead of the per-user default.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How reports are printed. `auto` defers to `output.format`, then to
    /// terminal detection.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Colours and symbols for a terminal.
    Human,
    /// Same text, no colours.
    Plain,
    /// One JSON document on stdout.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value. Unknown values mean `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        global: GlobalArgs,
    }

    #[test]
    fn config_format_parsing() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("plain"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_config("whatever"), OutputFormat::Auto);
    }

    #[test]
    fn verbosity_counts() {
        let parsed = Harness::parse_from(["shipwright", "-vvv"]);
        assert_eq!(parsed.global.verbose, 3);
        assert!(!parsed.global.quiet);
    }

    #[test]
    fn output_format_flag() {
        let parsed = Harness::parse_from(["shipwright", "--output-format", "json"]);
        assert_eq!(parsed.global.output_format, OutputFormat::Json);
    }
}
