//! Per-language command derivation.
//!
//! A command is produced by an ordered list of `String -> String` steps:
//!
//! 1. `language-default`: the toolchain's stock command
//! 2. `config-override`: the service description's explicit command, if any
//! 3. `substitute`: `${VAR}` placeholders expanded from the description
//!
//! Each step sees only the previous step's output, so the order above is the
//! whole precedence story.

use std::collections::BTreeMap;

use crate::domain::{
    categories::deploy_dir, entities::service_config::ServiceConfig, value_objects::LanguageKind,
};

/// Which command of a toolchain is being derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Build,
    DepsInstall,
}

impl LanguageKind {
    /// Stock command for this toolchain. `Generic` has none.
    pub const fn default_command(&self, kind: CommandKind) -> &'static str {
        match (self, kind) {
            (Self::Go, CommandKind::Build) => "CGO_ENABLED=0 go build -o ${SERVICE_NAME} .",
            (Self::Go, CommandKind::DepsInstall) => "go mod download",
            (Self::Rust, CommandKind::Build) => "cargo build --release --locked",
            (Self::Rust, CommandKind::DepsInstall) => "cargo fetch --locked",
            (Self::Python, CommandKind::Build) => "python -m compileall -q .",
            (Self::Python, CommandKind::DepsInstall) => {
                "pip install --no-cache-dir -r requirements.txt"
            }
            (Self::Node, CommandKind::Build) => "npm run build",
            (Self::Node, CommandKind::DepsInstall) => "npm ci",
            (Self::Java, CommandKind::Build) => "mvn -B -q package -DskipTests",
            (Self::Java, CommandKind::DepsInstall) => "mvn -B -q dependency:go-offline",
            (Self::Generic, _) => "",
        }
    }
}

type Step = Box<dyn Fn(String) -> String>;

/// An ordered, named sequence of command transformations.
#[derive(Default)]
pub struct CommandPipeline {
    steps: Vec<(&'static str, Step)>,
}

impl CommandPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn then(mut self, name: &'static str, step: impl Fn(String) -> String + 'static) -> Self {
        self.steps.push((name, Box::new(step)));
        self
    }

    /// Step names in application order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(name, _)| *name).collect()
    }

    pub fn run(&self, seed: String) -> String {
        self.steps.iter().fold(seed, |command, (_, step)| step(command))
    }

    /// The standard three-step pipeline for one command of `config`.
    pub fn for_config(config: &ServiceConfig, kind: CommandKind) -> Self {
        let language = LanguageKind::parse_lenient(&config.language.kind);
        let explicit = match kind {
            CommandKind::Build => config.build.commands.build.clone(),
            CommandKind::DepsInstall => config.language.deps_install.clone(),
        };
        let context = substitution_context(config);

        Self::new()
            .then("language-default", move |_| {
                language.default_command(kind).to_string()
            })
            .then("config-override", move |command| {
                explicit.clone().unwrap_or(command)
            })
            .then("substitute", move |command| substitute(&command, &context))
    }
}

/// Derive a command for `config`.
pub fn derive_command(config: &ServiceConfig, kind: CommandKind) -> String {
    CommandPipeline::for_config(config, kind).run(String::new())
}

fn substitution_context(config: &ServiceConfig) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("SERVICE_NAME", config.service.name.clone()),
        ("LANGUAGE_VERSION", config.language.version.clone()),
        ("DEPLOY_DIR", deploy_dir(config)),
        ("BUILD_OUTPUT_DIR", config.build.output_dir.clone()),
    ])
}

/// Expand `${NAME}` for every name in `context`. Unknown placeholders and
/// unterminated `${` are left verbatim so shell variables survive.
fn substitute(command: &str, context: &BTreeMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(command.len());
    let mut rest = command;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match context.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_service() -> ServiceConfig {
        let mut config = ServiceConfig::named("orders");
        config.language.kind = "go".into();
        config.language.version = "1.22".into();
        config
    }

    #[test]
    fn language_default_is_substituted() {
        assert_eq!(
            derive_command(&go_service(), CommandKind::Build),
            "CGO_ENABLED=0 go build -o orders ."
        );
        assert_eq!(
            derive_command(&go_service(), CommandKind::DepsInstall),
            "go mod download"
        );
    }

    #[test]
    fn config_override_replaces_default() {
        let mut config = go_service();
        config.build.commands.build = Some("go build -o app".into());
        assert_eq!(derive_command(&config, CommandKind::Build), "go build -o app");
    }

    #[test]
    fn override_is_substituted_too() {
        let mut config = go_service();
        config.build.commands.build = Some("go${LANGUAGE_VERSION} build -o ${DEPLOY_DIR}/bin".into());
        assert_eq!(
            derive_command(&config, CommandKind::Build),
            "go1.22 build -o /app/bin"
        );
    }

    #[test]
    fn generic_language_has_no_default() {
        let config = ServiceConfig::named("x");
        assert_eq!(derive_command(&config, CommandKind::Build), "");
        assert_eq!(derive_command(&config, CommandKind::DepsInstall), "");
    }

    #[test]
    fn unknown_placeholders_survive() {
        let ctx = BTreeMap::from([("A", "1".to_string())]);
        assert_eq!(substitute("${A} ${HOME} ${", &ctx), "1 ${HOME} ${");
        assert_eq!(substitute("no vars", &ctx), "no vars");
    }

    #[test]
    fn pipeline_order_is_inspectable() {
        let pipeline = CommandPipeline::for_config(&go_service(), CommandKind::Build);
        assert_eq!(
            pipeline.step_names(),
            vec!["language-default", "config-override", "substitute"]
        );
    }

    #[test]
    fn custom_pipeline_applies_steps_in_order() {
        let pipeline = CommandPipeline::new()
            .then("a", |c| c + "a")
            .then("b", |c| c + "b");
        assert_eq!(pipeline.run(">".into()), ">ab");
    }
}
