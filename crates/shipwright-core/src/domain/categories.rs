//! Category variable builders: `(Category, &ServiceConfig) -> VariableMap`.
//!
//! Every builder is total. Missing configuration yields empty values, never
//! an error, and every builder always emits exactly the keys listed in
//! [`keys`]. Key sets are pairwise disjoint, which is what lets the composer
//! layer categories with first-write-wins and no surprises.

use crate::domain::{
    commands::{CommandKind, derive_command},
    entities::{
        service_config::ServiceConfig,
        variables::{Value, VariableMap},
    },
    value_objects::{Architecture, Category, LanguageKind},
};

pub const DEFAULT_DEPLOY_DIR: &str = "/app";
pub const DEFAULT_SCRIPTS_DIR: &str = ".shipwright/scripts";
pub const DEFAULT_DOCKERFILE_DIR: &str = ".shipwright/docker";
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yaml";
pub const DEFAULT_MAKEFILE: &str = "Makefile";
pub const DEFAULT_DEVOPS_FILE: &str = ".shipwright/devops.yaml";

/// Script file names under the scripts directory, keyed by their variable.
pub const SCRIPT_FILES: [(&str, &str); 6] = [
    ("CI_BUILD_SCRIPT", "build.sh"),
    ("CI_DEPS_INSTALL_SCRIPT", "deps-install.sh"),
    ("CI_ENTRYPOINT_SCRIPT", "entrypoint.sh"),
    ("CI_HEALTHCHECK_SCRIPT", "healthcheck.sh"),
    ("CI_RT_PREPARE_SCRIPT", "rt-prepare.sh"),
    ("CI_BUILD_PLUGINS_SCRIPT", "build-plugins.sh"),
];

/// The fixed key set a category emits.
pub const fn keys(category: Category) -> &'static [&'static str] {
    match category {
        Category::Common => &[
            "SERVICE_NAME",
            "SERVICE_NAME_SNAKE",
            "SERVICE_NAME_KEBAB",
            "SERVICE_NAME_PASCAL",
            "SERVICE_DESCRIPTION",
            "DEPLOY_DIR",
        ],
        Category::Build => &[
            "BUILD_COMMAND",
            "PRE_BUILD_COMMAND",
            "POST_BUILD_COMMAND",
            "BUILD_SYSTEM_PACKAGES",
            "BUILD_OUTPUT_DIR",
            "BUILDER_IMAGE_AMD64",
            "BUILDER_IMAGE_ARM64",
            "RUNTIME_IMAGE_AMD64",
            "RUNTIME_IMAGE_ARM64",
        ],
        Category::Runtime => &[
            "STARTUP_COMMAND",
            "HEALTHCHECK_COMMAND",
            "RUNTIME_SYSTEM_PACKAGES",
            "RUNTIME_USER",
            "RUNTIME_ENV",
        ],
        Category::Plugin => &[
            "HAS_PLUGINS",
            "PLUGIN_NAMES",
            "PLUGIN_INSTALL_COMMANDS",
            "PLUGIN_PACKAGES",
        ],
        Category::CiPaths => &[
            "CI_SCRIPTS_DIR",
            "CI_DOCKERFILE_DIR",
            "CI_COMPOSE_FILE",
            "CI_MAKEFILE",
            "CI_DEVOPS_FILE",
            "CI_BUILD_SCRIPT",
            "CI_DEPS_INSTALL_SCRIPT",
            "CI_ENTRYPOINT_SCRIPT",
            "CI_HEALTHCHECK_SCRIPT",
            "CI_RT_PREPARE_SCRIPT",
            "CI_BUILD_PLUGINS_SCRIPT",
        ],
        Category::ServiceNetwork => &["PORTS", "PRIMARY_PORT", "PORT_MAPPINGS", "NETWORK_NAME"],
        Category::Language => &["LANGUAGE", "LANGUAGE_VERSION", "DEPS_INSTALL_COMMAND"],
    }
}

/// Derive one category's variables from the service description.
pub fn build_category(category: Category, config: &ServiceConfig) -> VariableMap {
    let mut vars = VariableMap::new();
    match category {
        Category::Common => common(config, &mut vars),
        Category::Build => build(config, &mut vars),
        Category::Runtime => runtime(config, &mut vars),
        Category::Plugin => plugin(config, &mut vars),
        Category::CiPaths => ci_paths(config, &mut vars),
        Category::ServiceNetwork => service_network(config, &mut vars),
        Category::Language => language(config, &mut vars),
    }
    vars
}

fn set(vars: &mut VariableMap, key: &str, value: impl Into<Value>) {
    vars.insert(key.to_string(), value.into());
}

fn common(config: &ServiceConfig, vars: &mut VariableMap) {
    let name = config.service.name.trim();
    set(vars, "SERVICE_NAME", name);
    set(vars, "SERVICE_NAME_SNAKE", to_snake_case(name));
    set(vars, "SERVICE_NAME_KEBAB", to_kebab_case(name));
    set(vars, "SERVICE_NAME_PASCAL", to_pascal_case(name));
    set(vars, "SERVICE_DESCRIPTION", config.service.description.as_str());
    set(vars, "DEPLOY_DIR", deploy_dir(config));
}

fn build(config: &ServiceConfig, vars: &mut VariableMap) {
    let b = &config.build;
    set(vars, "BUILD_COMMAND", derive_command(config, CommandKind::Build));
    set(vars, "PRE_BUILD_COMMAND", b.commands.pre_build.as_str());
    set(vars, "POST_BUILD_COMMAND", b.commands.post_build.as_str());
    set(vars, "BUILD_SYSTEM_PACKAGES", b.system_packages.clone());
    set(vars, "BUILD_OUTPUT_DIR", b.output_dir.as_str());

    for arch in Architecture::ALL {
        let suffix = arch.key_suffix();
        let (builder, runtime) = match arch {
            Architecture::Amd64 => (&b.builder_image.amd64, &b.runtime_image.amd64),
            Architecture::Arm64 => (&b.builder_image.arm64, &b.runtime_image.arm64),
        };
        set(vars, &format!("BUILDER_IMAGE{suffix}"), builder.as_str());
        set(vars, &format!("RUNTIME_IMAGE{suffix}"), runtime.as_str());
    }
}

fn runtime(config: &ServiceConfig, vars: &mut VariableMap) {
    let r = &config.runtime;
    set(vars, "STARTUP_COMMAND", r.startup_command.as_str());
    set(vars, "HEALTHCHECK_COMMAND", r.healthcheck.as_str());
    set(vars, "RUNTIME_SYSTEM_PACKAGES", r.system_packages.clone());
    set(vars, "RUNTIME_USER", r.user.as_str());
    let env: Vec<String> = r.env.iter().map(|(k, v)| format!("{k}={v}")).collect();
    set(vars, "RUNTIME_ENV", env);
}

fn plugin(config: &ServiceConfig, vars: &mut VariableMap) {
    let plugins = &config.plugins;
    set(vars, "HAS_PLUGINS", !plugins.is_empty());
    set(
        vars,
        "PLUGIN_NAMES",
        plugins.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
    );
    set(
        vars,
        "PLUGIN_INSTALL_COMMANDS",
        plugins
            .iter()
            .filter(|p| !p.install_command.trim().is_empty())
            .map(|p| p.install_command.clone())
            .collect::<Vec<_>>(),
    );

    let mut packages: Vec<String> = Vec::new();
    for package in plugins.iter().flat_map(|p| &p.packages) {
        if !packages.contains(package) {
            packages.push(package.clone());
        }
    }
    set(vars, "PLUGIN_PACKAGES", packages);
}

fn ci_paths(config: &ServiceConfig, vars: &mut VariableMap) {
    let ci = &config.ci;
    let pick = |value: &Option<String>, default: &str| -> String {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    let scripts_dir = pick(&ci.scripts_dir, DEFAULT_SCRIPTS_DIR);
    set(vars, "CI_DOCKERFILE_DIR", pick(&ci.dockerfile_dir, DEFAULT_DOCKERFILE_DIR));
    set(vars, "CI_COMPOSE_FILE", pick(&ci.compose_file, DEFAULT_COMPOSE_FILE));
    set(vars, "CI_MAKEFILE", pick(&ci.makefile, DEFAULT_MAKEFILE));
    set(vars, "CI_DEVOPS_FILE", pick(&ci.devops_file, DEFAULT_DEVOPS_FILE));

    let dir = scripts_dir.trim_end_matches('/');
    for (key, file) in SCRIPT_FILES {
        let path = if dir.is_empty() || dir == "." {
            file.to_string()
        } else {
            format!("{dir}/{file}")
        };
        set(vars, key, path);
    }
    set(vars, "CI_SCRIPTS_DIR", scripts_dir);
}

fn service_network(config: &ServiceConfig, vars: &mut VariableMap) {
    let n = &config.network;
    let ports: Vec<String> = n.ports.iter().map(u16::to_string).collect();
    set(
        vars,
        "PRIMARY_PORT",
        ports.first().cloned().unwrap_or_default(),
    );
    set(
        vars,
        "PORT_MAPPINGS",
        ports.iter().map(|p| format!("{p}:{p}")).collect::<Vec<_>>(),
    );
    set(vars, "PORTS", ports);

    let network = match n.network_name.trim() {
        "" if config.service.name.trim().is_empty() => String::new(),
        "" => format!("{}-net", to_kebab_case(&config.service.name)),
        explicit => explicit.to_string(),
    };
    set(vars, "NETWORK_NAME", network);
}

fn language(config: &ServiceConfig, vars: &mut VariableMap) {
    let kind = LanguageKind::parse_lenient(&config.language.kind);
    set(vars, "LANGUAGE", kind.as_str());
    set(vars, "LANGUAGE_VERSION", config.language.version.as_str());
    set(
        vars,
        "DEPS_INSTALL_COMMAND",
        derive_command(config, CommandKind::DepsInstall),
    );
}

pub(crate) fn deploy_dir(config: &ServiceConfig) -> String {
    config
        .service
        .deploy_dir
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DEPLOY_DIR)
        .to_string()
}

// ============================================================================
// Case Conversion
// ============================================================================

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split an identifier into lowercase words.
///
/// Splits on `_`, `-`, `.` and whitespace, on `aB` transitions, and before the
/// last capital of an acronym (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);

        if let Some(&next) = chars.peek() {
            let camel = c.is_lowercase() && next.is_uppercase();
            let acronym = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if camel || acronym {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}
