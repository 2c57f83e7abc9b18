//! Shell scripts under the scripts directory. All executable.

use crate::application::generators::{Generator, SingleFile};
use crate::application::variables::presets;

macro_rules! script {
    ($fn_name:ident, $key:literal, $path_var:literal, $preset:path, $description:literal) => {
        pub(super) fn $fn_name() -> Box<dyn Generator> {
            Box::new(SingleFile {
                key: $key,
                description: $description,
                path_var: $path_var,
                preset: $preset,
                executable: true,
            })
        }
    };
}

script!(
    build,
    "build-script",
    "CI_BUILD_SCRIPT",
    presets::build_script,
    "Builder-stage compile script"
);
script!(
    deps_install,
    "deps-install-script",
    "CI_DEPS_INSTALL_SCRIPT",
    presets::deps_install_script,
    "Installs system packages and language dependencies"
);
script!(
    entrypoint,
    "entrypoint-script",
    "CI_ENTRYPOINT_SCRIPT",
    presets::entrypoint_script,
    "Container entrypoint"
);
script!(
    healthcheck,
    "healthcheck-script",
    "CI_HEALTHCHECK_SCRIPT",
    presets::healthcheck_script,
    "Container health probe"
);
script!(
    rt_prepare,
    "rt-prepare-script",
    "CI_RT_PREPARE_SCRIPT",
    presets::rt_prepare_script,
    "Prepares the runtime image: packages, user, plugins"
);
script!(
    build_plugins,
    "build-plugins-script",
    "CI_BUILD_PLUGINS_SCRIPT",
    presets::build_plugins_script,
    "Fetches and builds plugins"
);
