//! Single-file manifests at the repository level.

use crate::application::generators::{Generator, SingleFile};
use crate::application::variables::presets;

pub(super) fn compose() -> Box<dyn Generator> {
    Box::new(SingleFile {
        key: "compose",
        description: "docker compose service definition",
        path_var: "CI_COMPOSE_FILE",
        preset: presets::compose,
        executable: false,
    })
}

pub(super) fn makefile() -> Box<dyn Generator> {
    Box::new(SingleFile {
        key: "makefile",
        description: "Make targets for building, running and publishing images",
        path_var: "CI_MAKEFILE",
        preset: presets::makefile,
        executable: false,
    })
}

pub(super) fn devops() -> Box<dyn Generator> {
    Box::new(SingleFile {
        key: "devops",
        description: "CI pipeline metadata",
        path_var: "CI_DEVOPS_FILE",
        preset: presets::devops,
        executable: false,
    })
}
