// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Shipwright.
//!
//! Pure logic only: deriving variables from a service description and
//! merging generated regions into file contents. All I/O, templating and
//! caching concerns live in the application layer behind ports.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Tracing starts at the application layer
//! - **Immutable outputs**: Category variable sets are never mutated after build
//!
pub mod categories;
pub mod commands;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use categories::build_category;
pub use commands::{CommandKind, CommandPipeline, derive_command};
pub use entities::{
    artifact::{ArtifactPlan, GenerationPlan},
    common::{Permissions, RelativePath},
    region::{END_MARKER, GeneratedRegion, RegionMarkers, START_MARKER, merge_region},
    service_config::{
        BuildCommands, BuildSection, CiSection, ImagePair, LanguageSection, NetworkSection,
        PluginSpec, RuntimeSection, ServiceConfig, ServiceSection,
    },
    variables::{ArchitectureVariant, SharedVariableSet, Value, VariableMap},
};
pub use error::{DomainError, ErrorCategory, RegionError};
pub use value_objects::{Architecture, Category, CommentStyle, LanguageKind};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module behaviour
    // ========================================================================

    #[test]
    fn go_service_build_command_flows_into_build_category() {
        let mut config = ServiceConfig::named("test-service");
        config.language.kind = "go".into();
        config.build.commands.build = Some("go build -o app".into());

        let vars = build_category(Category::Build, &config);
        assert_eq!(vars["BUILD_COMMAND"], Value::from("go build -o app"));

        let lang = build_category(Category::Language, &config);
        assert_eq!(lang["LANGUAGE"], Value::from("go"));
        assert_eq!(lang["DEPS_INSTALL_COMMAND"], Value::from("go mod download"));
    }

    #[test]
    fn region_errors_surface_as_domain_errors() {
        let file = format!("# {START_MARKER}\nbody\n");
        let err: DomainError = merge_region(Some(&file), "x", CommentStyle::Hash)
            .unwrap_err()
            .into();
        assert!(matches!(err, DomainError::MalformedRegion(_)));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn category_builders_are_deterministic() {
        let mut config = ServiceConfig::named("svc");
        config.network.ports = vec![80];
        for category in Category::ALL {
            assert_eq!(
                build_category(category, &config),
                build_category(category, &config)
            );
        }
    }
}
