pub mod artifact;
pub mod common;
pub mod region;
pub mod service_config;
pub mod variables;

pub use crate::domain::DomainError;
pub use artifact::{ArtifactPlan, GenerationPlan};
pub use region::{GeneratedRegion, RegionMarkers, merge_region};
pub use service_config::ServiceConfig;
pub use variables::{ArchitectureVariant, SharedVariableSet, Value, VariableMap};
