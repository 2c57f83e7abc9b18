//! Application layer for Shipwright.
//!
//! This layer contains:
//! - **Variables**: the per-run cache, composer and presets
//! - **Generators**: artifact planners and their registry
//! - **Services**: Use case orchestration (GenerateService, MergeService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod generators;
pub mod ports;
pub mod services;
pub mod variables;

pub use generators::{Generator, GeneratorInfo, GeneratorRegistry};
pub use services::{
    FileOutcome, FileReport, GenerateRequest, GenerateService, GenerationMode, GenerationReport,
};
pub use variables::{VariableComposer, VariablePool};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
