//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate every artifact for this service".

pub mod generate_service;
pub mod merge_service;

pub use generate_service::{
    FileReport, GenerateRequest, GenerateService, GenerationMode, GenerationReport,
};
pub use merge_service::{FileOutcome, MergeService, MergedFile};
