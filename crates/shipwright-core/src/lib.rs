//! Shipwright Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Shipwright
//! deployment-artifact generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         shipwright-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  GenerateService → Generators/Presets   │
//! │  → VariablePool/Composer → MergeService │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Filesystem, TemplateStore, Render)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    shipwright-adapters (Infrastructure) │
//! │ (LocalFilesystem, TeraRenderer, ...)    │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (categories, commands, region merge)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shipwright_core::prelude::*;
//!
//! let service = GenerateService::new(
//!     GeneratorRegistry::builtin()?,
//!     store,      // impl TemplateStore
//!     renderer,   // impl TemplateRenderer
//!     filesystem, // impl Filesystem
//! );
//! let report = service.generate(config, &GenerateRequest::new("."))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileOutcome, FileReport, GenerateRequest, GenerateService, GenerationMode,
        GenerationReport, GeneratorInfo, GeneratorRegistry, VariableComposer, VariablePool,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        Architecture, Category, CommentStyle, ServiceConfig, Value, VariableMap,
    };
    pub use crate::error::{ShipwrightError, ShipwrightResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
