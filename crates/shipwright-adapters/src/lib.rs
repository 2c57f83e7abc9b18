//! Infrastructure adapters for Shipwright.
//!
//! This crate implements the ports defined in
//! `shipwright_core::application::ports`. It holds every external
//! dependency and all I/O.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::TeraRenderer;
pub use template_loader::TemplateDirLoader;
pub use template_store::InMemoryStore;
