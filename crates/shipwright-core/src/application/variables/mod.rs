//! Variable composition: the per-run cache, the per-artifact composer and
//! the presets that tie them to artifact types.

pub mod composer;
pub mod pool;
pub mod presets;

pub use composer::VariableComposer;
pub use pool::VariablePool;
