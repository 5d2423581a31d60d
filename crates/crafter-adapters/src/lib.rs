//! Infrastructure adapters for Crafter.
//!
//! This crate implements the ports defined in `crafter-core::application::ports`.
//! It contains all external dependencies and I/O operations: template root
//! resolution (exploded directory or packaged archive), output filesystem,
//! template rendering, terminal input, and the foundry subprocess bridge.

pub mod console;
pub mod filesystem;
pub mod foundry;
pub mod renderer;
pub mod resource_root;

// Re-export commonly used adapters
pub use console::{ScriptedPrompter, StdinProbe, TtyPrompter};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use foundry::ForgeCommand;
pub use renderer::SimpleRenderer;
pub use resource_root::{ArchiveTree, DirTree, MemoryTree, TemplateOrigin};
