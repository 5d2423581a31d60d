//! Application layer for Crafter.
//!
//! This layer contains:
//! - **Services**: use case orchestration (BootstrapOrchestrator,
//!   ScaffoldWalker, ConfigResolver)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BootstrapOrchestrator, BootstrapRequest, ConfigResolver, ExecutionPlan, Phase, ScaffoldWalker,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Filesystem, FoundryEngine, InteractivityProbe, Prompter, TemplateRenderer, TemplateSource,
    TemplateTree, TreeEntry,
};

pub use error::ApplicationError;
