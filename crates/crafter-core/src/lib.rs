//! Crafter Core - template-driven project bootstrap.
//!
//! This crate provides the domain and application layers for the Crafter
//! build-bootstrap tool, following a ports and adapters layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           crafter-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (BootstrapOrchestrator, ScaffoldWalker,│
//! │   ConfigResolver)                       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  (TemplateSource, TemplateTree,         │
//! │   TemplateRenderer, Filesystem,         │
//! │   Prompter, FoundryEngine)              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     crafter-adapters (Infrastructure)   │
//! │  (DirTree, ArchiveTree, LocalFilesystem,│
//! │   SimpleRenderer, TtyPrompter, ...)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The domain layer (path rewriting, entry classification, config data
//! model) is pure and has no I/O; everything that touches a terminal, an
//! archive, or the filesystem goes through a port.

// Domain layer (pure logic: config model, path rewriting, classification)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Unified error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BootstrapOrchestrator, BootstrapRequest, ConfigResolver, ExecutionPlan, Phase,
        ScaffoldWalker,
        ports::{
            Filesystem, FoundryEngine, InteractivityProbe, Prompter, TemplateRenderer,
            TemplateSource, TemplateTree, TreeEntry,
        },
    };
    pub use crate::domain::{
        FoundryInputs, FoundryOverrides, ScaffoldConfig, SkeletonOverrides,
    };
    pub use crate::error::{CrafterError, CrafterResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
