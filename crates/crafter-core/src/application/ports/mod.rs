//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world; the
//! `crafter-adapters` crate implements them.
//!
//! - `TemplateSource` / `TemplateTree`: resolve and walk the template root
//! - `TemplateRenderer`: render parametrized files (black box)
//! - `Filesystem`: output-side writes
//! - `InteractivityProbe` / `Prompter`: terminal detection and input
//! - `FoundryEngine`: the external schema-driven code generator

pub mod output;

pub use output::{
    Filesystem, FoundryEngine, InteractivityProbe, Prompter, TemplateRenderer, TemplateSource,
    TemplateTree, TreeEntry,
};

#[cfg(test)]
pub use output::MockFoundryEngine;
