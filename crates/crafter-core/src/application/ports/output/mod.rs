//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `crafter-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::FoundryInputs;
use crate::error::CrafterResult;

// ── Template root ─────────────────────────────────────────────────────────────

/// One entry of a template tree, path relative to the tree root and always
/// `/`-separated regardless of host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub relative_path: String,
    pub is_dir: bool,
}

impl TreeEntry {
    /// Final path segment (the file or directory name).
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

/// An enumerable, randomly-navigable template tree.
///
/// Implemented by:
/// - `crafter_adapters::resource_root::DirTree` (exploded directory)
/// - `crafter_adapters::resource_root::ArchiveTree` (mounted zip/jar)
/// - `crafter_adapters::resource_root::MemoryTree` (testing)
///
/// Callers never learn the origin; the walker only uses this interface.
pub trait TemplateTree {
    /// All entries in pre-order: every directory precedes its contents.
    fn entries(&self) -> CrafterResult<Vec<TreeEntry>>;

    /// Read the raw bytes of a file entry.
    fn read(&self, relative_path: &str) -> CrafterResult<Vec<u8>>;
}

/// Resolves the logical template root to a concrete tree handle.
///
/// For archive origins the returned handle owns the mounted archive; dropping
/// it closes the archive on every exit path, including errors raised
/// mid-walk.
pub trait TemplateSource {
    fn open(&self) -> CrafterResult<Box<dyn TemplateTree>>;
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Port for template rendering. Treated as a black box: the expression
/// language is the adapter's concern.
pub trait TemplateRenderer {
    /// Render template text against a key→value data model.
    fn render(&self, template: &str, data: &BTreeMap<String, String>) -> CrafterResult<String>;
}

// ── Output filesystem ─────────────────────────────────────────────────────────

/// Port for output-side filesystem operations.
///
/// Implemented by:
/// - `crafter_adapters::filesystem::LocalFilesystem` (production)
/// - `crafter_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> CrafterResult<()>;

    /// Write bytes to a file, overwriting any existing file.
    fn write_file(&self, path: &Path, contents: &[u8]) -> CrafterResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

// ── Interactive input ─────────────────────────────────────────────────────────

/// Detects whether the process is attached to an interactive terminal.
///
/// Injected rather than probed inline so tests can force either branch of
/// the resolution protocol deterministically.
pub trait InteractivityProbe {
    fn is_interactive(&self) -> bool;
}

/// Blocking line-oriented terminal input.
pub trait Prompter {
    /// Display `prompt` and read one trimmed line.
    fn read_line(&mut self, prompt: &str) -> CrafterResult<String>;
}

// ── Foundry collaborator ──────────────────────────────────────────────────────

/// The external database-schema-driven code generator.
///
/// The core hands it a resolved [`FoundryInputs`] and treats any failure as
/// fatal; everything else about it is out of scope.
#[cfg_attr(test, mockall::automock)]
pub trait FoundryEngine {
    fn generate(&self, inputs: &FoundryInputs) -> CrafterResult<()>;
}
