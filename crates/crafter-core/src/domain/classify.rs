//! Template-entry classification.
//!
//! The decision is filename/suffix driven and deliberately centralized here:
//! a new marker or suffix convention is a one-line change.

use crate::application::ports::TreeEntry;
use crate::domain::{SKIP_MARKER, TEMPLATE_SUFFIX};

/// What the walker should do with one template-tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Create the corresponding output directory.
    Directory,
    /// Produce no output (placeholder keeping an empty directory alive).
    SkipMarker,
    /// Render against the data model, stripping the template suffix.
    Template,
    /// Copy bytes verbatim.
    Plain,
}

/// Classify a single entry of the template tree.
pub fn classify(entry: &TreeEntry) -> EntryKind {
    if entry.is_dir {
        return EntryKind::Directory;
    }
    match entry.file_name() {
        name if name == SKIP_MARKER => EntryKind::SkipMarker,
        name if name.ends_with(TEMPLATE_SUFFIX) => EntryKind::Template,
        _ => EntryKind::Plain,
    }
}
