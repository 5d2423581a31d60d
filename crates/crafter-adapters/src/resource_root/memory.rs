//! In-memory template tree for testing.

use std::collections::BTreeMap;

use crafter_core::{
    application::{
        ApplicationError,
        ports::{TemplateSource, TemplateTree, TreeEntry},
    },
    error::CrafterResult,
};

/// In-memory template tree for tests.
///
/// Entries are emitted in insertion order, so tests control the walk order
/// directly. Callers are responsible for listing directories before their
/// contents, as the real trees do.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    entries: Vec<TreeEntry>,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory entry (builder style).
    pub fn add_dir(mut self, path: &str) -> Self {
        self.entries.push(TreeEntry {
            relative_path: path.to_string(),
            is_dir: true,
        });
        self
    }

    /// Add a file entry with contents (builder style).
    pub fn add_file(mut self, path: &str, contents: &[u8]) -> Self {
        self.entries.push(TreeEntry {
            relative_path: path.to_string(),
            is_dir: false,
        });
        self.files.insert(path.to_string(), contents.to_vec());
        self
    }
}

impl TemplateTree for MemoryTree {
    fn entries(&self) -> CrafterResult<Vec<TreeEntry>> {
        Ok(self.entries.clone())
    }

    fn read(&self, relative_path: &str) -> CrafterResult<Vec<u8>> {
        self.files.get(relative_path).cloned().ok_or_else(|| {
            ApplicationError::ScaffoldIo {
                path: relative_path.into(),
                reason: "no such entry in memory tree".into(),
            }
            .into()
        })
    }
}

impl TemplateSource for MemoryTree {
    fn open(&self) -> CrafterResult<Box<dyn TemplateTree>> {
        Ok(Box::new(self.clone()))
    }
}
