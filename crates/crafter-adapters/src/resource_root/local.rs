//! Exploded-directory template tree using walkdir.

use std::path::{Path, PathBuf};

use crafter_core::{
    application::{
        ApplicationError,
        ports::{TemplateTree, TreeEntry},
    },
    error::CrafterResult,
};
use walkdir::WalkDir;

/// Template tree backed by a directory of loose files.
///
/// Entries come out in depth-first pre-order with siblings sorted by name,
/// so enumeration is deterministic across platforms and runs.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateTree for DirTree {
    fn entries(&self) -> CrafterResult<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::ScaffoldIo {
                path: self.root.clone(),
                reason: format!("failed to enumerate template tree: {e}"),
            })?;
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| ApplicationError::ScaffoldIo {
                    path: entry.path().to_path_buf(),
                    reason: format!("entry escapes template root: {e}"),
                })?;
            entries.push(TreeEntry {
                relative_path: to_slash(relative),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn read(&self, relative_path: &str) -> CrafterResult<Vec<u8>> {
        let path = self.root.join(relative_path);
        std::fs::read(&path).map_err(|e| {
            ApplicationError::ScaffoldIo {
                path,
                reason: format!("failed to read template file: {e}"),
            }
            .into()
        })
    }
}

/// Render a relative path `/`-separated regardless of host platform.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
