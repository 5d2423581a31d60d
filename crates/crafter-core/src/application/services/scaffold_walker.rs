//! Scaffold walker - materializes a template tree on disk.
//!
//! Single pre-order pass over a [`TemplateTree`]: directories are created,
//! skip markers produce nothing, templates are rendered with the suffix
//! stripped, everything else is copied byte-for-byte. Existing files are
//! overwritten; re-running the walk is deterministic for the same config.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateTree, TreeEntry},
    },
    domain::{EntryKind, ScaffoldConfig, TEMPLATE_SUFFIX, classify, rewrite_path},
    error::CrafterResult,
};

/// Walks a resolved template tree and emits the output project tree.
pub struct ScaffoldWalker {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldWalker {
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Materialize `tree` under `output_root`.
    ///
    /// Any I/O failure aborts immediately; partial output is left in place
    /// (the run targets a fresh, disposable directory). Writes never leave
    /// `output_root`.
    #[instrument(skip_all, fields(output_root = %output_root.display()))]
    pub fn walk(
        &self,
        tree: &dyn TemplateTree,
        config: &ScaffoldConfig,
        output_root: &Path,
    ) -> CrafterResult<()> {
        let data = config.to_data();

        self.filesystem.create_dir_all(output_root)?;

        let entries = tree.entries()?;
        info!(entries = entries.len(), "Walking template tree");

        for entry in &entries {
            match classify(entry) {
                EntryKind::Directory => {
                    let target = output_root.join(rewrite_path(&entry.relative_path, config));
                    self.filesystem.create_dir_all(&target)?;
                }
                EntryKind::SkipMarker => {
                    debug!(path = %entry.relative_path, "Skip marker, no output");
                }
                EntryKind::Template => {
                    self.render_template(tree, entry, config, &data, output_root)?;
                }
                EntryKind::Plain => {
                    let target = output_root.join(rewrite_path(&entry.relative_path, config));
                    let bytes = tree.read(&entry.relative_path)?;
                    self.write(&target, &bytes)?;
                }
            }
        }

        info!("Template tree walk completed");
        Ok(())
    }

    fn render_template(
        &self,
        tree: &dyn TemplateTree,
        entry: &TreeEntry,
        config: &ScaffoldConfig,
        data: &std::collections::BTreeMap<String, String>,
        output_root: &Path,
    ) -> CrafterResult<()> {
        let rewritten = rewrite_path(&entry.relative_path, config);
        let target = output_root.join(strip_template_suffix(&rewritten));

        let bytes = tree.read(&entry.relative_path)?;
        let text = String::from_utf8(bytes).map_err(|e| ApplicationError::RenderingFailed {
            template: entry.relative_path.clone(),
            reason: format!("template is not valid UTF-8: {e}"),
        })?;

        let rendered = self.renderer.render(&text, data)?;
        debug!(source = %entry.relative_path, target = %target.display(), "Rendered template");
        self.write(&target, rendered.as_bytes())
    }

    /// Write a file, creating its parent first. The package expansion can
    /// make a file's directory chain deeper than any directory entry seen so
    /// far, so parent creation is not left to the pre-order guarantee alone.
    fn write(&self, target: &Path, bytes: &[u8]) -> CrafterResult<()> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(target, bytes)
    }
}

/// Remove the template suffix from the final path segment only.
fn strip_template_suffix(path: &str) -> PathBuf {
    PathBuf::from(path.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(path))
}
