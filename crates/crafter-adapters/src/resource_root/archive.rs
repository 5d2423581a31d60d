//! Archive-mounted template tree using the zip crate.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crafter_core::{
    application::{
        ApplicationError,
        ports::{TemplateTree, TreeEntry},
    },
    domain::ARCHETYPE_ROOT,
    error::CrafterResult,
};
use tracing::debug;
use zip::ZipArchive;

/// Template tree mounted from a `.zip`/`.jar` archive.
///
/// The template tree lives under the archive's internal `archetype/` prefix,
/// the packaged analogue of the exploded directory. The entry listing is
/// indexed once at mount time; dropping the tree closes the archive.
///
/// Archives produced by some tools omit explicit directory entries, so
/// every ancestor of a listed file is synthesized into the index. Sorted
/// entry paths put each directory before its contents, which preserves the
/// pre-order contract.
pub struct ArchiveTree {
    archive: RefCell<ZipArchive<File>>,
    entries: Vec<TreeEntry>,
}

impl ArchiveTree {
    /// Open `path` and index the entries under the internal prefix.
    ///
    /// An archive with no entries under the prefix is `TemplateRootNotFound`.
    pub fn mount(path: &Path) -> CrafterResult<Self> {
        let file = File::open(path).map_err(|e| ApplicationError::ScaffoldIo {
            path: path.to_path_buf(),
            reason: format!("failed to open archive: {e}"),
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| ApplicationError::ScaffoldIo {
            path: path.to_path_buf(),
            reason: format!("failed to read archive: {e}"),
        })?;

        let prefix = format!("{ARCHETYPE_ROOT}/");
        let mut index: BTreeMap<String, bool> = BTreeMap::new();
        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(|e| ApplicationError::ScaffoldIo {
                path: path.to_path_buf(),
                reason: format!("failed to read archive entry: {e}"),
            })?;
            let Some(stripped) = entry.name().strip_prefix(&prefix) else {
                continue;
            };
            let stripped = stripped.trim_end_matches('/');
            if stripped.is_empty() {
                continue;
            }
            for (pos, _) in stripped.match_indices('/') {
                index.entry(stripped[..pos].to_string()).or_insert(true);
            }
            index.insert(stripped.to_string(), entry.is_dir());
        }

        if index.is_empty() {
            return Err(ApplicationError::TemplateRootNotFound {
                root: format!("{}!/{ARCHETYPE_ROOT}", path.display()),
            }
            .into());
        }

        debug!(archive = %path.display(), entries = index.len(), "Mounted template archive");
        let entries = index
            .into_iter()
            .map(|(relative_path, is_dir)| TreeEntry {
                relative_path,
                is_dir,
            })
            .collect();

        Ok(Self {
            archive: RefCell::new(archive),
            entries,
        })
    }
}

impl TemplateTree for ArchiveTree {
    fn entries(&self) -> CrafterResult<Vec<TreeEntry>> {
        Ok(self.entries.clone())
    }

    fn read(&self, relative_path: &str) -> CrafterResult<Vec<u8>> {
        let name = format!("{ARCHETYPE_ROOT}/{relative_path}");
        let mut archive = self.archive.borrow_mut();
        let mut entry = archive.by_name(&name).map_err(|e| ApplicationError::ScaffoldIo {
            path: PathBuf::from(&name),
            reason: format!("archive entry not readable: {e}"),
        })?;
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buf)
            .map_err(|e| ApplicationError::ScaffoldIo {
                path: PathBuf::from(&name),
                reason: format!("failed to read archive entry: {e}"),
            })?;
        Ok(buf)
    }
}
