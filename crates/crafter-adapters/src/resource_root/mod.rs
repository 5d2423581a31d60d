//! Template root resolution.
//!
//! The logical template root is resolved once at startup into a
//! [`TemplateOrigin`], a closed variant over the two supported physical
//! layouts: an exploded directory, or an entry tree inside a packaged
//! `.zip`/`.jar` archive. New origins extend the variant; the walker never
//! learns which one it got.

use std::path::{Path, PathBuf};

use crafter_core::{
    application::{
        ApplicationError,
        ports::{TemplateSource, TemplateTree},
    },
    error::CrafterResult,
};
use tracing::debug;

pub mod archive;
pub mod local;
pub mod memory;

pub use archive::ArchiveTree;
pub use local::DirTree;
pub use memory::MemoryTree;

/// Resolved physical origin of the template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Exploded directory of loose template files.
    Filesystem(PathBuf),
    /// Packaged archive holding the template tree under its internal
    /// `archetype/` prefix.
    Archive(PathBuf),
}

impl TemplateOrigin {
    /// Classify `path` by inspection.
    ///
    /// A missing path is `TemplateRootNotFound`; a directory is
    /// `Filesystem`; a regular file with a `.zip` or `.jar` extension
    /// (case-insensitive) is `Archive`; anything else is fatal.
    pub fn detect(path: &Path) -> CrafterResult<Self> {
        if !path.exists() {
            return Err(ApplicationError::TemplateRootNotFound {
                root: path.display().to_string(),
            }
            .into());
        }

        if path.is_dir() {
            debug!(root = %path.display(), "Template root is an exploded directory");
            return Ok(Self::Filesystem(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("zip" | "jar") => {
                debug!(root = %path.display(), "Template root is a packaged archive");
                Ok(Self::Archive(path.to_path_buf()))
            }
            _ => Err(ApplicationError::UnsupportedOrigin {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}

impl TemplateSource for TemplateOrigin {
    /// Open a tree handle. For archives the zip stays open only as long as
    /// the returned handle lives; dropping it closes the archive.
    fn open(&self) -> CrafterResult<Box<dyn TemplateTree>> {
        match self {
            Self::Filesystem(dir) => Ok(Box::new(DirTree::new(dir))),
            Self::Archive(file) => Ok(Box::new(ArchiveTree::mount(file)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crafter_core::error::CrafterError;

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateOrigin::detect(&dir.path().join("absent"));
        assert!(matches!(
            result,
            Err(CrafterError::Application(
                ApplicationError::TemplateRootNotFound { .. }
            ))
        ));
    }

    #[test]
    fn directory_is_filesystem_origin() {
        let dir = tempfile::tempdir().unwrap();
        let origin = TemplateOrigin::detect(dir.path()).unwrap();
        assert_eq!(origin, TemplateOrigin::Filesystem(dir.path().to_path_buf()));
    }

    #[test]
    fn zip_and_jar_files_are_archive_origins() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["templates.zip", "templates.JAR"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"").unwrap();
            let origin = TemplateOrigin::detect(&path).unwrap();
            assert_eq!(origin, TemplateOrigin::Archive(path));
        }
    }

    #[test]
    fn other_files_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.tar.gz");
        std::fs::write(&path, b"").unwrap();
        let result = TemplateOrigin::detect(&path);
        assert!(matches!(
            result,
            Err(CrafterError::Application(
                ApplicationError::UnsupportedOrigin { .. }
            ))
        ));
    }
}
