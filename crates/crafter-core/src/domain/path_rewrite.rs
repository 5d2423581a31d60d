//! Pure rewriting of template-relative paths into output-relative paths.
//!
//! Two substitutions, applied in order:
//!
//! 1. every occurrence of [`TEMPLATE_PROJECT_TOKEN`] becomes the project name;
//! 2. the single path segment following the last [`SOURCE_ROOT_MARKER`]
//!    segment becomes the `/`-joined expansion of the base package.
//!
//! The template tree encodes exactly one default package level under the
//! source root; the real tree may have many, so only the first segment after
//! the marker is replaced and everything deeper is kept as-is.

use crate::domain::{SOURCE_ROOT_MARKER, ScaffoldConfig, TEMPLATE_PROJECT_TOKEN};

/// Map a `/`-separated template-relative path to its output-relative path.
///
/// No I/O, deterministic: equal inputs always yield equal outputs.
pub fn rewrite_path(relative: &str, config: &ScaffoldConfig) -> String {
    let renamed = relative.replace(TEMPLATE_PROJECT_TOKEN, &config.project_name);
    expand_package(&renamed, &config.base_package)
}

/// Replace the segment after the last source-root marker with the package
/// directory chain. A path with no marker, or one ending at the marker
/// itself, is returned unchanged.
fn expand_package(path: &str, base_package: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();

    let marker = segments
        .iter()
        .rposition(|s| *s == SOURCE_ROOT_MARKER)
        .filter(|i| i + 1 < segments.len());

    let Some(marker) = marker else {
        return path.to_string();
    };

    let package_path = base_package.replace('.', "/");
    let mut out: Vec<&str> = Vec::with_capacity(segments.len() + 2);
    out.extend(&segments[..=marker]);
    out.push(&package_path);
    out.extend(&segments[marker + 2..]);
    out.join("/")
}
