//! Domain layer: configuration model, fixed template conventions, and the
//! pure path/classification logic the walker is built on.

pub mod classify;
pub mod error;
pub mod path_rewrite;
pub mod properties;

pub use classify::{EntryKind, classify};
pub use error::DomainError;
pub use path_rewrite::rewrite_path;
pub use properties::{parse_bool_token, parse_properties};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Template tree conventions ─────────────────────────────────────────────────

/// Literal project-name token baked into the template tree. Every occurrence
/// in a template-relative path is replaced with the real project name.
pub const TEMPLATE_PROJECT_TOKEN: &str = "crafter-example";

/// Suffix marking a file as a parametrized template. Stripped from the
/// output file name after rendering.
pub const TEMPLATE_SUFFIX: &str = ".ftl";

/// Marker file that keeps otherwise-empty directories present in the
/// template tree. Never copied to the output.
pub const SKIP_MARKER: &str = ".keep";

/// Path segment denoting the language source root. The single segment that
/// follows it in a template path is expanded into the full base-package
/// directory chain.
pub const SOURCE_ROOT_MARKER: &str = "java";

/// Logical identifier of the template root, both as an exploded directory
/// name and as the entry prefix inside a packaged archive.
pub const ARCHETYPE_ROOT: &str = "archetype";

/// Project descriptor that must exist in the working directory before a
/// foundry-only run may proceed.
pub const PROJECT_DESCRIPTOR: &str = "pom.xml";

/// Default project version used when none is supplied.
pub const DEFAULT_VERSION: &str = "1.0.0";

// ── Skeleton configuration ────────────────────────────────────────────────────

/// Validated configuration for one skeleton-generation run.
///
/// Constructed exclusively by `ConfigResolver`; by the time a value of this
/// type exists, every required field is non-blank. It is read-only for the
/// duration of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Organization identifier, free-form (e.g. reverse-DNS).
    pub group_id: String,
    /// Output project root directory name and path-token substitution target.
    pub project_name: String,
    /// Semantic version string.
    pub version: String,
    /// Dotted namespace (e.g. `a.b.c`), drives source-root expansion.
    pub base_package: String,
    /// Free-form description, may be empty.
    pub description: String,
}

impl ScaffoldConfig {
    /// Data model handed to the template renderer. Key names match what the
    /// template tree expects.
    pub fn to_data(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("groupId".into(), self.group_id.clone()),
            ("projectName".into(), self.project_name.clone()),
            ("version".into(), self.version.clone()),
            ("description".into(), self.description.clone()),
            ("package".into(), self.base_package.clone()),
        ])
    }
}

// ── Foundry configuration ─────────────────────────────────────────────────────

/// Resolved inputs handed opaquely to the external foundry collaborator.
///
/// The core never interprets `tables` beyond requiring it non-blank; the
/// comma-delimited list is the collaborator's to split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundryInputs {
    /// Name of the project the generated sources belong to.
    pub project_name: String,
    /// True when generating into a pre-existing project (foundry-only run).
    pub step_in: bool,
    pub base_package: String,
    pub url: String,
    pub driver: String,
    pub username: String,
    /// Some data sources require no password.
    pub password: Option<String>,
    /// Comma-delimited table selector, opaque to the core.
    pub tables: String,
    pub overwrite: bool,
}

impl FoundryInputs {
    /// Attach the project identity decided by the orchestrator.
    pub fn for_project(mut self, name: impl Into<String>, step_in: bool) -> Self {
        self.project_name = name.into();
        self.step_in = step_in;
        self
    }
}

// ── Explicit overrides (highest-precedence config tier) ───────────────────────

/// Returns `None` for absent or whitespace-only values; blank-after-trim is
/// treated identically to absent in every resolution path.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Explicitly supplied skeleton fields (CLI flags or programmatic input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkeletonOverrides {
    pub group_id: Option<String>,
    pub project_name: Option<String>,
    pub version: Option<String>,
    pub base_package: Option<String>,
    pub description: Option<String>,
}

impl SkeletonOverrides {
    /// Collapse blank values to `None`.
    pub fn normalized(self) -> Self {
        Self {
            group_id: normalize(self.group_id),
            project_name: normalize(self.project_name),
            version: normalize(self.version),
            base_package: normalize(self.base_package),
            description: normalize(self.description),
        }
    }

    /// True when every field, optional ones included, is already present.
    pub fn is_complete(&self) -> bool {
        self.group_id.is_some()
            && self.project_name.is_some()
            && self.version.is_some()
            && self.base_package.is_some()
            && self.description.is_some()
    }
}

/// Explicitly supplied foundry fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundryOverrides {
    pub base_package: Option<String>,
    pub url: Option<String>,
    pub driver: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tables: Option<String>,
    pub overwrite: Option<bool>,
}

impl FoundryOverrides {
    /// Collapse blank values to `None`.
    pub fn normalized(self) -> Self {
        Self {
            base_package: normalize(self.base_package),
            url: normalize(self.url),
            driver: normalize(self.driver),
            username: normalize(self.username),
            password: normalize(self.password),
            tables: normalize(self.tables),
            overwrite: self.overwrite,
        }
    }

    /// True when every field, password and overwrite included, is present.
    pub fn is_complete(&self) -> bool {
        self.base_package.is_some()
            && self.url.is_some()
            && self.driver.is_some()
            && self.username.is_some()
            && self.password.is_some()
            && self.tables.is_some()
            && self.overwrite.is_some()
    }
}
