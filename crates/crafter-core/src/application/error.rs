//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The template root identifier resolved to nothing.
    #[error("template root not found: {root}")]
    TemplateRootNotFound { root: String },

    /// The template root resolved to something that is neither an exploded
    /// directory nor a supported archive. Fatal, never retried.
    #[error("unsupported template origin: {path}")]
    UnsupportedOrigin { path: PathBuf },

    /// An I/O operation failed during the scaffold walk. Partial output may
    /// be left on disk; the run targets a disposable directory.
    #[error("scaffold I/O error at {path}: {reason}")]
    ScaffoldIo { path: PathBuf, reason: String },

    /// A configured config-file path was missing, unreadable, or not a
    /// regular file.
    #[error("config file error at {path}: {cause}")]
    ConfigFile { path: PathBuf, cause: String },

    /// Foundry-only execution requires a project descriptor in the working
    /// directory.
    #[error("no project descriptor ({descriptor}) found in the current directory")]
    NoProjectDescriptor { descriptor: &'static str },

    /// Template rendering failed.
    #[error("template rendering failed for {template}: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Reading interactive input failed (terminal closed mid-prompt).
    #[error("prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The foundry phase was requested but no engine is wired into this
    /// build.
    #[error("foundry engine is not available")]
    FoundryUnavailable,

    /// The external foundry collaborator reported a failure.
    #[error("foundry generation failed: {reason}")]
    FoundryFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateRootNotFound { root } => vec![
                format!("No template tree found at: {root}"),
                "Point --template-root at an exploded archetype directory or a packaged .zip"
                    .into(),
            ],
            Self::UnsupportedOrigin { path } => vec![
                format!("Cannot read templates from: {}", path.display()),
                "Supported origins are a directory or a .zip/.jar archive".into(),
            ],
            Self::ScaffoldIo { path, .. } => vec![
                format!("Failed while writing: {}", path.display()),
                "Check write permissions and available disk space".into(),
                "The partially generated directory can be deleted and the run retried".into(),
            ],
            Self::ConfigFile { path, .. } => vec![
                format!("Could not load: {}", path.display()),
                "The config file must be a readable key=value properties file".into(),
            ],
            Self::NoProjectDescriptor { descriptor } => vec![
                format!("Run from a project root containing {descriptor}"),
                "Or run the full bootstrap (no phase argument) to generate the skeleton first"
                    .into(),
            ],
            Self::FoundryUnavailable => vec![
                "Install the foundry collaborator and ensure it is on your PATH".into(),
            ],
            Self::FoundryFailed { reason } => vec![
                format!("Foundry reported: {reason}"),
                "Check the database connection settings and table names".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateRootNotFound { .. } => ErrorCategory::NotFound,
            Self::NoProjectDescriptor { .. } => ErrorCategory::Validation,
            Self::ConfigFile { .. } | Self::FoundryUnavailable => ErrorCategory::Configuration,
            Self::UnsupportedOrigin { .. }
            | Self::ScaffoldIo { .. }
            | Self::RenderingFailed { .. }
            | Self::PromptFailed { .. }
            | Self::FoundryFailed { .. } => ErrorCategory::Internal,
        }
    }
}
