//! Unified error handling for Crafter Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with categories and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Crafter Core operations.
#[derive(Debug, Error, Clone)]
pub enum CrafterError {
    /// Errors from the domain layer (validation failures).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CrafterError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Crafter".into(),
                "Please report it with the full command output".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::error::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::error::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::error::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CrafterResult<T> = Result<T, CrafterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_field_is_validation() {
        let err: CrafterError = DomainError::MissingRequiredField { field: "groupId" }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("groupId"));
    }

    #[test]
    fn root_not_found_is_not_found() {
        let err: CrafterError = ApplicationError::TemplateRootNotFound {
            root: "archetype".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn config_file_is_configuration() {
        let err: CrafterError = ApplicationError::ConfigFile {
            path: PathBuf::from("gen.properties"),
            cause: "not found".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn every_error_offers_suggestions() {
        let errors: Vec<CrafterError> = vec![
            DomainError::MissingRequiredField { field: "url" }.into(),
            ApplicationError::NoProjectDescriptor { descriptor: "pom.xml" }.into(),
            ApplicationError::ScaffoldIo {
                path: PathBuf::from("demo/pom.xml"),
                reason: "disk full".into(),
            }
            .into(),
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err}");
        }
    }
}
