//! Domain-level errors: violations detectable before any filesystem mutation.

use thiserror::Error;

/// Root domain error type.
///
/// All errors are cloneable and categorizable for CLI display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field required by the current phase is absent or blank.
    #[error("required field '{field}' is not configured")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide '{field}' on the command line or in the config file"),
                "Run from an interactive terminal to be prompted for missing values".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
