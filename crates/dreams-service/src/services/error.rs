//! Service layer error types

use dreams_common::AppError;
use dreams_core::{DomainError, ErrorKind};

/// Error returned by every service operation
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation (input or access)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Token or password handling failure
    #[error(transparent)]
    App(#[from] AppError),

    /// Context wiring problem
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::App(e) => e.kind(),
            Self::Validation(_) => ErrorKind::Input,
        }
    }

    /// HTTP status code, derived from the error's classification
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Input => 400,
            ErrorKind::Access => 403,
            ErrorKind::Internal => 500,
        }
    }

    /// Machine-readable code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
