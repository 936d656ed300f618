//! Application error types
//!
//! Errors raised below the service layer: token handling, password hashing,
//! configuration, and domain errors passing through. Status codes follow the
//! domain classification, so callers never need to special-case a variant.

use dreams_core::{DomainError, ErrorKind};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// The error's classification; token problems are access errors
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken | Self::TokenExpired => ErrorKind::Access,
            Self::Config(_) | Self::Internal(_) => ErrorKind::Internal,
            Self::Domain(e) => e.kind(),
        }
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Input => 400,
            ErrorKind::Access => 403,
            ErrorKind::Internal => 500,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Wrap any error as an internal failure
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
