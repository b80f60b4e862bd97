use thiserror::Error;

use crate::{config::LoadError, domain::error::DomainError, infra::error::InfraError};

/// Top-level failure of a `penpost` invocation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    /// The view surfaced a user-facing message instead of navigating.
    #[error("{0}")]
    Rejected(String),
    #[error("delete cancelled")]
    Cancelled,
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit status: 1 for outcomes the user caused or saw, 2 for setup
    /// failures before any request was made.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Rejected(_) | AppError::Cancelled => 1,
            AppError::Config(_) | AppError::Domain(_) | AppError::Infra(_) => 2,
            AppError::Unexpected(_) => 70,
        }
    }
}
