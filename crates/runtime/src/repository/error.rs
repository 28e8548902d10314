//! Error types raised by repository implementations.

use game_core::{DocumentError, ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid save slot name: {0:?}")]
    InvalidSlot(String),

    #[error("invalid save document: {0}")]
    InvalidDocument(#[from] DocumentError),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockPoisoned => ErrorSeverity::Internal,
            Self::InvalidSlot(_) => ErrorSeverity::Validation,
            Self::Io(_) | Self::Json(_) | Self::InvalidDocument(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::InvalidSlot(_) => "REPOSITORY_INVALID_SLOT",
            Self::InvalidDocument(_) => "REPOSITORY_INVALID_DOCUMENT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
