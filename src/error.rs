use thiserror::Error;

use crate::core::Session;

/// Coarse classification used when deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    AlreadyClosed,
    Io,
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Session {id} not found")]
    NotFound { id: i64 },

    #[error("An active session already exists: [{}] - {}", .active.project, .active.task)]
    Conflict { active: Box<Session> },

    #[error("Session {id} is already stopped")]
    AlreadyClosed { id: i64 },

    #[error("Invalid date \"{input}\" (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Corrupt timestamp \"{raw}\" in session {id}")]
    CorruptTimestamp { id: i64, raw: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl AppError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::InvalidDate { .. } | AppError::InvalidTimezone { .. } => {
                ErrorKind::Validation
            }
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Conflict { .. } => ErrorKind::Conflict,
            AppError::AlreadyClosed { .. } => ErrorKind::AlreadyClosed,
            AppError::CorruptTimestamp { .. }
            | AppError::Database(_)
            | AppError::Io(_)
            | AppError::Prompt(_) => ErrorKind::Io,
        }
    }
}
