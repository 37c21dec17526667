use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("No participants: {0}")]
    NoParticipants(String),

    /// Carries the banned word that matched
    #[error("Message blocked: contains banned word \"{0}\"")]
    Blocked(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Discriminant of [`Error`] reported back to renderers alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    DuplicateEntry,
    NotFound,
    InvalidState,
    NoParticipants,
    Blocked,
    Serialization,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::DuplicateEntry => "duplicate_entry",
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::NoParticipants => "no_participants",
            Self::Blocked => "blocked",
            Self::Serialization => "serialization",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::DuplicateEntry(_) => ErrorKind::DuplicateEntry,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::NoParticipants(_) => ErrorKind::NoParticipants,
            Self::Blocked(_) => ErrorKind::Blocked,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Expected domain rejection, as opposed to an infrastructure failure
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Internal(_))
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for Error {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::Internal("Session actor is no longer running".to_string())
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for Error {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::Internal("Session actor dropped the reply".to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
