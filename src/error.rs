use thiserror::Error;

/// Failures surfaced to the caller. Storage decode problems never appear
/// here; the storage layer recovers them with the documented defaults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("username is already taken")]
    DuplicateUsername,
    /// Covers both bad credentials and a bad admin key, so a caller cannot
    /// tell a missing account apart from a wrong password.
    #[error("invalid credentials")]
    Authentication,
    #[error("unknown rule category")]
    UnknownCategory,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
