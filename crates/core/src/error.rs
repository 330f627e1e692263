// Crate-wide error type.

use thiserror::Error;

/// Everything that can go wrong between intake and persistence.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] crate::domain::DomainError),

    #[error("Malformed record: {0}")]
    MalformedRecord(#[from] crate::domain::CodecError),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

// sqlx::Error never crosses this boundary; the sqlite adapters map it
// to Queue or Persistence before returning.
