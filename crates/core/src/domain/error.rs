// Validation failures raised by order construction.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Order id must be a positive integer, got {0}")]
    InvalidOrderId(i64),

    #[error("Order item must be a non-empty string")]
    EmptyItem,
}

pub type Result<T> = std::result::Result<T, DomainError>;
