//! Client-side error surface.

use jsonrpsee::core::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

/// What a client call can fail with.
///
/// `Rpc` carries the daemon's error code unmodified (4000 validation,
/// 4003 throttled, 5xxx server side), so callers can branch on it.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i32, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl SdkError {
    /// True when the daemon rejected the request as over the rate limit
    pub fn is_throttled(&self) -> bool {
        matches!(self, SdkError::Rpc { code: 4003, .. })
    }
}

impl From<ClientError> for SdkError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Call(call) => SdkError::Rpc {
                code: call.code(),
                message: call.message().to_string(),
            },
            ClientError::Transport(inner) => SdkError::Transport(inner.to_string()),
            ClientError::RestartNeeded(inner) => {
                SdkError::Connection(format!("Connection lost: {}", inner))
            }
            ClientError::ParseError(inner) => SdkError::Other(format!("Parse error: {}", inner)),
            other => SdkError::Other(other.to_string()),
        }
    }
}
