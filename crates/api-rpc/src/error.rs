//! Mapping from application errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use orderflow_core::error::AppError;

/// Error codes on the wire. 4xxx rejects the request, 5xxx means
/// the daemon itself failed.
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const THROTTLED: i32 = 4003;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const QUEUE_ERROR: i32 = 5001;
    pub const STORE_ERROR: i32 = 5002;
}

/// Flatten an `AppError` into the JSON-RPC error object clients see.
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Validation(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::MalformedRecord(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Queue(msg) => ErrorObjectOwned::owned(code::QUEUE_ERROR, msg, None::<()>),
        AppError::Persistence(msg) => ErrorObjectOwned::owned(code::STORE_ERROR, msg, None::<()>),
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Internal(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

/// Throttle rejection shared by the rate-limited methods
pub fn throttled() -> ErrorObjectOwned {
    ErrorObjectOwned::owned(
        code::THROTTLED,
        "Rate limit exceeded. Please slow down.",
        None::<()>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::domain::DomainError;

    #[test]
    fn test_validation_maps_to_4000() {
        let err = to_rpc_error(AppError::Validation(DomainError::InvalidOrderId(-1)));
        assert_eq!(err.code(), code::VALIDATION_ERROR);
        assert!(err.message().contains("positive"));
    }

    #[test]
    fn test_queue_maps_to_5001() {
        let err = to_rpc_error(AppError::Queue("disk on fire".to_string()));
        assert_eq!(err.code(), code::QUEUE_ERROR);
    }

    #[test]
    fn test_persistence_maps_to_5002() {
        let err = to_rpc_error(AppError::Persistence("no rows".to_string()));
        assert_eq!(err.code(), code::STORE_ERROR);
    }

    #[test]
    fn test_internal_and_config_map_to_5000() {
        assert_eq!(
            to_rpc_error(AppError::Internal("boom".to_string())).code(),
            code::INTERNAL_ERROR
        );
        assert_eq!(
            to_rpc_error(AppError::Config("bad var".to_string())).code(),
            code::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_throttled_code() {
        assert_eq!(throttled().code(), code::THROTTLED);
    }
}
