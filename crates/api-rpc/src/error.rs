//! RPC Error Types
//!
//! Maps application errors to stable JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use swipematch_core::domain::DomainError;
use swipematch_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const INVALID_TRANSITION: i32 = 4004;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DB_ERROR: i32 = 5001;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    let code = error_code(&err);
    ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
}

/// Error code for an application error
pub fn error_code(err: &AppError) -> i32 {
    match err {
        AppError::Domain(e) => match e {
            DomainError::DuplicateSwipe { .. } => code::CONFLICT,
            DomainError::InvalidStatus(_) => code::VALIDATION_ERROR,
            DomainError::MatchNotFound(_) => code::NOT_FOUND,
            DomainError::InvalidTransition { .. } => code::INVALID_TRANSITION,
        },
        AppError::Validation(_) | AppError::Serialization(_) => code::VALIDATION_ERROR,
        AppError::NotFound(_) => code::NOT_FOUND,
        AppError::Conflict(_) => code::CONFLICT,
        AppError::Database(_) => code::DB_ERROR,
        AppError::Config(_) | AppError::Internal(_) => code::INTERNAL_ERROR,
    }
}
