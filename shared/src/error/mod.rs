//! Unified error system for the back office
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Workspace / plan errors
//! - 4xxx: Order errors
//! - 5xxx: Store errors
//! - 6xxx: Product errors
//! - 7xxx: Customer errors
//! - 8xxx: Analytics errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! // Create an error with details
//! let err = AppError::quota_exceeded(ErrorCode::OrderQuotaExceeded, 100);
//! assert_eq!(err.details.unwrap()["limit"], 100);
//!
//! // Convert to API response
//! let response = ApiResponse::<()>::error(&AppError::validation("bad input"));
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
