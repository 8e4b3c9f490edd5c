//! Shared types for the commerce back office
//!
//! Wire types used by the server and its clients: the unified error system,
//! the `ApiResponse` envelope, domain models, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
