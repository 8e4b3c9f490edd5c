//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`, all money is `i64` minor units, all timestamps are
//! Unix millis.

pub mod analytics;
pub mod customer;
pub mod order;
pub mod product;
pub mod store;
pub mod workspace;

// Re-exports
pub use analytics::*;
pub use customer::*;
pub use order::*;
pub use product::*;
pub use store::*;
pub use workspace::*;
