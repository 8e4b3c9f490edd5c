//! Order Lifecycle
//!
//! - [`manager`]: atomic creation, status updates, delete, stats
//! - [`number`]: `ORD-YYMMDD-NNNN` generation backed by a per-day counter
//! - [`pricing`]: line and order totals in minor units

pub mod error;
pub mod manager;
pub mod number;
pub mod pricing;

pub use error::{OrderError, OrderResult};
pub use manager::{OrderListQuery, OrderManager};
