//! Analytics
//!
//! - [`aggregator`]: dashboard, rankings and breakdowns
//! - [`buckets`]: date range resolution and revenue bucketing

pub mod aggregator;
pub mod buckets;
pub mod error;

pub use aggregator::{Analytics, ReportQuery, RevenueQuery};
pub use error::{AnalyticsError, AnalyticsResult};

#[cfg(test)]
mod tests;
