//! Billing data layer
//!
//! The analysis only depends on the [`BillingSource`] trait: given a date range
//! and a service name, return the time-bucketed costs for that service.
//!
//! - `cost_explorer` - AWS Cost Explorer implementation
//! - `error` - Error types for billing queries

pub mod cost_explorer;
pub mod error;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::period::AnalysisPeriod;

pub use cost_explorer::CostExplorerSource;
pub use error::BillingError;

/// Cost of one billing time bucket, in USD
#[derive(Debug, Clone, PartialEq)]
pub struct CostBucket {
    /// Bucket start date (`YYYY-MM-DD`)
    pub start: String,
    /// Bucket end date (`YYYY-MM-DD`, exclusive)
    pub end: String,
    pub amount: Decimal,
}

/// Source of billed usage
///
/// Implementations issue exactly one query per call and never retry.
#[async_trait]
pub trait BillingSource: Send + Sync {
    /// Unblended cost buckets for `service` over `period`.
    ///
    /// An empty vector means no billed usage, not an error.
    async fn cost_buckets(
        &self,
        period: &AnalysisPeriod,
        service: &str,
    ) -> Result<Vec<CostBucket>, BillingError>;
}

/// Sum bucket amounts into one total (zero for no buckets)
pub fn total_cost(buckets: &[CostBucket]) -> Decimal {
    buckets.iter().map(|b| b.amount).sum()
}
