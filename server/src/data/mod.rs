//! External collaborators
//!
//! - `billing` - Billing usage queries (AWS Cost Explorer)
//! - `reports` - Report persistence (S3 or local filesystem)

pub mod billing;
pub mod reports;

pub use billing::{BillingError, BillingSource, CostExplorerSource};
pub use reports::{ReportStore, ReportStoreError};
