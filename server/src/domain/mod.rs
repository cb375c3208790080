//! Cost analysis domain
//!
//! - `period` - Trailing analysis window
//! - `recommendations` - Threshold-gated recommendation catalogue
//! - `report` - Report document and assembly
//! - `analysis` - The end-to-end pipeline over injected collaborators

pub mod analysis;
pub mod period;
pub mod recommendations;
pub mod report;

pub use analysis::{AnalysisError, AnalysisSummary, CostAnalyzer};
pub use period::AnalysisPeriod;
pub use recommendations::{Priority, Recommendation};
pub use report::Report;
