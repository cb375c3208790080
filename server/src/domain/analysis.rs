//! Cost analysis pipeline
//!
//! One linear pass per invocation: fetch cost → generate recommendations →
//! assemble report → publish. Collaborators are injected so each stage can be
//! substituted in tests. Nothing is retried, and the report is only written
//! once the billing query has succeeded.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::constants::BILLING_SERVICE_FILTER;
use crate::data::billing::{self, BillingError, BillingSource};
use crate::data::reports::{self, ReportStore, ReportStoreError};

use super::period::AnalysisPeriod;
use super::recommendations::generate;
use super::report::Report;

/// Failure of one analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Billing provider call failed
    #[error(transparent)]
    UpstreamQuery(#[from] BillingError),

    /// Report could not be written
    #[error(transparent)]
    Persistence(#[from] ReportStoreError),
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub total_cost: Decimal,
    pub potential_savings: Decimal,
    pub savings_percentage: Decimal,
    pub report_location: String,
    pub recommendations_count: usize,
}

impl AnalysisSummary {
    fn from_report(report: &Report, report_location: String) -> Self {
        Self {
            total_cost: report.costs.total_monthly_usd,
            potential_savings: report.optimization.potential_monthly_savings,
            savings_percentage: report.optimization.savings_percentage,
            report_location,
            recommendations_count: report.summary.total_recommendations,
        }
    }
}

pub struct CostAnalyzer {
    billing: Arc<dyn BillingSource>,
    store: Arc<dyn ReportStore>,
    project_label: String,
}

impl CostAnalyzer {
    pub fn new(
        billing: Arc<dyn BillingSource>,
        store: Arc<dyn ReportStore>,
        project_label: impl Into<String>,
    ) -> Self {
        Self {
            billing,
            store,
            project_label: project_label.into(),
        }
    }

    /// Run one analysis as of `now`
    pub async fn run(&self, now: DateTime<Utc>) -> Result<AnalysisSummary, AnalysisError> {
        let period = AnalysisPeriod::ending(now.date_naive());
        tracing::info!(period = %period, days = period.days(), "Analyzing period");

        let total_cost = self.fetch_total_cost(&period).await?;
        tracing::info!(total_cost = %total_cost.round_dp(2), "Total ML platform cost");

        let report = build_report(total_cost, period, &self.project_label, now);
        let location = reports::publish(self.store.as_ref(), &report, now).await?;

        Ok(AnalysisSummary::from_report(&report, location))
    }

    async fn fetch_total_cost(&self, period: &AnalysisPeriod) -> Result<Decimal, BillingError> {
        let buckets = self
            .billing
            .cost_buckets(period, BILLING_SERVICE_FILTER)
            .await?;
        for bucket in &buckets {
            tracing::debug!(
                start = %bucket.start,
                end = %bucket.end,
                amount = %bucket.amount,
                "Billing bucket"
            );
        }
        Ok(billing::total_cost(&buckets))
    }
}

/// Generate recommendations for `total_cost` and assemble the report
pub fn build_report(
    total_cost: Decimal,
    period: AnalysisPeriod,
    project_label: &str,
    now: DateTime<Utc>,
) -> Report {
    Report::assemble(total_cost, generate(total_cost), period, project_label, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::billing::CostBucket;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct StaticBilling {
        amounts: Vec<Decimal>,
        requests: Mutex<Vec<(AnalysisPeriod, String)>>,
    }

    impl StaticBilling {
        fn new(amounts: Vec<Decimal>) -> Self {
            Self {
                amounts,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BillingSource for StaticBilling {
        async fn cost_buckets(
            &self,
            period: &AnalysisPeriod,
            service: &str,
        ) -> Result<Vec<CostBucket>, BillingError> {
            self.requests
                .lock()
                .unwrap()
                .push((*period, service.to_string()));
            Ok(self
                .amounts
                .iter()
                .map(|amount| CostBucket {
                    start: period.start.to_string(),
                    end: period.end.to_string(),
                    amount: *amount,
                })
                .collect())
        }
    }

    struct FailingBilling;

    #[async_trait]
    impl BillingSource for FailingBilling {
        async fn cost_buckets(
            &self,
            _period: &AnalysisPeriod,
            _service: &str,
        ) -> Result<Vec<CostBucket>, BillingError> {
            Err(BillingError::query("test", "ThrottlingException: Rate exceeded"))
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(String, Vec<u8>, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ReportStore for RecordingStore {
        async fn put(
            &self,
            key: &str,
            data: Vec<u8>,
            content_type: &str,
        ) -> Result<String, ReportStoreError> {
            if self.fail {
                return Err(ReportStoreError::Backend("AccessDenied".to_string()));
            }
            self.writes
                .lock()
                .unwrap()
                .push((key.to_string(), data, content_type.to_string()));
            Ok(format!("mem://bucket/{}", key))
        }

        fn backend_name(&self) -> &'static str {
            "memory"
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 14, 5, 9).unwrap()
    }

    #[tokio::test]
    async fn test_run_success() {
        let billing = Arc::new(StaticBilling::new(vec![dec!(600), dec!(400)]));
        let store = Arc::new(RecordingStore::default());
        let analyzer = CostAnalyzer::new(billing.clone(), store.clone(), "ml-cost-optimizer");

        let summary = analyzer.run(now()).await.unwrap();

        assert_eq!(summary.total_cost, dec!(1000));
        assert_eq!(summary.potential_savings, dec!(1150));
        assert_eq!(summary.savings_percentage, dec!(115.0));
        assert_eq!(summary.recommendations_count, 5);
        assert_eq!(
            summary.report_location,
            "mem://bucket/reports/2024-06-30_14-05-09_cost-analysis.json"
        );

        let requests = billing.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.start.to_string(), "2024-05-31");
        assert_eq!(requests[0].0.end.to_string(), "2024-06-30");
        assert_eq!(requests[0].1, "Amazon SageMaker");

        let writes = store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "reports/2024-06-30_14-05-09_cost-analysis.json");
        assert_eq!(writes[0].2, "application/json");
        let report: serde_json::Value = serde_json::from_slice(&writes[0].1).unwrap();
        assert_eq!(report["optimization"]["potential_monthly_savings"], 1150.0);
        assert_eq!(report["summary"]["high_priority"], 2);
    }

    #[tokio::test]
    async fn test_run_no_billing_results() {
        let store = Arc::new(RecordingStore::default());
        let analyzer = CostAnalyzer::new(
            Arc::new(StaticBilling::new(vec![])),
            store.clone(),
            "ml-cost-optimizer",
        );

        let summary = analyzer.run(now()).await.unwrap();

        assert_eq!(summary.total_cost, Decimal::ZERO);
        assert_eq!(summary.potential_savings, Decimal::ZERO);
        assert_eq!(summary.savings_percentage, Decimal::ZERO);
        assert_eq!(summary.recommendations_count, 1);
        assert_eq!(store.writes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_billing_failure_skips_write() {
        let store = Arc::new(RecordingStore::default());
        let analyzer = CostAnalyzer::new(Arc::new(FailingBilling), store.clone(), "p");

        let err = analyzer.run(now()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::UpstreamQuery(_)));
        assert!(err.to_string().contains("ThrottlingException"));
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        let analyzer = CostAnalyzer::new(
            Arc::new(StaticBilling::new(vec![dec!(75)])),
            store,
            "p",
        );

        let err = analyzer.run(now()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Persistence(_)));
        assert_eq!(err.to_string(), "Storage backend error: AccessDenied");
    }

    #[test]
    fn test_build_report_uses_project_label() {
        let report = build_report(
            dec!(120),
            AnalysisPeriod::ending(now().date_naive()),
            "vision-team",
            now(),
        );
        assert_eq!(report.metadata.project, "vision-team");
        assert_eq!(report.recommendations.len(), 3);
    }
}
