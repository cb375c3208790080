//! AWS Cost Explorer billing source
//!
//! Issues a single `GetCostAndUsage` request with MONTHLY granularity and the
//! `UnblendedCost` metric, filtered on the `SERVICE` dimension.

use std::str::FromStr;

use async_trait::async_trait;
use aws_sdk_costexplorer::Client;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{
    DateInterval, Dimension, DimensionValues, Expression, Granularity, ResultByTime,
};
use rust_decimal::Decimal;

use crate::core::constants::{BILLING_METRIC, MAX_COST_USD};
use crate::domain::period::AnalysisPeriod;

use super::error::BillingError;
use super::{BillingSource, CostBucket};

const PROVIDER: &str = "cost-explorer";

/// Cost Explorer backed billing source
#[derive(Debug, Clone)]
pub struct CostExplorerSource {
    client: Client,
}

impl CostExplorerSource {
    /// Create a new source, loading credentials from the default AWS chain
    pub async fn new(region: Option<String>) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = region {
            config_loader =
                config_loader.region(aws_sdk_costexplorer::config::Region::new(region));
        }

        let config = config_loader.load().await;
        let client = Client::new(&config);

        tracing::debug!("Cost Explorer billing source initialized");

        Self { client }
    }
}

#[async_trait]
impl BillingSource for CostExplorerSource {
    async fn cost_buckets(
        &self,
        period: &AnalysisPeriod,
        service: &str,
    ) -> Result<Vec<CostBucket>, BillingError> {
        let time_period = DateInterval::builder()
            .start(period.start.to_string())
            .end(period.end.to_string())
            .build()
            .map_err(|e| BillingError::InvalidRequest(e.to_string()))?;

        let filter = Expression::builder()
            .dimensions(
                DimensionValues::builder()
                    .key(Dimension::Service)
                    .values(service)
                    .build(),
            )
            .build();

        let response = self
            .client
            .get_cost_and_usage()
            .time_period(time_period)
            .granularity(Granularity::Monthly)
            .filter(filter)
            .metrics(BILLING_METRIC)
            .send()
            .await
            .map_err(|e| BillingError::query(PROVIDER, DisplayErrorContext(&e).to_string()))?;

        let buckets = buckets_from_results(response.results_by_time())?;

        tracing::debug!(
            service,
            period = %period,
            buckets = buckets.len(),
            "Cost Explorer query completed"
        );

        Ok(buckets)
    }
}

/// Convert `ResultsByTime` entries into cost buckets.
///
/// Entries without an `UnblendedCost` amount count as zero.
fn buckets_from_results(results: &[ResultByTime]) -> Result<Vec<CostBucket>, BillingError> {
    results
        .iter()
        .map(|result| {
            let amount = match result
                .total()
                .and_then(|total| total.get(BILLING_METRIC))
                .and_then(|metric| metric.amount())
            {
                Some(raw) => parse_amount(raw)?,
                None => Decimal::ZERO,
            };

            let (start, end) = result
                .time_period()
                .map(|p| (p.start().to_string(), p.end().to_string()))
                .unwrap_or_default();

            Ok(CostBucket { start, end, amount })
        })
        .collect()
}

fn parse_amount(raw: &str) -> Result<Decimal, BillingError> {
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| BillingError::InvalidAmount {
            amount: raw.to_string(),
            reason: e.to_string(),
        })?;

    if amount.abs() > Decimal::from(MAX_COST_USD) {
        return Err(BillingError::InvalidAmount {
            amount: raw.to_string(),
            reason: format!("exceeds {} USD", MAX_COST_USD),
        });
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_costexplorer::types::MetricValue;
    use rust_decimal_macros::dec;

    fn result(start: &str, end: &str, amount: Option<&str>) -> ResultByTime {
        let mut builder = ResultByTime::builder().time_period(
            DateInterval::builder()
                .start(start)
                .end(end)
                .build()
                .unwrap(),
        );
        if let Some(amount) = amount {
            builder = builder.total(
                BILLING_METRIC,
                MetricValue::builder().amount(amount).unit("USD").build(),
            );
        }
        builder.build()
    }

    #[test]
    fn test_buckets_from_results_empty() {
        let buckets = buckets_from_results(&[]).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_buckets_from_results_parses_amounts() {
        let results = vec![
            result("2024-05-01", "2024-06-01", Some("812.3456789")),
            result("2024-06-01", "2024-06-30", Some("187.6543211")),
        ];
        let buckets = buckets_from_results(&results).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, "2024-05-01");
        assert_eq!(buckets[0].end, "2024-06-01");
        assert_eq!(buckets[0].amount, dec!(812.3456789));
        assert_eq!(super::super::total_cost(&buckets), dec!(1000));
    }

    #[test]
    fn test_buckets_from_results_missing_metric_is_zero() {
        let results = vec![result("2024-05-01", "2024-06-01", None)];
        let buckets = buckets_from_results(&results).unwrap();
        assert_eq!(buckets[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_buckets_from_results_invalid_amount() {
        let results = vec![result("2024-05-01", "2024-06-01", Some("twelve"))];
        let err = buckets_from_results(&results).unwrap_err();
        assert!(matches!(err, BillingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_parse_amount_scientific() {
        assert_eq!(parse_amount("1.5e2").unwrap(), dec!(150));
        assert_eq!(parse_amount("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_out_of_range() {
        let err = parse_amount("1e20").unwrap_err();
        assert!(err.to_string().contains("exceeds"));
        assert!(parse_amount("-1e20").is_err());
        assert!(parse_amount("-12.5").is_ok());
    }
}
