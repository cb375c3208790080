//! Cost analysis report document
//!
//! The report is the persisted artifact. Field order in these structs is the
//! key order of the serialized JSON and must stay stable.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::core::constants::{REPORT_CURRENCY, REPORT_KEY_PREFIX, REPORT_KEY_SUFFIX};
use crate::utils::time::{key_timestamp, to_iso};

use super::period::AnalysisPeriod;
use super::recommendations::{Priority, Recommendation, round_money};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub analysis_date: String,
    pub period_start: String,
    pub period_end: String,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_monthly_usd: Decimal,
    pub currency: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optimization {
    #[serde(with = "rust_decimal::serde::float")]
    pub potential_monthly_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub potential_annual_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings_percentage: Decimal,
}

/// Recommendation counts by priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrioritySummary {
    pub total_recommendations: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
}

impl PrioritySummary {
    pub fn count(recommendations: &[Recommendation]) -> Self {
        let by = |p: Priority| recommendations.iter().filter(|r| r.priority == p).count();
        Self {
            total_recommendations: recommendations.len(),
            high_priority: by(Priority::High),
            medium_priority: by(Priority::Medium),
            low_priority: by(Priority::Low),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub costs: CostSummary,
    pub optimization: Optimization,
    pub recommendations: Vec<Recommendation>,
    pub summary: PrioritySummary,
}

impl Report {
    /// Assemble a report from the summed cost and the generated recommendations
    pub fn assemble(
        total_cost: Decimal,
        recommendations: Vec<Recommendation>,
        period: AnalysisPeriod,
        project: &str,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        let monthly: Decimal = recommendations.iter().map(|r| r.monthly_savings).sum();

        let optimization = Optimization {
            potential_monthly_savings: round_money(monthly),
            potential_annual_savings: round_money(monthly * Decimal::from(12)),
            savings_percentage: savings_percentage(monthly, total_cost),
        };

        Self {
            metadata: ReportMetadata {
                analysis_date: to_iso(analyzed_at),
                period_start: period.start.to_string(),
                period_end: period.end.to_string(),
                project: project.to_string(),
            },
            costs: CostSummary {
                total_monthly_usd: round_money(total_cost),
                currency: REPORT_CURRENCY,
            },
            optimization,
            summary: PrioritySummary::count(&recommendations),
            recommendations,
        }
    }

    /// Canonical JSON text (struct key order, 2-space indentation)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Savings as a percentage of total cost, one decimal place.
///
/// Zero when there is no cost. Not capped: stacked rules can exceed 100%.
pub fn savings_percentage(savings: Decimal, total_cost: Decimal) -> Decimal {
    if total_cost <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (savings / total_cost * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
}

/// Object key for a report produced at `analyzed_at`
pub fn report_key(analyzed_at: DateTime<Utc>) -> String {
    format!(
        "{}/{}{}",
        REPORT_KEY_PREFIX,
        key_timestamp(analyzed_at),
        REPORT_KEY_SUFFIX
    )
}
