//! Threshold-gated optimization recommendations
//!
//! A fixed rule table evaluated top to bottom. Each rule is independent: it is
//! appended when its cost guard holds, with savings derived from the total
//! cost and the rule's rate. Output order is always table order.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single optimization recommendation as it appears in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: &'static str,
    pub priority: Priority,
    pub category: &'static str,
    pub resource_type: &'static str,
    pub issue: &'static str,
    pub recommendation: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_savings: Decimal,
    pub implementation_effort: &'static str,
    pub implementation_steps: &'static [&'static str],
    #[serde(rename = "aws_documentation")]
    pub reference_link: &'static str,
}

/// Catalogue entry: guard, savings rate and the fixed texts
struct Rule {
    id: &'static str,
    priority: Priority,
    /// Rule applies when total cost is strictly greater than this (USD). `None` = always.
    min_cost_exclusive: Option<i64>,
    /// Savings rate in percent of total cost
    rate_percent: i64,
    category: &'static str,
    resource_type: &'static str,
    issue: &'static str,
    recommendation: &'static str,
    effort: &'static str,
    steps: &'static [&'static str],
    reference_link: &'static str,
}

impl Rule {
    fn applies(&self, total_cost: Decimal) -> bool {
        self.min_cost_exclusive
            .is_none_or(|threshold| total_cost > Decimal::from(threshold))
    }

    fn rate(&self) -> Decimal {
        Decimal::new(self.rate_percent, 2)
    }

    fn build(&self, total_cost: Decimal) -> Recommendation {
        let monthly_savings = round_money(total_cost * self.rate());
        Recommendation {
            id: self.id,
            priority: self.priority,
            category: self.category,
            resource_type: self.resource_type,
            issue: self.issue,
            recommendation: self.recommendation,
            monthly_savings,
            annual_savings: round_money(monthly_savings * Decimal::from(12)),
            implementation_effort: self.effort,
            implementation_steps: self.steps,
            reference_link: self.reference_link,
        }
    }
}

static RULES: [Rule; 5] = [
    Rule {
        id: "rec-001",
        priority: Priority::High,
        min_cost_exclusive: Some(50),
        rate_percent: 25,
        category: "Compute Optimization",
        resource_type: "SageMaker Notebook Instances",
        issue: "Notebook instances running 24/7 without auto-stop configuration",
        recommendation: "Implement lifecycle configurations to automatically stop notebooks after 1 hour of inactivity",
        effort: "Low (15-30 minutes)",
        steps: &[
            "Create a lifecycle configuration with auto-stop script",
            "Attach lifecycle config to existing notebooks",
            "Set idle timeout to 1 hour",
        ],
        reference_link: "https://docs.aws.amazon.com/sagemaker/latest/dg/notebook-lifecycle-config.html",
    },
    Rule {
        id: "rec-002",
        priority: Priority::High,
        min_cost_exclusive: Some(100),
        rate_percent: 35,
        category: "Cost Optimization",
        resource_type: "SageMaker Training Jobs",
        issue: "Training jobs running on expensive On-Demand instances",
        recommendation: "Switch to Managed Spot Training for up to 70% cost reduction",
        effort: "Medium (1-2 hours)",
        steps: &[
            "Enable Managed Spot Training in SageMaker training job configuration",
            "Set max wait time and max runtime appropriately",
            "Implement checkpointing for long-running jobs",
        ],
        reference_link: "https://docs.aws.amazon.com/sagemaker/latest/dg/model-managed-spot-training.html",
    },
    Rule {
        id: "rec-003",
        priority: Priority::Medium,
        min_cost_exclusive: Some(200),
        rate_percent: 20,
        category: "Scaling Optimization",
        resource_type: "SageMaker Inference Endpoints",
        issue: "Always-on endpoints with variable traffic patterns",
        recommendation: "Configure auto-scaling based on invocations per instance and implement scheduled scaling",
        effort: "Medium (2-3 hours)",
        steps: &[
            "Define scaling policy based on InvocationsPerInstance metric",
            "Set min/max instance counts appropriately",
            "Configure scheduled scaling for predictable low-traffic periods",
            "Consider serverless inference for sporadic workloads",
        ],
        reference_link: "https://docs.aws.amazon.com/sagemaker/latest/dg/endpoint-auto-scaling.html",
    },
    Rule {
        id: "rec-004",
        priority: Priority::Low,
        min_cost_exclusive: None,
        rate_percent: 5,
        category: "Storage Optimization",
        resource_type: "S3 (Training Data & Model Artifacts)",
        issue: "All training data and model artifacts stored in S3 Standard storage class",
        recommendation: "Implement S3 lifecycle policies to transition old data to cheaper storage classes",
        effort: "Low (30 minutes)",
        steps: &[
            "Identify S3 buckets used by SageMaker",
            "Create lifecycle policy: Standard -> Intelligent-Tiering after 30 days",
            "Move artifacts older than 90 days to Glacier",
            "Delete old experiment artifacts after 1 year (if not needed)",
        ],
        reference_link: "https://docs.aws.amazon.com/AmazonS3/latest/userguide/object-lifecycle-mgmt.html",
    },
    Rule {
        id: "rec-005",
        priority: Priority::Medium,
        min_cost_exclusive: Some(500),
        rate_percent: 30,
        category: "Commitment Discount",
        resource_type: "SageMaker Compute",
        issue: "High baseline compute usage without commitment discounts",
        recommendation: "Purchase SageMaker Savings Plans for predictable workloads (up to 64% savings)",
        effort: "Low (1 hour analysis + purchase)",
        steps: &[
            "Analyze usage patterns over past 30-60 days",
            "Identify baseline consistent compute usage",
            "Purchase 1-year or 3-year SageMaker Savings Plan",
            "Monitor coverage and utilization monthly",
        ],
        reference_link: "https://docs.aws.amazon.com/savingsplans/latest/userguide/what-is-savings-plans.html",
    },
];

/// Round a USD amount to cents, ties to even
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Build the recommendations that apply to `total_cost`, in catalogue order
pub fn generate(total_cost: Decimal) -> Vec<Recommendation> {
    let recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| rule.applies(total_cost))
        .map(|rule| rule.build(total_cost))
        .collect();

    tracing::debug!(
        total_cost = %total_cost,
        count = recommendations.len(),
        "Recommendations generated"
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MAX_COST_USD;
    use rust_decimal_macros::dec;

    fn ids(recs: &[Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_zero_cost_only_storage() {
        let recs = generate(Decimal::ZERO);
        assert_eq!(ids(&recs), vec!["rec-004"]);
        assert_eq!(recs[0].monthly_savings, Decimal::ZERO);
        assert_eq!(recs[0].annual_savings, Decimal::ZERO);
        assert_eq!(recs[0].priority, Priority::Low);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(ids(&generate(dec!(50))), vec!["rec-004"]);
        assert_eq!(ids(&generate(dec!(100))), vec!["rec-001", "rec-004"]);
        assert_eq!(
            ids(&generate(dec!(200))),
            vec!["rec-001", "rec-002", "rec-004"]
        );
        assert_eq!(
            ids(&generate(dec!(500))),
            vec!["rec-001", "rec-002", "rec-003", "rec-004"]
        );
    }

    #[test]
    fn test_just_above_thresholds() {
        assert_eq!(ids(&generate(dec!(50.01))), vec!["rec-001", "rec-004"]);
        assert_eq!(
            ids(&generate(dec!(100.01))),
            vec!["rec-001", "rec-002", "rec-004"]
        );
        assert_eq!(
            ids(&generate(dec!(200.01))),
            vec!["rec-001", "rec-002", "rec-003", "rec-004"]
        );
        assert_eq!(
            ids(&generate(dec!(500.01))),
            vec!["rec-001", "rec-002", "rec-003", "rec-004", "rec-005"]
        );
    }

    #[test]
    fn test_band_membership() {
        for cost in [dec!(0), dec!(12.5), dec!(49.99), dec!(50)] {
            assert_eq!(ids(&generate(cost)), vec!["rec-004"], "cost {cost}");
        }
        for cost in [dec!(75), dec!(99.99)] {
            assert_eq!(ids(&generate(cost)), vec!["rec-001", "rec-004"]);
        }
        for cost in [dec!(150), dec!(199.99)] {
            assert_eq!(ids(&generate(cost)), vec!["rec-001", "rec-002", "rec-004"]);
        }
        for cost in [dec!(300), dec!(499.99)] {
            assert_eq!(
                ids(&generate(cost)),
                vec!["rec-001", "rec-002", "rec-003", "rec-004"]
            );
        }
        for cost in [dec!(600), dec!(25000)] {
            assert_eq!(
                ids(&generate(cost)),
                vec!["rec-001", "rec-002", "rec-003", "rec-004", "rec-005"]
            );
        }
    }

    #[test]
    fn test_savings_at_one_thousand() {
        let recs = generate(dec!(1000));
        let monthly: Vec<Decimal> = recs.iter().map(|r| r.monthly_savings).collect();
        assert_eq!(
            monthly,
            vec![dec!(250), dec!(350), dec!(200), dec!(50), dec!(300)]
        );
        assert_eq!(recs[0].annual_savings, dec!(3000));
        assert_eq!(recs[1].annual_savings, dec!(4200));
        assert_eq!(recs[4].annual_savings, dec!(3600));
    }

    #[test]
    fn test_priorities_at_one_thousand() {
        let priorities: Vec<Priority> = generate(dec!(1000)).iter().map(|r| r.priority).collect();
        assert_eq!(
            priorities,
            vec![
                Priority::High,
                Priority::High,
                Priority::Medium,
                Priority::Low,
                Priority::Medium
            ]
        );
    }

    #[test]
    fn test_savings_rounded_to_cents() {
        // 123.45 * 0.25 = 30.8625
        let recs = generate(dec!(123.45));
        assert_eq!(recs[0].monthly_savings, dec!(30.86));
        // annual is taken from the rounded monthly figure: 30.86 * 12
        assert_eq!(recs[0].annual_savings, dec!(370.32));
        // 123.45 * 0.35 = 43.2075
        assert_eq!(recs[1].monthly_savings, dec!(43.21));
        assert_eq!(recs[1].annual_savings, dec!(518.52));
    }

    #[test]
    fn test_annual_savings_follow_monthly_figure() {
        for cost in [dec!(0.07), dec!(123.45), dec!(777.77), dec!(1234.56)] {
            for rec in generate(cost) {
                assert_eq!(
                    rec.annual_savings,
                    rec.monthly_savings * Decimal::from(12),
                    "{} at cost {cost}",
                    rec.id
                );
            }
        }
    }

    #[test]
    fn test_largest_accepted_cost() {
        let recs = generate(Decimal::from(MAX_COST_USD));
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[1].annual_savings, dec!(4200000000000000));
    }

    #[test]
    fn test_round_money_ties_to_even() {
        assert_eq!(round_money(dec!(2.125)), dec!(2.12));
        assert_eq!(round_money(dec!(2.135)), dec!(2.14));
        assert_eq!(round_money(dec!(2.1251)), dec!(2.13));
    }

    #[test]
    fn test_generate_is_pure() {
        let first = serde_json::to_string(&generate(dec!(777.77))).unwrap();
        let second = serde_json::to_string(&generate(dec!(777.77))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_shape() {
        let recs = generate(dec!(1000));
        let json = serde_json::to_value(&recs[0]).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "priority",
                "category",
                "resource_type",
                "issue",
                "recommendation",
                "monthly_savings",
                "annual_savings",
                "implementation_effort",
                "implementation_steps",
                "aws_documentation"
            ]
        );
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["monthly_savings"], 250.0);
        assert_eq!(json["implementation_steps"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::High.to_string(), "HIGH");
        assert_eq!(Priority::Medium.to_string(), "MEDIUM");
        assert_eq!(Priority::Low.to_string(), "LOW");
    }
}
