//! Invocation response types
//!
//! The entrypoint always answers with a status code and a JSON body, in the
//! shape of an API gateway proxy response.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::constants::{MESSAGE_FAILURE, MESSAGE_SUCCESS};
use crate::domain::analysis::{AnalysisError, AnalysisSummary};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Body of a successful invocation
#[derive(Debug, Serialize)]
pub struct SuccessBody<'a> {
    pub message: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub potential_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings_percentage: Decimal,
    pub report_location: &'a str,
    pub recommendations_count: usize,
}

/// Body of a failed invocation
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: &'static str,
}

/// Structured invocation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON text
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(summary: &AnalysisSummary) -> Self {
        let body = SuccessBody {
            message: MESSAGE_SUCCESS,
            total_cost: summary.total_cost,
            potential_savings: summary.potential_savings,
            savings_percentage: summary.savings_percentage,
            report_location: &summary.report_location,
            recommendations_count: summary.recommendations_count,
        };
        match serde_json::to_string_pretty(&body) {
            Ok(body) => Self {
                status_code: STATUS_OK,
                body,
            },
            Err(e) => Self::error(&e),
        }
    }

    pub fn error(err: &dyn std::fmt::Display) -> Self {
        let body = ErrorBody {
            error: err.to_string(),
            message: MESSAGE_FAILURE,
        };
        Self {
            status_code: STATUS_INTERNAL_ERROR,
            body: serde_json::to_string(&body).unwrap_or_else(|_| {
                format!(r#"{{"error":"internal","message":"{}"}}"#, MESSAGE_FAILURE)
            }),
        }
    }

    /// Map a pipeline result to a response, logging failures
    pub fn from_outcome(outcome: Result<AnalysisSummary, AnalysisError>) -> Self {
        match outcome {
            Ok(summary) => Self::ok(&summary),
            Err(e) => {
                tracing::error!(error = %e, "Cost analysis failed");
                Self::error(&e)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}
