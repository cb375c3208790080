//! Billing query error types

use thiserror::Error;

/// Errors from the billing provider
#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Billing query failed ({provider}): {message}")]
    Query {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid cost amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid billing request: {0}")]
    InvalidRequest(String),
}

impl BillingError {
    pub fn query(provider: &'static str, msg: impl Into<String>) -> Self {
        Self::Query {
            provider,
            message: msg.into(),
        }
    }
}
