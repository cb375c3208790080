//! Report storage error types

use thiserror::Error;

/// Errors from report storage backends (S3/filesystem)
#[derive(Error, Debug)]
pub enum ReportStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
