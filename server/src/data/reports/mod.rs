//! Report storage layer
//!
//! Persists serialized cost reports under a namespace (S3 bucket or local
//! directory) and hands back a fully qualified location.
//!
//! - `s3` - AWS S3 (or S3-compatible) implementation
//! - `filesystem` - Local directory implementation
//! - `error` - Error types for report storage
//!
//! ## Layout
//!
//! ```text
//! {namespace}/
//! └── reports/
//!     └── {YYYY-MM-DD_HH-MM-SS}_cost-analysis.json
//! ```

pub mod error;
pub mod filesystem;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::config::{StorageBackend, StorageConfig};
use crate::core::constants::REPORT_CONTENT_TYPE;
use crate::domain::report::{Report, report_key};
use crate::utils::file::resolve_path;

pub use error::ReportStoreError;
pub use filesystem::FilesystemReportStore;
pub use s3::S3ReportStore;

/// Trait for report storage backends
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Store `data` under `key` relative to the store's namespace.
    ///
    /// Returns the fully qualified location of the stored object.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ReportStoreError>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Create the configured report store
///
/// For the filesystem backend `namespace` is a directory and must resolve to a
/// usable path.
pub async fn create_store(
    namespace: &str,
    config: &StorageConfig,
) -> Result<Arc<dyn ReportStore>, ReportStoreError> {
    let store: Arc<dyn ReportStore> = match config.backend {
        StorageBackend::S3 => Arc::new(
            S3ReportStore::new(
                namespace.to_string(),
                config.region.clone(),
                config.endpoint.clone(),
            )
            .await,
        ),
        StorageBackend::Filesystem => {
            Arc::new(FilesystemReportStore::new(resolve_path(namespace)?))
        }
    };

    tracing::debug!(backend = store.backend_name(), "Report store initialized");
    Ok(store)
}

/// Serialize `report` and write it under the key for `analyzed_at`
pub async fn publish(
    store: &dyn ReportStore,
    report: &Report,
    analyzed_at: DateTime<Utc>,
) -> Result<String, ReportStoreError> {
    let body = report.to_json()?;
    let key = report_key(analyzed_at);

    let location = store
        .put(&key, body.into_bytes(), REPORT_CONTENT_TYPE)
        .await?;

    tracing::info!(location = %location, "Report saved");
    Ok(location)
}
