//! Filesystem-based report storage
//!
//! Writes reports to `{base_path}/{key}`, creating parent directories as
//! needed. Intended for local runs without S3.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::ReportStore;
use super::error::ReportStoreError;

/// Filesystem-based report storage
#[derive(Debug, Clone)]
pub struct FilesystemReportStore {
    /// Base directory for reports
    base_path: PathBuf,
}

impl FilesystemReportStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Resolve `key` under the base path, rejecting keys that escape it
    fn report_path(&self, key: &str) -> Result<PathBuf, ReportStoreError> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|c| {
            !matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir)
        });
        if key.is_empty() || escapes {
            return Err(ReportStoreError::Backend(format!(
                "Invalid report key: {}",
                key
            )));
        }
        Ok(self.base_path.join(relative))
    }

    async fn ensure_parent_dirs(&self, path: &Path) -> Result<(), ReportStoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReportStore for FilesystemReportStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, ReportStoreError> {
        let path = self.report_path(key)?;

        self.ensure_parent_dirs(&path).await?;
        fs::write(&path, &data).await?;

        tracing::debug!(key, size = data.len(), path = %path.display(), "Report stored");

        Ok(format!("file://{}", path.display()))
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
