//! S3-based report storage
//!
//! Writes reports to `s3://{bucket}/{key}`. Works with AWS S3 and
//! S3-compatible services (MinIO etc.) through a custom endpoint.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use super::ReportStore;
use super::error::ReportStoreError;

/// S3-based report storage
#[derive(Debug, Clone)]
pub struct S3ReportStore {
    client: Client,
    bucket: String,
}

impl S3ReportStore {
    /// Create a new S3 report store for `bucket`
    pub async fn new(bucket: String, region: Option<String>, endpoint: Option<String>) -> Self {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = region {
            config_loader = config_loader.region(aws_sdk_s3::config::Region::new(region));
        }

        let config = config_loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&config);

        if let Some(endpoint_url) = endpoint {
            s3_config = s3_config.endpoint_url(endpoint_url).force_path_style(true); // Required for most S3-compatible services
        }

        let client = Client::from_conf(s3_config.build());

        tracing::debug!(bucket = %bucket, "S3 report store initialized");

        Self { client, bucket }
    }

    /// Fully qualified location for `key`
    fn location(&self, key: &str) -> String {
        s3_uri(&self.bucket, key)
    }
}

fn s3_uri(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key)
}

#[async_trait]
impl ReportStore for S3ReportStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ReportStoreError> {
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                ReportStoreError::Backend(format!(
                    "S3 put_object error: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::debug!(bucket = %self.bucket, key, size, "Report stored in S3");

        Ok(self.location(key))
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
