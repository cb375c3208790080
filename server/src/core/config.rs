use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::resolve_path;

use super::cli::CliConfig;
use super::constants::{CONFIG_FILE_NAME, DEFAULT_PROJECT_LABEL};

// =============================================================================
// Storage Backend Enum
// =============================================================================

/// Storage backend type for published reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    S3,
    Filesystem,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Filesystem => write!(f, "filesystem"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Storage configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StorageFileConfig {
    pub backend: Option<StorageBackend>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub report_bucket: Option<String>,
    pub project_name: Option<String>,
    pub storage: Option<StorageFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// Analysis settings, validated once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Report bucket, or base directory for the filesystem backend
    pub storage_namespace: String,
    /// Label written into report metadata
    pub project_label: String,
}

/// Report storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub analyzer: AnalyzerConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Resolve configuration. Precedence: CLI/env > config file > defaults.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let config_path = if let Some(ref path) = cli.config {
            let expanded = resolve_path(&path.to_string_lossy())
                .with_context(|| format!("Invalid config path: {}", path.display()))?;
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        let file_config = match config_path {
            Some(path) => {
                let file_config = FileConfig::load_from_file(&path)?;
                file_config.warn_unknown_fields();
                file_config
            }
            None => FileConfig::default(),
        };

        Self::resolve(cli, file_config)
    }

    fn resolve(cli: &CliConfig, file: FileConfig) -> Result<Self> {
        let file_storage = file.storage.unwrap_or_default();

        let config = Self {
            analyzer: AnalyzerConfig {
                storage_namespace: cli
                    .bucket
                    .clone()
                    .or(file.report_bucket)
                    .map(|b| b.trim().to_string())
                    .unwrap_or_default(),
                project_label: cli
                    .project
                    .clone()
                    .or(file.project_name)
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PROJECT_LABEL.to_string()),
            },
            storage: StorageConfig {
                backend: cli.storage.or(file_storage.backend).unwrap_or_default(),
                region: cli.region.clone().or(file_storage.region),
                endpoint: cli.s3_endpoint.clone().or(file_storage.endpoint),
            },
        };

        config.validate()?;

        tracing::debug!(
            namespace = %config.analyzer.storage_namespace,
            project = %config.analyzer.project_label,
            storage = %config.storage.backend,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.analyzer.storage_namespace.is_empty() {
            anyhow::bail!(
                "Configuration error: report bucket is required (set REPORT_BUCKET or --bucket)"
            );
        }

        if self.storage.backend == StorageBackend::Filesystem && self.storage.endpoint.is_some() {
            tracing::warn!("S3 endpoint is ignored with the filesystem storage backend");
        }

        Ok(())
    }
}
