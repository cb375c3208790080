use clap::{Parser, Subcommand};

use std::path::PathBuf;

use rust_decimal::Decimal;

use super::config::StorageBackend;
use super::constants::{
    ENV_AWS_REGION, ENV_CONFIG, ENV_PROJECT_NAME, ENV_REPORT_BUCKET, ENV_S3_ENDPOINT, ENV_STORAGE,
    MAX_COST_USD,
};

#[derive(Parser)]
#[command(name = "ml-cost-optimizer")]
#[command(version, about = "SageMaker cost analysis and optimization recommendations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Report bucket (or directory for the filesystem backend)
    #[arg(long, short = 'b', global = true, env = ENV_REPORT_BUCKET)]
    pub bucket: Option<String>,

    /// Project label written into report metadata
    #[arg(long, short = 'p', global = true, env = ENV_PROJECT_NAME)]
    pub project: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Report storage backend (s3 or filesystem)
    #[arg(long, global = true, env = ENV_STORAGE, value_parser = parse_storage_backend)]
    pub storage: Option<StorageBackend>,

    /// AWS region for billing and storage clients
    #[arg(long, global = true, env = ENV_AWS_REGION)]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (S3-compatible services)
    #[arg(long, global = true, env = ENV_S3_ENDPOINT)]
    pub s3_endpoint: Option<String>,
}

/// Parse storage backend from CLI/env string
fn parse_storage_backend(s: &str) -> Result<StorageBackend, String> {
    match s.to_lowercase().as_str() {
        "s3" => Ok(StorageBackend::S3),
        "filesystem" | "fs" => Ok(StorageBackend::Filesystem),
        _ => Err(format!(
            "Invalid storage backend '{}'. Valid options: s3, filesystem",
            s
        )),
    }
}

/// Parse a non-negative USD amount, at most [`MAX_COST_USD`]
fn parse_cost(s: &str) -> Result<Decimal, String> {
    let cost: Decimal = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid cost '{}'. Expected a decimal amount in USD", s))?;
    if cost.is_sign_negative() {
        return Err(format!("Invalid cost '{}'. Must not be negative", s));
    }
    if cost > Decimal::from(MAX_COST_USD) {
        return Err(format!(
            "Invalid cost '{}'. Must not exceed {}",
            s, MAX_COST_USD
        ));
    }
    Ok(cost)
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Query billing, publish a report and print the invocation result (default command)
    Analyze,
    /// Print the report for a given monthly cost without calling AWS or writing anything
    Preview {
        /// Total cost in USD
        #[arg(long, value_parser = parse_cost)]
        cost: Decimal,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub bucket: Option<String>,
    pub project: Option<String>,
    pub config: Option<PathBuf>,
    pub storage: Option<StorageBackend>,
    pub region: Option<String>,
    pub s3_endpoint: Option<String>,
}

impl Cli {
    fn into_parts(self) -> (CliConfig, Option<Commands>) {
        let config = CliConfig {
            bucket: self.bucket,
            project: self.project,
            config: self.config,
            storage: self.storage,
            region: self.region,
            s3_endpoint: self.s3_endpoint,
        };
        (config, self.command)
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    Cli::parse().into_parts()
}
