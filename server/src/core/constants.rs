// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "ML Cost Optimizer";

/// Application name in lowercase (for log filters and identifiers)
pub const APP_NAME_LOWER: &str = "ml_cost_optimizer";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "ml-cost-optimizer.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "MLCOST_CONFIG";

// =============================================================================
// Environment Variables - Invocation
// =============================================================================

/// Destination bucket (or directory for the filesystem backend) for reports
pub const ENV_REPORT_BUCKET: &str = "REPORT_BUCKET";

/// Project label written into report metadata
pub const ENV_PROJECT_NAME: &str = "PROJECT_NAME";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "MLCOST_LOG";

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Report storage backend (`s3` or `filesystem`)
pub const ENV_STORAGE: &str = "MLCOST_STORAGE";

/// AWS region override for both the billing and storage clients
pub const ENV_AWS_REGION: &str = "MLCOST_AWS_REGION";

/// Custom S3 endpoint (MinIO and other S3-compatible services)
pub const ENV_S3_ENDPOINT: &str = "MLCOST_S3_ENDPOINT";

// =============================================================================
// Defaults
// =============================================================================

/// Project label used when none is configured
pub const DEFAULT_PROJECT_LABEL: &str = "ml-cost-optimizer";

// =============================================================================
// Analysis
// =============================================================================

/// Length of the trailing analysis window
pub const ANALYSIS_WINDOW_DAYS: i64 = 30;

/// Billing service dimension value for the managed ML platform
pub const BILLING_SERVICE_FILTER: &str = "Amazon SageMaker";

/// Cost metric requested from the billing provider
pub const BILLING_METRIC: &str = "UnblendedCost";

/// Currency of every amount in the report
pub const REPORT_CURRENCY: &str = "USD";

/// Largest total cost accepted as input (USD)
pub const MAX_COST_USD: i64 = 1_000_000_000_000_000;

// =============================================================================
// Reports
// =============================================================================

/// Key prefix under the storage namespace
pub const REPORT_KEY_PREFIX: &str = "reports";

/// Key suffix appended after the invocation timestamp
pub const REPORT_KEY_SUFFIX: &str = "_cost-analysis.json";

/// Timestamp format used in report keys
pub const REPORT_KEY_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Content type of persisted reports
pub const REPORT_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// Invocation Messages
// =============================================================================

pub const MESSAGE_SUCCESS: &str = "Cost analysis completed successfully";
pub const MESSAGE_FAILURE: &str = "Failed to analyze costs";
