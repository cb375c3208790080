//! Core application

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::api::InvocationResponse;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, DEFAULT_PROJECT_LABEL, ENV_LOG};
use crate::data::billing::{BillingSource, CostExplorerSource};
use crate::data::reports::{self, ReportStore};
use crate::domain::analysis::{CostAnalyzer, build_report};
use crate::domain::period::AnalysisPeriod;

pub struct CoreApp {
    pub config: AppConfig,
    pub analyzer: CostAnalyzer,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<ExitCode> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Preview { cost }) => Self::preview(cost, &cli_config),
            Some(Commands::Analyze) | None => {
                let app = Self::init(&cli_config).await?;
                let response = app.invoke(Utc::now()).await;
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(if response.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let billing = Arc::new(CostExplorerSource::new(config.storage.region.clone()).await);
        let store =
            reports::create_store(&config.analyzer.storage_namespace, &config.storage).await?;

        Ok(Self::with_collaborators(config, billing, store))
    }

    /// Build the app around explicit billing and storage collaborators
    pub fn with_collaborators(
        config: AppConfig,
        billing: Arc<dyn BillingSource>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        let analyzer = CostAnalyzer::new(billing, store, config.analyzer.project_label.clone());
        Self { config, analyzer }
    }

    /// Run one analysis and map the outcome to an invocation response
    pub async fn invoke(&self, now: DateTime<Utc>) -> InvocationResponse {
        tracing::info!(
            app = APP_NAME,
            project = %self.config.analyzer.project_label,
            namespace = %self.config.analyzer.storage_namespace,
            "Starting ML cost analysis"
        );

        let response = InvocationResponse::from_outcome(self.analyzer.run(now).await);

        tracing::debug!(status = response.status_code, "Invocation finished");
        response
    }

    fn preview(cost: Decimal, cli: &CliConfig) -> Result<ExitCode> {
        let now = Utc::now();
        let project = cli.project.as_deref().unwrap_or(DEFAULT_PROJECT_LABEL);
        let report = build_report(cost, AnalysisPeriod::ending(now.date_naive()), project, now);

        println!("{}", report.to_json()?);
        Ok(ExitCode::SUCCESS)
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(false)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
