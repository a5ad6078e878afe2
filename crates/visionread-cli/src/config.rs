//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── uri, language, legacy_output   # What to analyze and how to report it
//! ├── azure: AzureConfig             # Endpoint, key, HTTP timeout
//! └── poll: PollPolicy               # Retry budget and poll interval
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use visionread_azure::{AzureConfig, AzureReadClient};
use visionread_core::{AnalysisRequest, PollPolicy, ReadService};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "visionread")]
#[command(about = "Recognize text in a remote image with Azure Computer Vision")]
#[command(version)]
pub struct Cli {
    /// URI of the image to analyze.
    pub uri: String,

    /// Language hint sent to the recognizer.
    #[arg(long, env = "READ_LANGUAGE", default_value = visionread_core::read::DEFAULT_LANGUAGE)]
    pub language: String,

    /// Print `max retries reached` / `error` instead of failing on those outcomes.
    #[arg(long)]
    pub legacy_output: bool,

    /// Azure Computer Vision connection.
    #[clap(flatten)]
    pub azure: AzureConfig,

    /// Polling budget and interval.
    #[clap(flatten)]
    pub poll: PollPolicy,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap's `env` fallbacks see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr; stdout carries only the recognized text.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.azure
            .validate()
            .context("invalid Azure configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            endpoint = %self.azure.endpoint,
            http_timeout_secs = self.azure.http_timeout,
            max_retries = self.poll.max_retries,
            poll_interval_secs = self.poll.poll_interval,
            language = %self.language,
            "Read configuration"
        );
    }

    /// Builds the read service from the Azure configuration and polling policy.
    pub fn create_service(&self) -> anyhow::Result<ReadService> {
        let client =
            AzureReadClient::new(self.azure.clone()).context("failed to create Azure client")?;
        Ok(client.into_service().with_policy(self.poll))
    }

    /// Returns the analysis request described by the arguments.
    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.uri.clone()).with_language(self.language.clone())
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
